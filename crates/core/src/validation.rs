//! Turning `validator` reports into ordered, user-facing field errors.
//!
//! `validator` collects violations in a hash map, so the order fields are
//! reported in is arbitrary. Forms and the API both want a stable order
//! (the order fields appear on screen), which callers supply here.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{ValidationError, ValidationErrors};

/// A single violated field with its display message.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct FieldError {
    /// Field name as the client knows it (e.g. `imageUrl`).
    pub field: String,
    /// Message suitable for showing next to the field.
    pub message: String,
}

impl FieldError {
    /// Create a field error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Mapping from a struct field name to the name exposed to clients.
pub(crate) type FieldOrder = &'static [(&'static str, &'static str)];

/// Flatten a validation report into one error per field, in `order`.
///
/// Only the first violation of each field is kept.
pub(crate) fn ordered(errors: &ValidationErrors, order: FieldOrder) -> Vec<FieldError> {
    let by_field = errors.field_errors();

    order
        .iter()
        .filter_map(|(field, exposed)| {
            let first = by_field.get(*field)?.first()?;
            Some(FieldError::new(*exposed, message_of(first)))
        })
        .collect()
}

/// Build a `ValidationError` carrying a fixed message.
pub(crate) fn violation(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn message_of(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map_or_else(|| format!("Invalid value ({})", error.code), ToString::to_string)
}
