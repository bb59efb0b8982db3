//! Simulated checkout: the payment form, order summary and order codes.
//!
//! Nothing here talks to a payment processor. The flow validates the form,
//! moves through a processing state and finishes with a random order code.

use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::cart::Cart;
use crate::types::Price;
use crate::validation::{self, FieldError, FieldOrder};

/// Sales tax applied at checkout (8%).
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Errors from the checkout flow.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// One or more form fields are invalid.
    #[error("checkout form is invalid: {}", .0.first().map_or("", |e| e.message.as_str()))]
    Invalid(Vec<FieldError>),
    /// There is nothing to pay for.
    #[error("cart is empty")]
    EmptyCart,
    /// The flow was asked to move to a step it cannot reach from here.
    #[error("cannot move checkout from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
}

const FIELD_ORDER: FieldOrder = &[
    ("first_name", "firstName"),
    ("last_name", "lastName"),
    ("email", "email"),
    ("address", "address"),
    ("city", "city"),
    ("zip", "zip"),
    ("card_number", "cardNumber"),
    ("expiry", "expiry"),
    ("cvc", "cvc"),
];

/// Shipping and payment details entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    #[validate(length(min = 2, message = "Name too short"))]
    pub first_name: String,
    #[validate(length(min = 2, message = "Name too short"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 5, message = "Address required"))]
    pub address: String,
    #[validate(length(min = 2, message = "City required"))]
    pub city: String,
    #[validate(length(min = 5, message = "Valid ZIP required"))]
    pub zip: String,
    #[validate(
        length(min = 16, message = "Invalid card number"),
        custom(function = "card_number_max")
    )]
    pub card_number: String,
    #[validate(length(min = 4, message = "MM/YY"))]
    pub expiry: String,
    #[validate(length(min = 3, message = "CVC required"), custom(function = "cvc_max"))]
    pub cvc: String,
}

impl CheckoutForm {
    /// Every invalid field, in the order they appear on the form.
    #[must_use]
    pub fn violations(&self) -> Vec<FieldError> {
        self.validate()
            .err()
            .map(|errors| validation::ordered(&errors, FIELD_ORDER))
            .unwrap_or_default()
    }

    /// Validate the whole form.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Invalid`] listing every invalid field.
    pub fn check(&self) -> Result<(), CheckoutError> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(CheckoutError::Invalid(violations))
        }
    }
}

fn card_number_max(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() > 19 {
        return Err(validation::violation(
            "length",
            "String must contain at most 19 character(s)",
        ));
    }
    Ok(())
}

fn cvc_max(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() > 4 {
        return Err(validation::violation(
            "length",
            "String must contain at most 4 character(s)",
        ));
    }
    Ok(())
}

/// Totals shown on the checkout page.
///
/// Shipping is always free. Tax and total are each rounded to cents from the
/// unrounded subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub subtotal: Price,
    pub shipping: Price,
    pub tax: Price,
    pub total: Price,
}

impl OrderSummary {
    /// Compute the summary for a cart.
    #[must_use]
    pub fn for_cart(cart: &Cart) -> Self {
        Self::for_subtotal(cart.total())
    }

    #[must_use]
    pub fn for_subtotal(subtotal: Price) -> Self {
        Self {
            subtotal,
            shipping: Price::ZERO,
            tax: subtotal.scale_by(TAX_RATE).round_to_cents(),
            total: subtotal
                .scale_by(Decimal::ONE + TAX_RATE)
                .round_to_cents(),
        }
    }
}

/// Confirmation code shown after a successful checkout.
///
/// Nine characters drawn from `0-9A-Z`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderCode(String);

impl OrderCode {
    pub const LENGTH: usize = 9;

    /// Draw a fresh code from `rng`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let code = (0..Self::LENGTH)
            .filter_map(|_| char::from_digit(rng.random_range(0..36), 36))
            .map(|c| c.to_ascii_uppercase())
            .collect();
        Self(code)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for OrderCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where the checkout page currently is.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "camelCase")]
pub enum CheckoutStep {
    /// Collecting the form.
    #[default]
    Form,
    /// Payment submitted, waiting on the (simulated) processor.
    Processing,
    /// Order placed.
    Success { order_code: OrderCode },
}

impl CheckoutStep {
    const fn name(&self) -> &'static str {
        match self {
            Self::Form => "form",
            Self::Processing => "processing",
            Self::Success { .. } => "success",
        }
    }
}

/// Form → Processing → Success state machine.
#[derive(Debug, Clone, Default)]
pub struct CheckoutFlow {
    step: CheckoutStep,
}

impl CheckoutFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn step(&self) -> &CheckoutStep {
        &self.step
    }

    /// Submit the form. Moves to [`CheckoutStep::Processing`].
    ///
    /// # Errors
    ///
    /// Fails if the flow is not on the form, the cart is empty or the form
    /// has invalid fields. The flow stays where it was.
    pub fn submit(&mut self, form: &CheckoutForm, cart: &Cart) -> Result<OrderSummary, CheckoutError> {
        self.expect(&CheckoutStep::Form, "processing")?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        form.check()?;

        self.step = CheckoutStep::Processing;
        Ok(OrderSummary::for_cart(cart))
    }

    /// Finish processing with the given order code.
    ///
    /// # Errors
    ///
    /// Fails unless the flow is processing.
    pub fn complete(&mut self, order_code: OrderCode) -> Result<(), CheckoutError> {
        self.expect(&CheckoutStep::Processing, "success")?;
        self.step = CheckoutStep::Success { order_code };
        Ok(())
    }

    /// Return to the form (e.g. after a processing failure).
    pub fn reset(&mut self) {
        self.step = CheckoutStep::Form;
    }

    fn expect(&self, wanted: &CheckoutStep, to: &'static str) -> Result<(), CheckoutError> {
        if core::mem::discriminant(&self.step) == core::mem::discriminant(wanted) {
            Ok(())
        } else {
            Err(CheckoutError::InvalidTransition {
                from: self.step.name(),
                to,
            })
        }
    }
}
