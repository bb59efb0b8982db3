//! Client-side errors.

use thiserror::Error;

/// Errors from talking to the storefront API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("API request failed: {0}")]
    Request(String),

    /// The response body could not be decoded.
    #[error("API response error: {0}")]
    Response(String),

    /// Could not build a URL from the configured base.
    #[error("Invalid API URL: {0}")]
    Url(#[from] url::ParseError),

    /// 404 from the API.
    #[error("{0}")]
    NotFound(String),

    /// 400 from the API, with the offending field when one was reported.
    #[error("{message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// 401 from the API.
    #[error("Not authenticated")]
    Unauthorized,

    /// Any other non-success status.
    #[error("API returned {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },
}

/// Errors from the local key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be used as a storage name.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The value could not be encoded.
    #[error("could not encode stored value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors from placing an order.
#[derive(Debug, Error)]
pub enum PlaceOrderError {
    /// The form, cart or flow state rejected the submission.
    #[error(transparent)]
    Checkout(#[from] nursery_core::CheckoutError),

    /// The order went through but the emptied cart could not be saved.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
