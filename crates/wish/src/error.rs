//! Internal error taxonomy for the wish adapter. These never escape the
//! crate; `WishClient::grant` maps every variant onto a fallback response.

use thiserror::Error;

/// Errors that can occur while requesting a wish blessing
#[derive(Error, Debug)]
pub enum WishError {
    /// No credential configured; detected before any network I/O
    #[error("No API key configured")]
    MissingCredential,

    /// Transport or HTTP-level failure
    #[error("API error: {0}")]
    Api(String),

    /// Response arrived but did not match the strict two-field contract
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for WishError {
    fn from(err: reqwest::Error) -> Self {
        WishError::Api(err.to_string())
    }
}

impl From<serde_json::Error> for WishError {
    fn from(err: serde_json::Error) -> Self {
        WishError::Malformed(err.to_string())
    }
}

/// Result type for wish operations
pub type Result<T> = std::result::Result<T, WishError>;
