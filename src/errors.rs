//! Error types for the wrapper bridge
//!
//! One taxonomy shared by the mock engine, the remote backend, and the
//! session bridge. Every failure is surfaced exactly once through the
//! returned `Result`; there is no secondary reporting channel.

use reqwest::StatusCode;

/// Root error type for all wrapper operations
#[derive(Debug, thiserror::Error)]
pub enum WrapperError {
    /// Prize table missing, empty, or otherwise unusable
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Non-success HTTP status from the remote backend
    #[error("backend returned {status}: {message}")]
    Transport { status: StatusCode, message: String },

    /// Network-level failure before any status was received
    #[error("network error: {0}")]
    Network(String),

    /// Malformed request, response, ticket, or scenario data
    #[error("validation error: {0}")]
    Validation(String),

    /// A wager was attempted while another round is still in flight
    #[error("a round is already in progress")]
    RoundInProgress,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for WrapperError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            WrapperError::Validation(format!("malformed backend response: {}", e))
        } else {
            WrapperError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for WrapperError {
    fn from(e: serde_json::Error) -> Self {
        WrapperError::Validation(e.to_string())
    }
}

/// Convenience alias used throughout the crate
pub type WrapperResult<T> = Result<T, WrapperError>;
