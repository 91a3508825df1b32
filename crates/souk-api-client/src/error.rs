//! Error types for the marketplace API client

use thiserror::Error;

/// Marketplace API client error
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// Request timed out
    #[error("request timed out")]
    Timeout,

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server returned a non-success HTTP status
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Server accepted the request but returned a failure envelope
    #[error("request rejected: {message}")]
    Rejected { message: String },

    /// Resource not found (HTTP 404)
    #[error("not found: {0}")]
    NotFound(String),

    /// Response did not match the expected envelope shape
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Http(err)
        }
    }
}

/// Result type for API client operations
pub type Result<T> = std::result::Result<T, ApiError>;
