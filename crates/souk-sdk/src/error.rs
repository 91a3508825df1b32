//! Error types for the Souk SDK

use crate::booking::{BookingAction, BookingStatus};
use souk_api_client::ApiError;
use thiserror::Error;

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

/// SDK error types
#[derive(Debug, Error)]
pub enum SdkError {
    /// Booking or profile absent from the fetched set
    #[error("not found: {0}")]
    NotFound(String),

    /// Lifecycle action attempted from a state that does not permit it.
    /// The local mirror is left untouched.
    #[error("invalid transition: {action} not allowed from {from}")]
    InvalidTransition {
        from: BookingStatus,
        action: BookingAction,
    },

    /// Remote mutation failed, either in transport or with a failure
    /// envelope. Any optimistic local change has been rolled back.
    #[error("remote action failed: {0}")]
    RemoteActionFailed(String),

    /// Remote call exceeded the configured timeout
    #[error("network timeout")]
    NetworkTimeout,

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<ApiError> for SdkError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Timeout => SdkError::NetworkTimeout,
            ApiError::NotFound(what) => SdkError::NotFound(what),
            ApiError::Json(e) => SdkError::Serialization(e.to_string()),
            other => SdkError::RemoteActionFailed(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(err: serde_json::Error) -> Self {
        SdkError::Serialization(err.to_string())
    }
}
