//! Error types for queue operations.

use thiserror::Error;

/// Error type for all queue operations.
#[derive(Debug, Error)]
pub enum QueueError {
    /// Client-side guard on batch operations; raised before any request is
    /// issued.
    #[error("Batch size {size} exceeds maximum {max_size}")]
    BatchTooLarge { size: usize, max_size: usize },

    #[error("Queue not found: {queue_url}")]
    QueueNotFound { queue_url: String },

    #[error("Receipt not found or expired: {receipt}")]
    ReceiptInvalid { receipt: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("Service error: {code} - {message}")]
    ServiceError { code: String, message: String },

    #[error("Malformed service response: {message}")]
    MalformedResponse { message: String },

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },
}

impl QueueError {
    /// Check if the error is transient.
    ///
    /// No operation in this crate retries; the classification exists so
    /// callers can layer their own retry policy on top.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::BatchTooLarge { .. } => false,
            Self::QueueNotFound { .. } => false,
            Self::ReceiptInvalid { .. } => false,
            Self::AuthenticationFailed { .. } => false,
            Self::ConnectionFailed { .. } => true,
            Self::ServiceError { .. } => true, // most service faults clear on their own
            Self::MalformedResponse { .. } => false,
            Self::Serialization(_) => false,
            Self::Configuration { .. } => false,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
