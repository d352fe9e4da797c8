//! Tests for error classification and formatting.

use super::*;

#[test]
fn test_transient_classification() {
    let connection = QueueError::ConnectionFailed {
        message: "connection reset".to_string(),
    };
    assert!(connection.is_transient(), "Connection errors are transient");

    let service = QueueError::ServiceError {
        code: "InternalError".to_string(),
        message: "internal error".to_string(),
    };
    assert!(service.is_transient(), "Service faults are transient");

    let auth = QueueError::AuthenticationFailed {
        message: "bad credentials".to_string(),
    };
    assert!(!auth.is_transient(), "Auth errors are not transient");

    let batch = QueueError::BatchTooLarge {
        size: 11,
        max_size: 10,
    };
    assert!(!batch.is_transient(), "Caller misuse is not transient");
}

#[test]
fn test_error_display() {
    let error = QueueError::BatchTooLarge {
        size: 12,
        max_size: 10,
    };
    assert_eq!(error.to_string(), "Batch size 12 exceeds maximum 10");

    let error = QueueError::ServiceError {
        code: "Throttling".to_string(),
        message: "rate exceeded".to_string(),
    };
    assert_eq!(error.to_string(), "Service error: Throttling - rate exceeded");
}
