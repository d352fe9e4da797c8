//! Tests for message types and pull options.

use super::*;

#[test]
fn test_pull_options_defaults() {
    let options = PullOptions::default();
    assert_eq!(options.max_messages, Some(10));
    assert_eq!(options.wait_seconds, Some(20));
}

#[test]
fn test_pull_options_service_defaults_omit_limits() {
    let options = PullOptions::service_defaults();
    assert_eq!(options.max_messages, None);
    assert_eq!(options.wait_seconds, None);
}

#[test]
fn test_pull_options_builders() {
    let options = PullOptions::new().with_max_messages(3).with_wait_seconds(0);
    assert_eq!(options.max_messages, Some(3));
    assert_eq!(options.wait_seconds, Some(0));
}

#[test]
fn test_receipt_id_is_opaque() {
    // Whatever the service hands out round-trips untouched
    let token = "AQEBwJnKyrHigUMZj6rYigCgxlaS3SLy0a...";
    let receipt = ReceiptId::new(token);
    assert_eq!(receipt.as_str(), token);
    assert_eq!(receipt.to_string(), token);
}

#[test]
fn test_message_id_generation_is_unique() {
    assert_ne!(MessageId::new(), MessageId::new());
}

#[test]
fn test_batch_response_complete_success() {
    let mut response = BatchResponse::default();
    assert!(response.is_complete_success());

    response.failed.push(BatchErrorEntry {
        id: "2".to_string(),
        code: "InternalError".to_string(),
        message: "try again".to_string(),
        sender_fault: false,
    });
    assert!(!response.is_complete_success());
}
