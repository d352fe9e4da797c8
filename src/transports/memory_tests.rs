//! Tests for the in-memory transport.

use super::*;

const QUEUE: &str = "https://sqs.us-east-1.amazonaws.com/123456789012/test-queue";

#[tokio::test]
async fn test_send_then_receive_round_trip() {
    // Arrange
    let transport = InMemoryTransport::new();
    let sent_id = transport
        .send_message(QUEUE, r#"{"seq":1}"#.to_string())
        .await
        .unwrap();

    // Act
    let options = PullOptions::default();
    let received = transport.receive_message(QUEUE, &options).await.unwrap();

    // Assert
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].message_id, sent_id);
    assert_eq!(received[0].body, r#"{"seq":1}"#);
    assert_eq!(transport.ready_len(QUEUE), 0);
    assert_eq!(transport.in_flight_len(QUEUE), 1);
}

#[tokio::test]
async fn test_receive_preserves_fifo_order() {
    let transport = InMemoryTransport::new();
    for i in 0..3 {
        transport
            .send_message(QUEUE, format!("message-{}", i))
            .await
            .unwrap();
    }

    let options = PullOptions::default().with_max_messages(10);
    let received = transport.receive_message(QUEUE, &options).await.unwrap();

    let bodies: Vec<&str> = received.iter().map(|m| m.body.as_str()).collect();
    assert_eq!(bodies, ["message-0", "message-1", "message-2"]);
}

/// Without an explicit limit the service default of one applies
#[tokio::test]
async fn test_receive_defaults_to_one_message() {
    let transport = InMemoryTransport::new();
    for i in 0..3 {
        transport
            .send_message(QUEUE, format!("message-{}", i))
            .await
            .unwrap();
    }

    let received = transport
        .receive_message(QUEUE, &PullOptions::service_defaults())
        .await
        .unwrap();

    assert_eq!(received.len(), 1);
    assert_eq!(transport.ready_len(QUEUE), 2);
}

#[tokio::test]
async fn test_receive_from_empty_queue_returns_empty_batch() {
    let transport = InMemoryTransport::new();

    let received = transport
        .receive_message(QUEUE, &PullOptions::default())
        .await
        .unwrap();

    assert!(received.is_empty());
}

#[tokio::test]
async fn test_delete_removes_in_flight_message() {
    // Arrange
    let transport = InMemoryTransport::new();
    transport
        .send_message(QUEUE, "body".to_string())
        .await
        .unwrap();
    let received = transport
        .receive_message(QUEUE, &PullOptions::default())
        .await
        .unwrap();

    // Act
    let result = transport.delete_message(QUEUE, &received[0].receipt).await;

    // Assert
    assert!(result.is_ok());
    assert_eq!(transport.in_flight_len(QUEUE), 0);
}

#[tokio::test]
async fn test_delete_unknown_receipt_fails() {
    let transport = InMemoryTransport::new();

    let result = transport
        .delete_message(QUEUE, &ReceiptId::new("never-issued"))
        .await;

    assert!(matches!(result, Err(QueueError::ReceiptInvalid { .. })));
}

#[tokio::test]
async fn test_send_batch_accepts_every_entry() {
    let transport = InMemoryTransport::new();
    let entries = (1..=3)
        .map(|i| SendBatchEntry {
            id: i.to_string(),
            body: format!("message-{}", i),
        })
        .collect();

    let response = transport.send_message_batch(QUEUE, entries).await.unwrap();

    assert!(response.is_complete_success());
    assert_eq!(response.successful.len(), 3);
    assert_eq!(transport.ready_len(QUEUE), 3);
}

/// Unknown receipts land in the failed partition instead of failing the call
#[tokio::test]
async fn test_delete_batch_partitions_outcomes() {
    // Arrange
    let transport = InMemoryTransport::new();
    transport
        .send_message(QUEUE, "body".to_string())
        .await
        .unwrap();
    let received = transport
        .receive_message(QUEUE, &PullOptions::default())
        .await
        .unwrap();

    let entries = vec![
        DeleteBatchEntry {
            id: "1".to_string(),
            receipt: received[0].receipt.clone(),
        },
        DeleteBatchEntry {
            id: "2".to_string(),
            receipt: ReceiptId::new("never-issued"),
        },
    ];

    // Act
    let response = transport
        .delete_message_batch(QUEUE, entries)
        .await
        .unwrap();

    // Assert
    assert_eq!(response.successful.len(), 1);
    assert_eq!(response.successful[0].id, "1");
    assert_eq!(response.failed.len(), 1);
    assert_eq!(response.failed[0].id, "2");
    assert_eq!(response.failed[0].code, "ReceiptHandleIsInvalid");
    assert!(response.failed[0].sender_fault);
}

#[tokio::test]
async fn test_queues_are_isolated_by_url() {
    let transport = InMemoryTransport::new();
    let other = "https://sqs.us-east-1.amazonaws.com/123456789012/other-queue";

    transport
        .send_message(QUEUE, "body".to_string())
        .await
        .unwrap();

    assert_eq!(transport.ready_len(QUEUE), 1);
    assert_eq!(transport.ready_len(other), 0);
}
