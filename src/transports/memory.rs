//! In-memory transport for development and tests.
//!
//! Fully functional queue simulation: FIFO delivery, receipt-tracked
//! in-flight messages, and per-entry batch outcomes. One queue state is kept
//! per queue URL, created on first use.

use crate::client::SqsTransport;
use crate::error::QueueError;
use crate::message::{
    BatchErrorEntry, BatchResponse, BatchResultEntry, DeleteBatchEntry, MessageId, PullOptions,
    ReceiptId, ReceivedMessage, SendBatchEntry,
};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;

/// Receives default to one message when no limit is given, matching the
/// service default.
const DEFAULT_RECEIVE_LIMIT: usize = 1;

struct StoredMessage {
    message_id: MessageId,
    body: String,
}

#[derive(Default)]
struct QueueState {
    /// Messages awaiting delivery, in arrival order.
    ready: VecDeque<StoredMessage>,
    /// Delivered messages awaiting deletion, keyed by receipt token.
    in_flight: HashMap<String, StoredMessage>,
}

/// [`SqsTransport`] implementation backed by process memory.
#[derive(Default)]
pub struct InMemoryTransport {
    queues: Mutex<HashMap<String, QueueState>>,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages ready for delivery on `queue_url`.
    pub fn ready_len(&self, queue_url: &str) -> usize {
        self.queues
            .lock()
            .expect("queue lock poisoned")
            .get(queue_url)
            .map(|q| q.ready.len())
            .unwrap_or(0)
    }

    /// Number of delivered-but-undeleted messages on `queue_url`.
    pub fn in_flight_len(&self, queue_url: &str) -> usize {
        self.queues
            .lock()
            .expect("queue lock poisoned")
            .get(queue_url)
            .map(|q| q.in_flight.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl SqsTransport for InMemoryTransport {
    async fn send_message(&self, queue_url: &str, body: String) -> Result<MessageId, QueueError> {
        let message_id = MessageId::new();
        let mut queues = self.queues.lock().expect("queue lock poisoned");
        queues
            .entry(queue_url.to_string())
            .or_default()
            .ready
            .push_back(StoredMessage {
                message_id: message_id.clone(),
                body,
            });
        Ok(message_id)
    }

    async fn send_message_batch(
        &self,
        queue_url: &str,
        entries: Vec<SendBatchEntry>,
    ) -> Result<BatchResponse, QueueError> {
        let mut queues = self.queues.lock().expect("queue lock poisoned");
        let queue = queues.entry(queue_url.to_string()).or_default();

        let mut response = BatchResponse::default();
        for entry in entries {
            let message_id = MessageId::new();
            queue.ready.push_back(StoredMessage {
                message_id: message_id.clone(),
                body: entry.body,
            });
            response.successful.push(BatchResultEntry {
                id: entry.id,
                message_id: Some(message_id),
            });
        }
        Ok(response)
    }

    async fn receive_message(
        &self,
        queue_url: &str,
        options: &PullOptions,
    ) -> Result<Vec<ReceivedMessage>, QueueError> {
        let limit = options
            .max_messages
            .map(|max| max as usize)
            .unwrap_or(DEFAULT_RECEIVE_LIMIT);

        let mut queues = self.queues.lock().expect("queue lock poisoned");
        let queue = queues.entry(queue_url.to_string()).or_default();

        let mut received = Vec::new();
        while received.len() < limit {
            let Some(stored) = queue.ready.pop_front() else {
                break;
            };
            let receipt_token = uuid::Uuid::new_v4().to_string();
            received.push(ReceivedMessage {
                message_id: stored.message_id.clone(),
                body: stored.body.clone(),
                receipt: ReceiptId::new(receipt_token.clone()),
                attributes: HashMap::new(),
            });
            queue.in_flight.insert(receipt_token, stored);
        }
        Ok(received)
    }

    async fn delete_message(
        &self,
        queue_url: &str,
        receipt: &ReceiptId,
    ) -> Result<(), QueueError> {
        let mut queues = self.queues.lock().expect("queue lock poisoned");
        let queue = queues.entry(queue_url.to_string()).or_default();

        match queue.in_flight.remove(receipt.as_str()) {
            Some(_) => Ok(()),
            None => Err(QueueError::ReceiptInvalid {
                receipt: receipt.as_str().to_string(),
            }),
        }
    }

    async fn delete_message_batch(
        &self,
        queue_url: &str,
        entries: Vec<DeleteBatchEntry>,
    ) -> Result<BatchResponse, QueueError> {
        let mut queues = self.queues.lock().expect("queue lock poisoned");
        let queue = queues.entry(queue_url.to_string()).or_default();

        let mut response = BatchResponse::default();
        for entry in entries {
            if queue.in_flight.remove(entry.receipt.as_str()).is_some() {
                response.successful.push(BatchResultEntry {
                    id: entry.id,
                    message_id: None,
                });
            } else {
                response.failed.push(BatchErrorEntry {
                    id: entry.id,
                    code: "ReceiptHandleIsInvalid".to_string(),
                    message: format!("no in-flight message for receipt {}", entry.receipt),
                    sender_fault: true,
                });
            }
        }
        Ok(response)
    }
}
