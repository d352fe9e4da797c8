//! Message types for queue operations.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier the service assigns to an accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(String);

impl MessageId {
    /// Generate a new random message id.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Wrap a service-assigned id.
    pub fn from_string(id: String) -> Self {
        Self(id)
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque token identifying one delivery of a received message.
///
/// Required to delete (acknowledge) that delivery. No structure is imposed
/// on the token beyond being a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReceiptId(String);

impl ReceiptId {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Received messages and pull options
// ============================================================================

/// A message received from the queue.
#[derive(Debug, Clone)]
pub struct ReceivedMessage {
    pub message_id: MessageId,
    /// Message body exactly as the service returned it.
    pub body: String,
    /// Receipt required to delete this delivery.
    pub receipt: ReceiptId,
    /// Service attributes reported with the message.
    pub attributes: HashMap<String, String>,
}

/// Limits for a single receive request.
///
/// A `None` field is omitted from the request entirely so the service
/// default applies; this is deliberate pass-through-of-absence, not a zero
/// value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullOptions {
    /// Maximum messages returned by one request.
    pub max_messages: Option<u32>,
    /// Long-poll wait in seconds.
    pub wait_seconds: Option<u32>,
}

impl Default for PullOptions {
    fn default() -> Self {
        Self {
            max_messages: Some(10),
            wait_seconds: Some(20),
        }
    }
}

impl PullOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leave both limits to the service.
    pub fn service_defaults() -> Self {
        Self {
            max_messages: None,
            wait_seconds: None,
        }
    }

    pub fn with_max_messages(mut self, max: u32) -> Self {
        self.max_messages = Some(max);
        self
    }

    pub fn with_wait_seconds(mut self, seconds: u32) -> Self {
        self.wait_seconds = Some(seconds);
        self
    }
}

// ============================================================================
// Batch entries and responses
// ============================================================================

/// One entry of a batched send request. The `id` is positional within the
/// batch ("1" through "10") and ties response entries back to requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendBatchEntry {
    pub id: String,
    pub body: String,
}

/// One entry of a batched delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteBatchEntry {
    pub id: String,
    pub receipt: ReceiptId,
}

/// Per-entry outcome of a batch request, partitioned the way the service
/// reports it. Forwarded to callers without interpretation.
#[derive(Debug, Clone, Default)]
pub struct BatchResponse {
    pub successful: Vec<BatchResultEntry>,
    pub failed: Vec<BatchErrorEntry>,
}

impl BatchResponse {
    /// Check that every entry in the batch was accepted.
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// An accepted batch entry.
#[derive(Debug, Clone)]
pub struct BatchResultEntry {
    /// Positional id from the request.
    pub id: String,
    /// Message id assigned on send; absent for delete entries.
    pub message_id: Option<MessageId>,
}

/// A rejected batch entry.
#[derive(Debug, Clone)]
pub struct BatchErrorEntry {
    pub id: String,
    pub code: String,
    pub message: String,
    /// True when the service blames the request rather than itself.
    pub sender_fault: bool,
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
