//! # SQS Dispatch
//!
//! Buffered dispatch client for AWS SQS: thin pass-through send, pull, and
//! delete operations plus a pending-message buffer that is flushed as
//! batched sends on a size threshold or a periodic timer.
//!
//! This library provides:
//! - Single-message send with payload serialization
//! - Long-polling pulls, individually or as a concurrent fan-out
//! - Delete by receipt, batched deletes, and chunked large-batch deletes
//! - A buffered send path with flush observation (at-most-once attempt)
//! - A registry memoizing one client per connection identity
//!
//! ## Module Organization
//!
//! - [`error`] - Error types for all queue operations
//! - [`config`] - Connection configuration
//! - [`message`] - Message structures, receipts, and batch entries
//! - [`client`] - The queue client and transport contract
//! - [`registry`] - Client memoization by connection identity
//! - [`transports`] - HTTP and in-memory transport implementations

// Module declarations
pub mod client;
pub mod config;
pub mod error;
pub mod message;
pub mod registry;
pub mod transports;

// Re-export commonly used types at crate root for convenience
pub use client::{
    FlushOutcome, MultiPullOptions, QueueClient, SqsTransport, DEFAULT_CONCURRENT_PULLS,
    DEFAULT_FLUSH_INTERVAL, MAX_BATCH_SIZE,
};
pub use config::{SqsConfig, DEFAULT_REGION};
pub use error::QueueError;
pub use message::{
    BatchErrorEntry, BatchResponse, BatchResultEntry, DeleteBatchEntry, MessageId, PullOptions,
    ReceiptId, ReceivedMessage, SendBatchEntry,
};
pub use registry::ClientRegistry;
pub use transports::{InMemoryTransport, SqsHttpTransport};
