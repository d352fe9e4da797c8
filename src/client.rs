//! Client for queue operations: direct send/pull/delete plus the buffered,
//! timer-flushed batch send path.

use crate::config::SqsConfig;
use crate::error::QueueError;
use crate::message::{
    BatchResponse, DeleteBatchEntry, MessageId, PullOptions, ReceiptId, ReceivedMessage,
    SendBatchEntry,
};
use async_trait::async_trait;
use futures::future::try_join_all;
use serde::Serialize;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;

/// Hard ceiling the service places on batch requests.
pub const MAX_BATCH_SIZE: usize = 10;

/// Cadence of the buffer flush timer.
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(10);

/// Fan-out width of [`QueueClient::multi_pull`] when none is given.
pub const DEFAULT_CONCURRENT_PULLS: usize = 100;

// ============================================================================
// Transport contract
// ============================================================================

/// Contract the external queue service client must satisfy.
///
/// The queue client shapes requests and forwards responses; authentication,
/// retry policy, and the wire protocol are owned end to end by the
/// implementation. Errors are forwarded without interpretation.
#[async_trait]
pub trait SqsTransport: Send + Sync {
    /// Send a single message body.
    async fn send_message(&self, queue_url: &str, body: String) -> Result<MessageId, QueueError>;

    /// Send up to ten bodies in one request.
    async fn send_message_batch(
        &self,
        queue_url: &str,
        entries: Vec<SendBatchEntry>,
    ) -> Result<BatchResponse, QueueError>;

    /// Receive a batch of messages, long-polling up to the requested wait.
    async fn receive_message(
        &self,
        queue_url: &str,
        options: &PullOptions,
    ) -> Result<Vec<ReceivedMessage>, QueueError>;

    /// Delete one message by receipt.
    async fn delete_message(&self, queue_url: &str, receipt: &ReceiptId)
        -> Result<(), QueueError>;

    /// Delete up to ten messages in one request.
    async fn delete_message_batch(
        &self,
        queue_url: &str,
        entries: Vec<DeleteBatchEntry>,
    ) -> Result<BatchResponse, QueueError>;
}

// ============================================================================
// Flush observation
// ============================================================================

/// What a successful flush handed to the transport and got back.
#[derive(Debug, Clone)]
pub struct FlushOutcome {
    /// Transport response for the batched send.
    pub response: BatchResponse,
    /// The payloads drained from the buffer, in insertion order.
    pub messages: Vec<Value>,
}

type FlushListener = Arc<dyn Fn(Result<FlushOutcome, QueueError>) + Send + Sync>;

/// Options for [`QueueClient::multi_pull`].
#[derive(Debug, Clone)]
pub struct MultiPullOptions {
    /// Number of independent pulls issued concurrently.
    pub concurrent: usize,
}

impl Default for MultiPullOptions {
    fn default() -> Self {
        Self {
            concurrent: DEFAULT_CONCURRENT_PULLS,
        }
    }
}

// ============================================================================
// Queue client
// ============================================================================

/// Client for one queue: pass-through send/pull/delete operations and a
/// pending-message buffer flushed as batched sends.
///
/// The buffer drains whenever it reaches [`MAX_BATCH_SIZE`] entries or when
/// the periodic flush timer fires, whichever comes first. Every flush
/// attempt is reported to the registered flush listener; messages removed
/// from the buffer are never re-queued, so the buffered path is an
/// at-most-once attempt.
///
/// Cloning is cheap; clones share the buffer, timer, and listener.
#[derive(Clone)]
pub struct QueueClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: Arc<dyn SqsTransport>,
    config: SqsConfig,
    flush_interval: Duration,
    buffer: Mutex<VecDeque<Value>>,
    timer: Mutex<Option<JoinHandle<()>>>,
    listener: Mutex<Option<FlushListener>>,
}

impl QueueClient {
    /// Create a client and start its flush timer.
    ///
    /// Must be called within a Tokio runtime; the timer runs as a spawned
    /// task.
    pub fn new(transport: Arc<dyn SqsTransport>, config: SqsConfig) -> Self {
        Self::with_flush_interval(transport, config, DEFAULT_FLUSH_INTERVAL)
    }

    /// Create a client with a non-default flush cadence.
    pub fn with_flush_interval(
        transport: Arc<dyn SqsTransport>,
        config: SqsConfig,
        flush_interval: Duration,
    ) -> Self {
        let client = Self {
            inner: Arc::new(ClientInner {
                transport,
                config,
                flush_interval,
                buffer: Mutex::new(VecDeque::new()),
                timer: Mutex::new(None),
                listener: Mutex::new(None),
            }),
        };
        ClientInner::start(&client.inner);
        client
    }

    /// Serialize `payload` and send it as a single message.
    ///
    /// Transport failures are returned unchanged; nothing is retried.
    pub async fn send<T: Serialize>(&self, payload: &T) -> Result<MessageId, QueueError> {
        let body = serde_json::to_string(payload)?;
        self.inner
            .transport
            .send_message(&self.inner.config.queue_url, body)
            .await
    }

    /// Issue one receive request with the given limits.
    ///
    /// Returns whatever batch the service yields, possibly empty.
    pub async fn pull(&self, options: PullOptions) -> Result<Vec<ReceivedMessage>, QueueError> {
        self.inner
            .transport
            .receive_message(&self.inner.config.queue_url, &options)
            .await
    }

    /// Issue `options.concurrent` independent pulls concurrently and wait
    /// for all of them.
    ///
    /// Returns the ordered list of individual results, empty batches
    /// included. The first failing pull fails the whole operation; pulls
    /// already completed are not reported.
    pub async fn multi_pull(
        &self,
        options: MultiPullOptions,
    ) -> Result<Vec<Vec<ReceivedMessage>>, QueueError> {
        let pulls = (0..options.concurrent).map(|_| self.pull(PullOptions::default()));
        try_join_all(pulls).await
    }

    /// Delete one message by its receipt.
    pub async fn delete(&self, receipt: &ReceiptId) -> Result<(), QueueError> {
        self.inner
            .transport
            .delete_message(&self.inner.config.queue_url, receipt)
            .await
    }

    /// Delete up to ten messages in one batched request.
    ///
    /// Entries are assigned positional ids "1" through "10". More than ten
    /// receipts is caller misuse and fails before any request is issued.
    pub async fn delete_batch(&self, receipts: &[ReceiptId]) -> Result<BatchResponse, QueueError> {
        if receipts.len() > MAX_BATCH_SIZE {
            return Err(QueueError::BatchTooLarge {
                size: receipts.len(),
                max_size: MAX_BATCH_SIZE,
            });
        }
        let entries = receipts
            .iter()
            .enumerate()
            .map(|(i, receipt)| DeleteBatchEntry {
                id: (i + 1).to_string(),
                receipt: receipt.clone(),
            })
            .collect();
        self.inner
            .transport
            .delete_message_batch(&self.inner.config.queue_url, entries)
            .await
    }

    /// Delete an arbitrarily long receipt list by splitting it into
    /// consecutive chunks of ten and deleting the chunks concurrently.
    ///
    /// All-or-nothing like [`multi_pull`](Self::multi_pull): one failing
    /// chunk fails the whole call, and chunks already deleted stay deleted.
    pub async fn delete_large_batch(
        &self,
        receipts: &[ReceiptId],
    ) -> Result<Vec<BatchResponse>, QueueError> {
        let chunks = receipts
            .chunks(MAX_BATCH_SIZE)
            .map(|chunk| self.delete_batch(chunk));
        try_join_all(chunks).await
    }

    /// Append `payload` to the pending buffer, flushing immediately once
    /// [`MAX_BATCH_SIZE`] messages are waiting.
    ///
    /// Only serialization errors are returned here. The triggered flush
    /// reports its outcome, success or failure, to the flush listener; a
    /// failed flush drops the drained batch.
    pub async fn queue_send<T: Serialize>(&self, payload: &T) -> Result<(), QueueError> {
        let value = serde_json::to_value(payload)?;
        let should_flush = {
            let mut buffer = self.inner.buffer.lock().expect("buffer lock poisoned");
            buffer.push_back(value);
            buffer.len() >= MAX_BATCH_SIZE
        };
        if should_flush {
            ClientInner::flush(&self.inner).await;
        }
        Ok(())
    }

    /// Start the periodic flush timer. No-op if it is already running.
    pub fn start_queue(&self) {
        ClientInner::start(&self.inner);
    }

    /// Cancel the flush timer. Idempotent; in-flight flushes are unaffected.
    pub fn stop_queue(&self) {
        self.inner.stop();
    }

    /// Reset the flush countdown. Only has effect while the timer is
    /// running, so a stopped client stays stopped.
    pub fn restart_queue(&self) {
        ClientInner::restart(&self.inner);
    }

    /// Register the flush observer, replacing any previously registered one.
    ///
    /// The observer is invoked exactly once per flush attempt and never for
    /// ticks that find the buffer empty.
    pub fn set_flush_listener<F>(&self, listener: F)
    where
        F: Fn(Result<FlushOutcome, QueueError>) + Send + Sync + 'static,
    {
        let mut slot = self.inner.listener.lock().expect("listener lock poisoned");
        *slot = Some(Arc::new(listener));
    }

    /// Number of messages waiting in the buffer.
    pub fn pending(&self) -> usize {
        self.inner.buffer.lock().expect("buffer lock poisoned").len()
    }

    /// Connection parameters this client was built with.
    pub fn config(&self) -> &SqsConfig {
        &self.inner.config
    }

    #[cfg(test)]
    pub(crate) fn shares_state_with(&self, other: &QueueClient) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl ClientInner {
    fn start(inner: &Arc<Self>) {
        let mut timer = inner.timer.lock().expect("timer lock poisoned");
        if timer.is_none() {
            *timer = Some(Self::spawn_timer(inner));
        }
    }

    fn stop(&self) {
        if let Some(handle) = self.timer.lock().expect("timer lock poisoned").take() {
            handle.abort();
        }
    }

    fn restart(inner: &Arc<Self>) {
        let mut timer = inner.timer.lock().expect("timer lock poisoned");
        if let Some(handle) = timer.take() {
            handle.abort();
            *timer = Some(Self::spawn_timer(inner));
        }
    }

    /// Spawn the countdown task. Each tick runs the flush in its own task so
    /// a slow request never delays the next tick; the task holds only a weak
    /// handle so an abandoned client shuts its timer down.
    fn spawn_timer(inner: &Arc<Self>) -> JoinHandle<()> {
        let interval = inner.flush_interval;
        let weak = Arc::downgrade(inner);
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                let Some(inner) = weak.upgrade() else {
                    break;
                };
                tokio::spawn(async move { ClientInner::flush(&inner).await });
            }
        })
    }

    /// Drain up to [`MAX_BATCH_SIZE`] buffered messages and submit them as
    /// one batched send.
    ///
    /// The countdown is reset before the request is issued so flush cadence
    /// does not drift with network latency. Drained messages are not
    /// re-buffered on failure.
    async fn flush(inner: &Arc<Self>) {
        let batch: Vec<Value> = {
            let mut buffer = inner.buffer.lock().expect("buffer lock poisoned");
            if buffer.is_empty() {
                return;
            }
            let take = buffer.len().min(MAX_BATCH_SIZE);
            buffer.drain(..take).collect()
        };

        let entries = batch
            .iter()
            .enumerate()
            .map(|(i, payload)| SendBatchEntry {
                id: (i + 1).to_string(),
                body: payload.to_string(),
            })
            .collect();

        Self::restart(inner);

        match inner
            .transport
            .send_message_batch(&inner.config.queue_url, entries)
            .await
        {
            Ok(response) => {
                debug!(
                    queue_url = %inner.config.queue_url,
                    count = batch.len(),
                    "flushed message buffer"
                );
                inner.notify(Ok(FlushOutcome {
                    response,
                    messages: batch,
                }));
            }
            Err(err) => {
                warn!(
                    queue_url = %inner.config.queue_url,
                    dropped = batch.len(),
                    error = %err,
                    "buffer flush failed, batch dropped"
                );
                inner.notify(Err(err));
            }
        }
    }

    fn notify(&self, outcome: Result<FlushOutcome, QueueError>) {
        let listener = self
            .listener
            .lock()
            .expect("listener lock poisoned")
            .clone();
        if let Some(listener) = listener {
            listener(outcome);
        }
    }
}
