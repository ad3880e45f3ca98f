use crate::error::BackendError;
use async_trait::async_trait;
use std::time::{Duration, SystemTime};

/// A message as returned by the underlying queue service, before any of this
/// crate's own interpretation (envelope peeling, poison-count checks,
/// overflow resolution) has been applied.
#[derive(Debug, Clone)]
pub struct RawMessage {
    /// Identifies this particular delivery of the message; handed back to
    /// the queue service to delete or otherwise act on the message.
    pub receipt: String,

    /// The raw bytes, exactly as read from the queue.
    pub bytes: Vec<u8>,

    /// The number of times the queue service has handed this message out
    /// without it being deleted, as tracked by the queue service itself.
    pub dequeue_count: u32,

    /// The time at which the message was originally inserted into the queue.
    pub insertion_time: SystemTime,
}

/// The primitive queue service this crate layers transactional semantics on
/// top of: short, size-limited messages with visibility-timeout-based
/// checkout, modeled closely on Azure Queue Storage.
///
/// Implementations are expected to be cheap to clone or already
/// reference-counted internally; the provider holds one behind an [`Arc`]
/// and calls into it concurrently.
///
/// [`Arc`]: std::sync::Arc
#[async_trait]
pub trait QueueService: Send + Sync {
    /// The error type produced by every method below.
    type Error: BackendError;

    /// Lists the names of queues whose name starts with `prefix`.
    async fn list_queues(&self, prefix: &str) -> Result<Vec<String>, Self::Error>;

    /// Retrieves up to `count` messages from `queue`, making each invisible
    /// to other consumers for `visibility_timeout`.
    async fn get_messages(
        &self,
        queue: &str,
        count: usize,
        visibility_timeout: Duration,
    ) -> Result<Vec<RawMessage>, Self::Error>;

    /// Adds a new message to `queue`.
    async fn add_message(&self, queue: &str, bytes: Vec<u8>) -> Result<(), Self::Error>;

    /// Deletes the message identified by `receipt` from `queue`.
    async fn delete_message(&self, queue: &str, receipt: &str) -> Result<(), Self::Error>;

    /// Creates `queue`, if it does not already exist.
    async fn create_queue(&self, queue: &str) -> Result<(), Self::Error>;

    /// Empties `queue` of all messages, without deleting the queue itself.
    async fn clear_queue(&self, queue: &str) -> Result<(), Self::Error>;

    /// Deletes `queue` entirely.
    async fn delete_queue(&self, queue: &str) -> Result<(), Self::Error>;

    /// Returns an approximate count of messages currently in `queue`.
    async fn approximate_count(&self, queue: &str) -> Result<u64, Self::Error>;

    /// Returns an approximate age of the oldest visible message in `queue`,
    /// or `None` if the queue is empty or the backend cannot report it.
    async fn approximate_latency(&self, queue: &str) -> Result<Option<Duration>, Self::Error>;
}
