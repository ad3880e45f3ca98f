use super::FakeError;
use async_trait::async_trait;
use parking_lot::Mutex;
use queue_provider::{QueueService, RawMessage};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};
use uuid::Uuid;

struct StoredMessage {
    receipt: String,
    bytes: Vec<u8>,
    dequeue_count: u32,
    insertion_time: SystemTime,
    visible_at: Instant,
}

#[derive(Default)]
struct QueueState {
    exists: bool,
    messages: Vec<StoredMessage>,
}

/// An in-memory stand-in for a primitive queue service, modeled closely on
/// Azure Queue Storage: messages become invisible for a visibility timeout
/// once dequeued, and reappear with an incremented dequeue count if not
/// deleted by then.
///
/// Cheap to clone: every clone shares the same backing state, so a test can
/// keep one handle to inspect the fake directly (queue existence, message
/// counts) while handing another to a [`QueueProvider`](queue_provider::QueueProvider).
#[derive(Clone, Default)]
pub struct FakeQueueService {
    state: Arc<Mutex<HashMap<String, QueueState>>>,
}

impl FakeQueueService {
    /// Builds an empty fake with no queues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports whether `queue` currently exists (created, and not yet
    /// deleted).
    pub fn queue_exists(&self, queue: &str) -> bool {
        self.state
            .lock()
            .get(queue)
            .map(|state| state.exists)
            .unwrap_or(false)
    }

    /// Returns the total number of messages currently stored for `queue`
    /// (visible or not), or `0` if the queue does not exist.
    pub fn message_count(&self, queue: &str) -> usize {
        self.state
            .lock()
            .get(queue)
            .map(|state| state.messages.len())
            .unwrap_or(0)
    }

    /// Removes `queue` directly on the fake, without going through the
    /// `QueueService` trait, to simulate an out-of-band deletion a test
    /// wants to observe the provider reacting to.
    pub fn delete_queue_for_test(&self, queue: &str) {
        self.state.lock().remove(queue);
    }
}

#[async_trait]
impl QueueService for FakeQueueService {
    type Error = FakeError;

    async fn list_queues(&self, prefix: &str) -> Result<Vec<String>, Self::Error> {
        Ok(self
            .state
            .lock()
            .iter()
            .filter(|(name, state)| state.exists && name.starts_with(prefix))
            .map(|(name, _)| name.clone())
            .collect())
    }

    async fn get_messages(
        &self,
        queue: &str,
        count: usize,
        visibility_timeout: Duration,
    ) -> Result<Vec<RawMessage>, Self::Error> {
        let mut state = self.state.lock();
        let queue_state = state.get_mut(queue).filter(|q| q.exists).ok_or(FakeError::NotFound)?;

        let now = Instant::now();
        let mut taken = Vec::with_capacity(count);

        for message in queue_state.messages.iter_mut() {
            if taken.len() == count {
                break;
            }

            if message.visible_at > now {
                continue;
            }

            message.dequeue_count += 1;
            message.receipt = Uuid::new_v4().to_string();
            message.visible_at = now + visibility_timeout;

            taken.push(RawMessage {
                receipt: message.receipt.clone(),
                bytes: message.bytes.clone(),
                dequeue_count: message.dequeue_count,
                insertion_time: message.insertion_time,
            });
        }

        Ok(taken)
    }

    async fn add_message(&self, queue: &str, bytes: Vec<u8>) -> Result<(), Self::Error> {
        let mut state = self.state.lock();
        let queue_state = state.get_mut(queue).filter(|q| q.exists).ok_or(FakeError::NotFound)?;

        queue_state.messages.push(StoredMessage {
            receipt: Uuid::new_v4().to_string(),
            bytes,
            dequeue_count: 0,
            insertion_time: SystemTime::now(),
            visible_at: Instant::now(),
        });

        Ok(())
    }

    async fn delete_message(&self, queue: &str, receipt: &str) -> Result<(), Self::Error> {
        let mut state = self.state.lock();

        if let Some(queue_state) = state.get_mut(queue) {
            queue_state.messages.retain(|message| message.receipt != receipt);
        }

        Ok(())
    }

    async fn create_queue(&self, queue: &str) -> Result<(), Self::Error> {
        self.state.lock().entry(queue.to_string()).or_default().exists = true;

        Ok(())
    }

    async fn clear_queue(&self, queue: &str) -> Result<(), Self::Error> {
        let mut state = self.state.lock();
        let queue_state = state.get_mut(queue).filter(|q| q.exists).ok_or(FakeError::NotFound)?;

        queue_state.messages.clear();

        Ok(())
    }

    async fn delete_queue(&self, queue: &str) -> Result<(), Self::Error> {
        let mut state = self.state.lock();

        if state.remove(queue).is_some() {
            Ok(())
        } else {
            Err(FakeError::NotFound)
        }
    }

    async fn approximate_count(&self, queue: &str) -> Result<u64, Self::Error> {
        let state = self.state.lock();
        let queue_state = state.get(queue).filter(|q| q.exists).ok_or(FakeError::NotFound)?;

        Ok(queue_state.messages.len() as u64)
    }

    async fn approximate_latency(&self, queue: &str) -> Result<Option<Duration>, Self::Error> {
        let state = self.state.lock();
        let queue_state = state.get(queue).filter(|q| q.exists).ok_or(FakeError::NotFound)?;

        let now = Instant::now();

        Ok(queue_state
            .messages
            .iter()
            .filter(|message| message.visible_at <= now)
            .map(|message| {
                message
                    .insertion_time
                    .elapsed()
                    .unwrap_or(Duration::ZERO)
            })
            .max())
    }
}
