//! Shared test doubles for the `queue-provider` system tests.

mod error;
mod fake_blob;
mod fake_queue;

pub use error::FakeError;
pub use fake_blob::FakeBlobStorageProvider;
pub use fake_queue::FakeQueueService;

use serde::{Deserialize, Serialize};

/// A small payload type used across the system tests, deliberately carrying
/// value semantics so that two separately constructed instances with the
/// same field values collide in the checkout table, the way the queue
/// provider's key-by-serialized-bytes strategy intends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub payload: String,
}

impl Order {
    pub fn new(id: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            payload: payload.into(),
        }
    }
}
