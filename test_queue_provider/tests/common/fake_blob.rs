use super::FakeError;
use async_trait::async_trait;
use parking_lot::Mutex;
use queue_provider::BlobStorageProvider;
use std::collections::HashMap;
use std::sync::Arc;

/// An in-memory stand-in for a blob storage provider: a flat namespace of
/// `(container, name) -> bytes`, with no simulated faults of its own (the
/// queue provider's retry policy is exercised against
/// [`FakeQueueService`](super::FakeQueueService) instead).
///
/// Cheap to clone: every clone shares the same backing state.
#[derive(Clone, Default)]
pub struct FakeBlobStorageProvider {
    state: Arc<Mutex<HashMap<(String, String), Vec<u8>>>>,
}

impl FakeBlobStorageProvider {
    /// Builds an empty fake with no blobs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the names of every blob in `container` whose name starts
    /// with `prefix`, for test assertions that want to look past the
    /// provider's own API (e.g. confirming an overflow blob was written).
    pub fn list_sync(&self, container: &str, prefix: &str) -> Vec<String> {
        self.state
            .lock()
            .keys()
            .filter(|(c, name)| c == container && name.starts_with(prefix))
            .map(|(_, name)| name.clone())
            .collect()
    }
}

#[async_trait]
impl BlobStorageProvider for FakeBlobStorageProvider {
    type Error = FakeError;

    async fn put(&self, container: &str, name: &str, bytes: Vec<u8>) -> Result<(), Self::Error> {
        self.state
            .lock()
            .insert((container.to_string(), name.to_string()), bytes);

        Ok(())
    }

    async fn get(&self, container: &str, name: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(self
            .state
            .lock()
            .get(&(container.to_string(), name.to_string()))
            .cloned())
    }

    async fn delete(&self, container: &str, name: &str) -> Result<(), Self::Error> {
        self.state.lock().remove(&(container.to_string(), name.to_string()));

        Ok(())
    }

    async fn list(&self, container: &str, prefix: &str) -> Result<Vec<String>, Self::Error> {
        Ok(self.list_sync(container, prefix))
    }
}
