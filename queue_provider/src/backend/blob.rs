use crate::error::BackendError;
use async_trait::async_trait;

/// The blob storage backend this crate uses for message overflow and for the
/// poison (persisted message) store.
///
/// Both uses treat a container as a flat namespace of named blobs; neither
/// depends on any blob-storage feature beyond put/get/delete/list.
#[async_trait]
pub trait BlobStorageProvider: Send + Sync {
    /// The error type produced by every method below.
    type Error: BackendError;

    /// Writes `bytes` under `name` in `container`, creating the container if
    /// it does not yet exist, overwriting any existing blob of the same
    /// name.
    async fn put(&self, container: &str, name: &str, bytes: Vec<u8>) -> Result<(), Self::Error>;

    /// Reads the blob named `name` in `container`, or `None` if it does not
    /// exist.
    async fn get(&self, container: &str, name: &str) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Deletes the blob named `name` in `container`.
    async fn delete(&self, container: &str, name: &str) -> Result<(), Self::Error>;

    /// Lists the names of blobs in `container` whose name starts with
    /// `prefix`.
    async fn list(&self, container: &str, prefix: &str) -> Result<Vec<String>, Self::Error>;
}
