use queue_provider::BackendError;
use thiserror::Error;

/// The error type produced by [`FakeQueueService`](super::FakeQueueService)
/// and [`FakeBlobStorageProvider`](super::FakeBlobStorageProvider).
///
/// Deliberately minimal: a real backend would carry HTTP status codes and
/// the like, but the provider only ever looks at [`BackendError::is_not_found`]
/// and [`BackendError::is_transient`], so the fakes only need to be able to
/// produce those two shapes (plus a generic "something else went wrong" for
/// completeness).
#[derive(Debug, Error)]
pub enum FakeError {
    /// The targeted queue, or container, did not exist.
    #[error("not found")]
    NotFound,

    /// Simulates a transient server-side fault; retried by the provider's
    /// backoff policy.
    #[error("transient fault")]
    Transient,

    /// A fault outside the two classified shapes above.
    #[error("other fault: {0}")]
    Other(String),
}

impl BackendError for FakeError {
    fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    fn is_transient(&self) -> bool {
        matches!(self, Self::Transient)
    }
}
