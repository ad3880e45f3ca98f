use std::error::Error as StdError;
use thiserror::Error;

/// Classifies a backend error along the two dimensions the queue provider's
/// retry policy and not-found handling care about.
///
/// Implemented by the `Error` associated type of
/// [`QueueService`](crate::QueueService) and
/// [`BlobStorageProvider`](crate::BlobStorageProvider). A fake backend used in
/// tests can implement this trivially; a real cloud backend would map its own
/// status codes onto these two predicates.
pub trait BackendError: StdError + Send + Sync + 'static {
    /// Reports whether this error means the targeted resource (a queue, a
    /// blob, a container) did not exist at the time of the call.
    fn is_not_found(&self) -> bool;

    /// Reports whether this error is a transient server-side fault (5xx,
    /// socket fault, timeout) that is safe to retry.
    fn is_transient(&self) -> bool;
}

/// The error type returned by [`QueueProvider`](crate::QueueProvider)
/// operations that cannot be resolved internally.
///
/// Several conditions from the error taxonomy this crate is built around are
/// deliberately **not** represented here, because they never reach the
/// caller as an error:
///
/// - a resource-not-found condition is translated into an empty result, a
///   logical no-op, or a lazy-create-and-retry, depending on the call site;
/// - a message that fails to deserialize, or that exceeds its poison
///   threshold, is diverted to the poison store and simply omitted from the
///   result of [`get`](crate::QueueProvider::get);
/// - a missing overflow blob causes the orphaned message to be silently
///   dropped, with a warning logged.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The queue service or the blob service reported a transient fault, and
    /// the configured retry policy exhausted its attempts.
    #[error("exhausted retries against a transient server fault: {0}")]
    TransientServerError(#[source] Box<dyn StdError + Send + Sync>),

    /// Serializing an outgoing payload, or deserializing one of this crate's
    /// own wire formats, failed.
    #[error("failed to serialize or deserialize a message: {0}")]
    SerializationError(#[source] Box<dyn StdError + Send + Sync>),

    /// The backend reported a fault outside of the classified taxonomy above;
    /// propagated verbatim.
    #[error("queue provider backend error: {0}")]
    Backend(#[source] Box<dyn StdError + Send + Sync>),
}

impl ProviderError {
    /// Classifies the given backend error and wraps it in the appropriate
    /// [`ProviderError`] variant.
    pub(crate) fn from_backend<E>(error: E) -> Self
    where
        E: BackendError,
    {
        if error.is_transient() {
            Self::TransientServerError(Box::new(error))
        } else {
            Self::Backend(Box::new(error))
        }
    }

    /// Wraps the given serialization-layer error.
    pub(crate) fn from_serde<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::SerializationError(Box::new(error))
    }
}
