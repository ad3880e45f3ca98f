mod blob;
mod queue;

pub use blob::BlobStorageProvider;
pub use queue::{QueueService, RawMessage};
