#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![cfg_attr(test, deny(warnings))]

/// Exposes an application configuration section for a [`QueueProvider`].
mod config;
pub use self::config::QueueProviderConfig;

/// Exposes the external backend contracts (queue service, blob storage
/// provider) this crate layers transactional semantics on top of.
mod backend;
pub use self::backend::{BlobStorageProvider, QueueService, RawMessage};

/// Exposes the error taxonomy shared between the backend contracts and the
/// queue provider itself.
mod error;
pub use self::error::{BackendError, ProviderError};

/// Exposes the pluggable (de)serialization contract used for payloads and
/// for this crate's own wire formats.
mod serializer;
#[cfg(feature = "json")]
pub use self::serializer::JsonSerializer;
pub use self::serializer::Serializer;

/// Exposes this crate's internal wire formats: the dequeue-count-carrying
/// envelope used across `abandon` cycles, and the overflow wrapper used to
/// reference an oversize payload stored in a blob.
mod wire;
pub use self::wire::{MessageEnvelope, MessageWrapper};

/// In-memory bookkeeping correlating a checked-out payload with its raw
/// queue delivery (or deliveries).
mod checkout;

/// Overflow blob naming and the message-size threshold that triggers it.
mod overflow;
pub use self::overflow::OVERFLOW_CONTAINER;

/// The poison (persisted message) store: record shape, summaries, and key
/// derivation.
mod poison;
pub use self::poison::{
    PersistedMessageRecord, PersistedMessageSummary, DEFAULT_POISON_STORE_NAME, PERSISTED_CONTAINER,
};

/// The two named retry policies backing every remote call this crate
/// issues.
mod retry;

/// Exposes the main entry point: [`QueueProvider`].
mod provider;
pub use self::provider::QueueProvider;
