use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use uuid::Uuid;

/// Fixed container used for persisted (poisoned) messages, across every
/// store and every provider instance, mirroring [`OVERFLOW_CONTAINER`].
///
/// [`OVERFLOW_CONTAINER`]: crate::overflow::OVERFLOW_CONTAINER
pub const PERSISTED_CONTAINER: &str = "lokad-cloud-persisted-messages";

/// The poison store a message is persisted to when it exceeds its max
/// trial count without an explicit store name given.
pub const DEFAULT_POISON_STORE_NAME: &str = "failing-messages";

/// A message taken out of circulation and written to a persisted message
/// store, either automatically (poison quarantine) or explicitly (via
/// [`persist`](crate::QueueProvider::persist)).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedMessageRecord {
    pub(crate) queue_name: String,
    pub(crate) insertion_time: SystemTime,
    pub(crate) persistence_time: SystemTime,
    pub(crate) dequeue_count: u32,
    pub(crate) reason: String,
    pub(crate) data: Vec<u8>,
}

impl PersistedMessageRecord {
    /// The queue this message originated from.
    pub fn queue_name(&self) -> &str {
        &self.queue_name
    }

    /// When the message was originally put onto its queue.
    pub fn insertion_time(&self) -> SystemTime {
        self.insertion_time
    }

    /// When this record was written to the persisted message store.
    pub fn persistence_time(&self) -> SystemTime {
        self.persistence_time
    }

    /// The dequeue count the message had accumulated at the time it was
    /// persisted.
    pub fn dequeue_count(&self) -> u32 {
        self.dequeue_count
    }

    /// A human-readable explanation of why the message was persisted.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// The stored payload bytes. If the message had overflowed to a blob,
    /// these are the bytes of the overflow wrapper, not the original
    /// payload; the overflow blob itself is left untouched so the payload
    /// can still be read back.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// A summary of a persisted message, as returned by
/// [`get_persisted`](crate::QueueProvider::get_persisted).
#[derive(Debug, Clone)]
pub struct PersistedMessageSummary {
    key: String,
    record: PersistedMessageRecord,
    restorable: bool,
}

impl PersistedMessageSummary {
    pub(crate) fn new(key: String, record: PersistedMessageRecord, restorable: bool) -> Self {
        Self {
            key,
            record,
            restorable,
        }
    }

    /// The key this record is stored under, as returned by
    /// [`list_persisted`](crate::QueueProvider::list_persisted).
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The persisted record itself.
    pub fn record(&self) -> &PersistedMessageRecord {
        &self.record
    }

    /// Whether [`restore_persisted`](crate::QueueProvider::restore_persisted)
    /// would succeed in putting this message back onto its queue: `false`
    /// when the message had overflowed and its overflow blob has since been
    /// deleted.
    pub fn restorable(&self) -> bool {
        self.restorable
    }
}

/// Composes a persisted-record key of the shape `{store}/{uuid}`, so that
/// every record in a store can be listed by prefix.
pub(crate) fn persisted_record_key(store: &str) -> String {
    format!("{}/{}", store, Uuid::new_v4().simple())
}
