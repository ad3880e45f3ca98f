use crate::wire::MessageWrapper;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::SystemTime;

/// One outstanding delivery of a checked-out message.
///
/// Held per-receipt rather than per-payload, because the same payload value
/// can legitimately be checked out more than once at a time (two identical
/// messages sitting on the same queue).
#[derive(Debug, Clone)]
pub(crate) struct CheckoutReceipt {
    pub(crate) queue_name: String,
    pub(crate) receipt: String,
    pub(crate) insertion_time: SystemTime,

    /// Set when this delivery originally arrived as an overflow wrapper,
    /// carrying the container/blob it was resolved from. `delete`/`abandon`/
    /// `persist` all need this to know whether an overflow blob is
    /// involved, without re-decoding anything.
    pub(crate) overflow: Option<MessageWrapper>,
}

#[derive(Debug, Default)]
struct CheckoutEntry {
    dequeue_count: u32,
    receipts: Vec<CheckoutReceipt>,
}

/// Correlates a user-visible payload with the raw queue delivery (or
/// deliveries) it was checked out from.
///
/// Keyed on the canonical serialized bytes of the payload rather than
/// requiring `T: Hash + Eq`, so that any serializable payload type works
/// without extra trait bounds. A single `parking_lot::Mutex` guards the whole
/// table; every operation on it is a short, synchronous map mutation, never
/// held across an `.await`.
pub(crate) struct CheckoutTable {
    entries: Mutex<HashMap<Vec<u8>, CheckoutEntry>>,
}

impl CheckoutTable {
    pub(crate) fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a newly checked-out delivery under `key`.
    pub(crate) fn check_out(&self, key: Vec<u8>, receipt: CheckoutReceipt, dequeue_count: u32) {
        let mut entries = self.entries.lock();

        entries
            .entry(key)
            .and_modify(|entry| {
                entry.dequeue_count = entry.dequeue_count.max(dequeue_count);
                entry.receipts.push(receipt.clone());
            })
            .or_insert_with(|| CheckoutEntry {
                dequeue_count,
                receipts: vec![receipt],
            });
    }

    /// Moves a checked-out entry from the key it was originally checked out
    /// under (the serialized overflow wrapper) to the key its resolved
    /// payload serializes to. A no-op if `old_key` is not currently checked
    /// out, or if `old_key == new_key`.
    pub(crate) fn relink(&self, old_key: &[u8], new_key: Vec<u8>) {
        if old_key == new_key.as_slice() {
            return;
        }

        let mut entries = self.entries.lock();

        if let Some(entry) = entries.remove(old_key) {
            entries
                .entry(new_key)
                .and_modify(|existing| {
                    existing.dequeue_count = existing.dequeue_count.max(entry.dequeue_count);
                    existing.receipts.extend(entry.receipts.clone());
                })
                .or_insert(entry);
        }
    }

    /// Checks in (removes) one outstanding delivery under `key`, returning
    /// its receipt and the entry's effective dequeue count. Returns `None` if
    /// `key` is not currently checked out.
    pub(crate) fn check_in(&self, key: &[u8]) -> Option<(CheckoutReceipt, u32)> {
        let mut entries = self.entries.lock();

        let mut drop_entry = false;

        let result = entries.get_mut(key).and_then(|entry| {
            let receipt = entry.receipts.pop()?;

            if entry.receipts.is_empty() {
                drop_entry = true;
            }

            Some((receipt, entry.dequeue_count))
        });

        if drop_entry {
            entries.remove(key);
        }

        result
    }

    /// Returns a snapshot of every key currently checked out, for use by
    /// shutdown draining.
    pub(crate) fn snapshot_keys(&self) -> Vec<Vec<u8>> {
        self.entries.lock().keys().cloned().collect()
    }
}
