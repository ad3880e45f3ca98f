use serde::{Deserialize, Serialize};

/// Internal wire format wrapping a message with the dequeue count it has
/// accumulated across prior `abandon` cycles.
///
/// A queue service's own redelivery counter resets every time a message is
/// re-put onto the queue, so abandoning a message loses the count unless it
/// is carried explicitly. Every message this crate puts back after taking it
/// off (via `abandon`, or via a `restore` of a persisted message) is wrapped
/// in one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEnvelope {
    dequeue_count: u32,
    raw_message: Vec<u8>,
}

impl MessageEnvelope {
    pub(crate) fn new(dequeue_count: u32, raw_message: Vec<u8>) -> Self {
        Self {
            dequeue_count,
            raw_message,
        }
    }

    pub(crate) fn dequeue_count(&self) -> u32 {
        self.dequeue_count
    }

    pub(crate) fn into_raw_message(self) -> Vec<u8> {
        self.raw_message
    }
}
