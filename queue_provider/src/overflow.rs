use uuid::Uuid;

/// Fixed container used for overflow blobs, across every queue and every
/// provider instance. Kept as a hard-coded constant, not a configuration
/// knob: a provider pointed at the wrong container would silently fail to
/// find its own overflow messages.
pub const OVERFLOW_CONTAINER: &str = "lokad-cloud-overflowing-messages";

/// Computes the byte threshold, below `max_message_size`, past which a
/// serialized message is routed through the overflow blob instead of being
/// put directly on the queue.
///
/// Leaves headroom for this crate's own [`MessageWrapper`](crate::wire::MessageWrapper)
/// and [`MessageEnvelope`](crate::wire::MessageEnvelope) framing, and for a
/// queue service's base64 or similar wire inflation.
pub(crate) fn message_size_threshold(max_message_size: usize) -> usize {
    max_message_size.saturating_sub(1) * 3 / 4
}

/// Composes an overflow blob name of the shape `{queue}/{uuid}`, so that
/// every overflow blob for a queue can be listed (and cleaned up on
/// `clear`/`delete_queue`) by prefix.
pub(crate) fn overflow_blob_name(queue: &str) -> String {
    format!("{}/{}", queue, Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn threshold_leaves_headroom_below_the_ceiling() {
        assert_eq!(message_size_threshold(65536), 49151);
    }

    #[test]
    fn blob_name_is_prefixed_with_the_queue_name() {
        let name = overflow_blob_name("orders");
        assert!(name.starts_with("orders/"));
    }
}
