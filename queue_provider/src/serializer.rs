use std::error::Error as StdError;

/// Serializes outgoing payloads into bytes, and deserializes bytes back into
/// payloads.
///
/// A single implementation is expected to serve more than one type: the
/// provider's own wire formats ([`MessageEnvelope`](crate::wire::MessageEnvelope)
/// and [`MessageWrapper`](crate::wire::MessageWrapper)) ride on the same
/// serializer as the user's payload type, so that a queue only ever needs to
/// agree on one wire convention. [`JsonSerializer`] is written as a blanket
/// implementation for exactly this reason.
///
/// Unlike a transport-layer decoder, which only needs to go one way, the
/// poison-quarantine and overflow machinery in this crate depend on
/// round-tripping cleanly, so both directions are mandatory.
pub trait Serializer<T> {
    /// The error produced by either direction of this serializer.
    type Error: StdError + Send + Sync + 'static;

    /// Serializes the given value into its wire representation.
    fn serialize(&self, value: &T) -> Result<Vec<u8>, Self::Error>;

    /// Deserializes a value out of its wire representation.
    fn deserialize(&self, bytes: &[u8]) -> Result<T, Self::Error>;
}

/// A [`Serializer`] backed by [`serde_json`], usable for any type that
/// derives or implements `Serialize`/`DeserializeOwned`.
///
/// Because the `impl` block below is generic over `T` rather than carrying it
/// as a type parameter on the struct itself, one `JsonSerializer` serves the
/// user's payload type and this crate's own wire types at once.
#[cfg(feature = "json")]
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSerializer;

#[cfg(feature = "json")]
impl<T> Serializer<T> for JsonSerializer
where
    T: serde::Serialize + serde::de::DeserializeOwned,
{
    type Error = serde_json::Error;

    fn serialize(&self, value: &T) -> Result<Vec<u8>, Self::Error> {
        serde_json::to_vec(value)
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<T, Self::Error> {
        serde_json::from_slice(bytes)
    }
}
