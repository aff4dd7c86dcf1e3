//! Codec trait and implementations for outgoing structured messages.
//!
//! The capability payload has a fixed binary layout (see [`crate::encode`]).
//! Everything Concord *sends* is structured chat text, which the game
//! expects as JSON. The [`Codec`] trait keeps the delivery side
//! independent of that choice.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// `Send + Sync + 'static` so one codec can be shared by every connection
/// task for the lifetime of the server.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// This is the game's own format for chat components, so it is also what
/// a client expects to receive.
///
/// ## Example
///
/// ```rust
/// use concord_protocol::{Codec, JsonCodec};
///
/// let codec = JsonCodec;
/// let bytes = codec.encode(&vec!["a", "b"]).unwrap();
/// assert_eq!(bytes, br#"["a","b"]"#);
///
/// let back: Vec<String> = codec.decode(&bytes).unwrap();
/// assert_eq!(back, ["a", "b"]);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
