//! Error types for the protocol layer.
//!
//! A `ProtocolError` always means bytes or text coming from the outside
//! could not be understood. It never means a feature is missing: absence
//! is a normal state and is modelled as data, not as an error.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The capability payload could not be parsed: it was truncated,
    /// carried trailing bytes, had an invalid string, or a version
    /// string that is not `major[.minor[.patch]]`.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// A string is too long to be written to the wire.
    ///
    /// Raised by the encoder so it never produces bytes that the decoder
    /// on the other side would reject.
    #[error("string of {len} characters exceeds the wire limit of {max}")]
    StringTooLong { len: usize, max: usize },

    /// Serializing an outgoing value failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserializing an incoming value failed.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}

/// A version string is not 1–3 dot-separated non-negative integers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid version string {input:?}")]
pub struct VersionParseError {
    pub(crate) input: String,
}

impl VersionParseError {
    /// The text that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl From<VersionParseError> for ProtocolError {
    fn from(err: VersionParseError) -> Self {
        Self::MalformedPayload(err.to_string())
    }
}
