//! The capability ("features") payload.
//!
//! ```text
//! ┌───────────────┬──────────────────────────────────────────────┐
//! │ VarInt count  │ count × (String name, String version)        │
//! └───────────────┴──────────────────────────────────────────────┘
//! ```
//!
//! `version` is `major[.minor[.patch]]`. Entry order carries no meaning.

use std::collections::HashMap;

use crate::wire::{self, Reader};
use crate::{CapabilitySet, ProtocolError, Version};

/// The custom-payload channel the announcement is sent on.
pub const FEATURES_CHANNEL: &str = "concord:features";

/// Longest string, in characters, the game protocol accepts by default.
pub const MAX_STRING_LENGTH: usize = 32767;

/// Smallest possible entry: two empty strings, one length byte each.
const MIN_ENTRY_LEN: usize = 2;

/// Encodes a capability set into payload bytes.
///
/// # Errors
/// Returns [`ProtocolError::StringTooLong`] if a feature name is longer
/// than [`MAX_STRING_LENGTH`] characters.
pub fn encode(set: &CapabilitySet) -> Result<Vec<u8>, ProtocolError> {
    let mut out = Vec::new();
    let count = u32::try_from(set.len()).map_err(|_| {
        ProtocolError::MalformedPayload("too many features to encode".into())
    })?;
    wire::write_varint(&mut out, count);
    for (name, version) in set.iter() {
        wire::write_string(&mut out, name, MAX_STRING_LENGTH)?;
        wire::write_string(&mut out, &version.to_string(), MAX_STRING_LENGTH)?;
    }
    Ok(out)
}

/// Decodes payload bytes into a capability set.
///
/// The whole buffer must be consumed. If a feature name repeats, the
/// later entry wins.
///
/// # Errors
/// Returns [`ProtocolError::MalformedPayload`] if the bytes are truncated,
/// carry trailing data, contain an invalid string, or contain a version
/// that is not `major[.minor[.patch]]`.
pub fn decode(bytes: &[u8]) -> Result<CapabilitySet, ProtocolError> {
    let mut reader = Reader::new(bytes);
    let count = reader.read_len()?;

    // Don't trust `count` for the allocation: a hostile client could claim
    // billions of entries in a five-byte payload.
    let mut features =
        HashMap::with_capacity(count.min(reader.remaining() / MIN_ENTRY_LEN));

    for _ in 0..count {
        let name = reader.read_string(MAX_STRING_LENGTH)?;
        let version: Version =
            reader.read_string(MAX_STRING_LENGTH)?.parse()?;
        if let Some(previous) = features.insert(name.to_owned(), version) {
            tracing::debug!(
                feature = name,
                %previous,
                %version,
                "duplicate feature in payload, keeping the later entry"
            );
        }
    }

    if reader.remaining() != 0 {
        return Err(ProtocolError::MalformedPayload(format!(
            "{} trailing bytes after {count} entries",
            reader.remaining()
        )));
    }

    Ok(CapabilitySet::new(features))
}
