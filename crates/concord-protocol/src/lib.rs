//! Wire protocol for Concord's capability negotiation.
//!
//! Shortly after the game handshake a client that ships Concord's
//! resources announces what it has: a map of feature names to versions.
//! This crate owns the data and its bytes:
//!
//! - **Types** ([`Version`], [`CapabilitySet`]): what a client can do.
//! - **Payload** ([`encode`], [`decode`]): the binary form sent on the
//!   [`FEATURES_CHANNEL`].
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how outgoing chat
//!   components are turned into bytes for delivery.
//! - **Errors** ([`ProtocolError`]).
//!
//! # Architecture
//!
//! ```text
//! Transport (frames) → Protocol (CapabilitySet) → Features (per-connection registry)
//! ```

mod capability;
mod codec;
mod error;
mod payload;
mod version;
mod wire;

pub use capability::CapabilitySet;
pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::{ProtocolError, VersionParseError};
pub use payload::{decode, encode, FEATURES_CHANNEL, MAX_STRING_LENGTH};
pub use version::Version;
