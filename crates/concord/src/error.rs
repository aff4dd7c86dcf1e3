//! Unified error types for Concord.

use std::path::PathBuf;

use concord_protocol::ProtocolError;
use concord_transport::TransportError;

/// Problems loading or validating the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// The configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for [`ConcordConfig`](crate::ConcordConfig).
    #[error("failed to parse configuration file: {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The configuration parsed but holds an unusable value.
    #[error("invalid configuration: {message}")]
    Validation { message: String },
}

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant lets `?` convert sub-crate
/// errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum ConcordError {
    /// A transport-level error (connection, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (payload, encode, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
