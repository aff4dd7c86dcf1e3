//! Configuration file loading and parsing.
//!
//! The configuration is a single JSON file. Every field has a default, so
//! an empty object `{}` is a valid configuration:
//!
//! ```json
//! {
//!   "messages": {
//!     "force_eager": false,
//!     "use_custom_font": true,
//!     "use_custom_formatting": false,
//!     "use_legacy_formatting": false,
//!     "veiled_links": true
//!   },
//!   "notify": { "bot_start": false, "player_join": true },
//!   "logging": { "level": "info" }
//! }
//! ```

use std::path::Path;

use concord_message::{MessageSettings, NotifySettings};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConcordConfig {
    /// How messages are resolved and how user text is formatted.
    pub messages: MessageSettings,
    /// Which game events are announced.
    pub notify: NotifySettings,
    pub logging: LoggingConfig,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes
    /// precedence when set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// The configured level.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if `level` is not a level name.
    pub fn level(&self) -> Result<tracing::Level, ConfigError> {
        self.level
            .parse()
            .map_err(|_| ConfigError::Validation {
                message: format!(
                    "invalid log level '{}'; must be one of: trace, debug, info, warn, error",
                    self.level
                ),
            })
    }
}

impl ConcordConfig {
    /// Validates values serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.logging.level()?;
        Ok(())
    }
}

/// Loads, parses and validates the configuration file at `path`.
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist
/// - The file cannot be read
/// - The JSON is malformed or has unknown fields
/// - A value is invalid
pub fn load_config(path: &Path) -> Result<ConcordConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: ConcordConfig = serde_json::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    config.validate()?;
    tracing::debug!(path = %path.display(), "configuration loaded");

    Ok(config)
}
