//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::ConfigError;

/// Installs a formatting subscriber writing to stderr.
///
/// `RUST_LOG`, when set, overrides the configured level. Does nothing if a
/// global subscriber is already installed.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] if the configured level is invalid.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ConfigError> {
    let level = config.level()?;
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
    if installed.is_err() {
        tracing::debug!("global subscriber already installed; keeping it");
    }
    Ok(())
}
