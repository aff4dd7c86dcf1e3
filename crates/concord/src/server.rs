//! `ConcordServer` builder and server loop.
//!
//! This is the entry point for embedding Concord. It ties the layers
//! together: transport → protocol → features → message.

use std::sync::Arc;

use concord_features::FeatureRegistry;
use concord_message::Translator;
use concord_transport::Transport;

use crate::config::ConcordConfig;
use crate::handler::handle_connection;
use crate::messenger::Messenger;
use crate::ConcordError;

/// Builder for configuring a Concord server.
///
/// # Example
///
/// ```rust
/// use concord::prelude::*;
///
/// let server = ConcordServer::builder()
///     .config(ConcordConfig::default())
///     .build();
/// let messenger = server.messenger();
/// # let _ = messenger;
/// ```
#[derive(Default)]
pub struct ConcordServerBuilder {
    config: ConcordConfig,
    registry: Option<Arc<FeatureRegistry>>,
}

impl ConcordServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn config(mut self, config: ConcordConfig) -> Self {
        self.config = config;
        self
    }

    /// Shares an existing registry instead of creating a new one.
    pub fn registry(mut self, registry: Arc<FeatureRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn build(self) -> ConcordServer {
        ConcordServer {
            config: self.config,
            registry: self.registry.unwrap_or_default(),
        }
    }
}

/// A Concord server.
///
/// Owns the feature registry. Call [`run()`](Self::run) to start accepting
/// connections, after taking a [`Messenger`] for the sending side.
pub struct ConcordServer {
    config: ConcordConfig,
    registry: Arc<FeatureRegistry>,
}

impl ConcordServer {
    /// Creates a new builder.
    pub fn builder() -> ConcordServerBuilder {
        ConcordServerBuilder::new()
    }

    pub fn config(&self) -> &ConcordConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<FeatureRegistry> {
        &self.registry
    }

    /// A messenger that resolves against this server's registry.
    pub fn messenger(&self) -> Messenger {
        let translator = Translator::new(Arc::clone(&self.registry), &self.config.messages);
        Messenger::new(translator, self.config.notify.clone())
    }

    /// Runs the server accept loop over any [`Transport`].
    ///
    /// Spawns a handler task for each accepted connection. Returns once the
    /// transport stops handing out connections. Accept errors are logged
    /// and the loop carries on.
    pub async fn run<T: Transport>(self, mut transport: T) -> Result<(), ConcordError> {
        tracing::info!(
            force_eager = self.config.messages.force_eager,
            "concord server running"
        );

        loop {
            match transport.accept().await {
                Ok(Some(conn)) => {
                    let registry = Arc::clone(&self.registry);
                    tokio::spawn(handle_connection(conn, registry));
                }
                Ok(None) => {
                    tracing::info!("transport closed; stopping server");
                    return Ok(());
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
