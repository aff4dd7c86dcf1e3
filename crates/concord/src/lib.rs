//! # Concord
//!
//! Capability-aware message delivery for a game-chat bridge.
//!
//! Clients that ship Concord's message resources announce it once per
//! connection. Concord remembers what each connection announced and, for
//! every outgoing message, decides whether the client can translate it
//! itself or whether the server must send finished text. User-authored
//! text sent as finished text goes through a formatting pipeline that
//! understands color directives and veils links.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use concord::prelude::*;
//!
//! # async fn run() -> Result<(), ConcordError> {
//! let config = ConcordConfig::default();
//! init_logging(&config.logging)?;
//!
//! let (transport, connector) = ChannelTransport::new();
//! let server = ConcordServer::builder().config(config).build();
//! let messenger = server.messenger();
//! tokio::spawn(server.run(transport));
//!
//! // The game's network layer opens a connection per player and forwards
//! // the payloads that arrive on `FEATURES_CHANNEL`. Any `Transport`
//! // implementation can stand in for the channel transport here.
//! let player = connector.connect()?;
//! let resolved = messenger.resolve(
//!     &messages::PLAYER_JOIN,
//!     vec!["Alex".into()],
//!     &RenderContext::player(player.id()),
//! );
//! # let _ = resolved;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod handler;
mod logging;
mod messenger;
mod server;

pub use config::{load_config, ConcordConfig, LoggingConfig};
pub use error::{ConcordError, ConfigError};
pub use logging::init_logging;
pub use messenger::{ConnectionDelivery, Delivery, Messenger};
pub use server::{ConcordServer, ConcordServerBuilder};

/// Everything needed to embed Concord.
pub mod prelude {
    pub use crate::{
        init_logging, load_config, ConcordConfig, ConcordError, ConcordServer, ConfigError,
        ConnectionDelivery, Delivery, LoggingConfig, Messenger,
    };
    pub use concord_features::{is_compatible, FeatureRegistry, FeatureVersion};
    pub use concord_message::{
        messages, Argument, CommandSource, Eagerness, Entity, MessageSettings, Notification,
        NotifySettings, RenderContext, ResolvedMessage, Translation, Translator, ICONS_FONT,
    };
    pub use concord_protocol::{
        CapabilitySet, Codec, JsonCodec, ProtocolError, Version, FEATURES_CHANNEL,
    };
    pub use concord_text::{
        format, Component, FormattingPolicy, FormattingSettings, Segment, Style, StyledText,
    };
    pub use concord_transport::{
        ChannelConnection, ChannelTransport, Connection, ConnectionId, Connector, ShutdownHandle,
        Transport, TransportError,
    };
}
