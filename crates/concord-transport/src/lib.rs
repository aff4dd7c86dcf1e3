//! Where capability payloads come from.
//!
//! The game server owns its sockets. Concord needs two things from each
//! client connection: a [`ConnectionId`] that stays put while the
//! connection is open, and the frames the client sends on the
//! `concord:features` channel. An embedder plugs its own connection type
//! in by implementing [`Connection`], and [`Transport`] for whatever hands
//! new connections out.
//!
//! Every future these traits return is `Send`, so one handler task per
//! connection can run on a multi-threaded runtime whatever the concrete
//! connection type is.
//!
//! [`ChannelTransport`] is an in-process implementation over Tokio
//! channels. An embedder that already decodes the game's custom payload
//! packets can forward their bodies into it; tests use it to play the
//! client.

mod channel;
mod error;

pub use channel::{ChannelConnection, ChannelTransport, Connector, ShutdownHandle};
pub use error::TransportError;

use std::fmt;
use std::future::Future;

/// Names one client connection for as long as it is open.
///
/// Capability state is keyed by this. The embedder chooses the numbering;
/// an id must not be handed to a second connection while the first one it
/// named is still attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ConnectionId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "connection #{}", self.0)
    }
}

/// One client connection, seen from the server.
///
/// Inbound frames are capability payloads. Outbound frames are whatever
/// the delivery side encodes, usually chat component JSON.
pub trait Connection: Send + Sync + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    fn id(&self) -> ConnectionId;

    /// The next frame from the client, or `Ok(None)` once it has gone away.
    fn recv(&self) -> impl Future<Output = Result<Option<Vec<u8>>, Self::Error>> + Send;

    /// Sends one frame to the client.
    fn send(&self, frame: &[u8]) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Stops sending. The client sees the end of the stream after any
    /// frames already sent.
    fn close(&self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Hands out connections as clients arrive.
pub trait Transport: Send + Sync + 'static {
    type Connection: Connection;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Waits for the next connection. `Ok(None)` means none will follow,
    /// either because the transport was shut down or because nothing can
    /// open connections on it any more.
    fn accept(
        &mut self,
    ) -> impl Future<Output = Result<Option<Self::Connection>, Self::Error>> + Send;

    /// Stops accepting. A pending or later [`accept`](Self::accept) returns
    /// `Ok(None)`.
    fn shutdown(&self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
