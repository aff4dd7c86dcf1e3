use crate::ConnectionId;

/// Failures of the in-process channel transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// This half was closed, so it cannot send any more.
    #[error("{0} is closed")]
    Closed(ConnectionId),

    /// The other half was dropped and the frame went nowhere.
    #[error("{0}: peer hung up")]
    PeerGone(ConnectionId),

    /// The accepting side is shut down or gone.
    #[error("transport is shut down")]
    Shutdown,
}
