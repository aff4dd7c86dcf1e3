//! In-process transport built on Tokio channels.
//!
//! A [`Connector`] opens connections and a [`ChannelTransport`] accepts
//! them. Each connection is a pair of [`ChannelConnection`] halves joined
//! by two unbounded mpsc channels, one per direction. Both halves report
//! the same [`ConnectionId`], since they are two ends of one logical
//! connection.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{mpsc, Mutex as AsyncMutex, Notify};

use crate::{Connection, ConnectionId, Transport, TransportError};

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Latched shutdown flag that wakes every waiter once.
#[derive(Default)]
struct ShutdownSignal {
    triggered: AtomicBool,
    notify: Notify,
}

impl ShutdownSignal {
    fn trigger(&self) {
        self.triggered.store(true, Ordering::Release);
        self.notify.notify_waiters();
    }

    fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::Acquire)
    }

    /// Resolves once [`trigger`](Self::trigger) has run, including when it
    /// ran before this call.
    async fn wait(&self) {
        let notified = self.notify.notified();
        tokio::pin!(notified);
        // Register before reading the flag, so a trigger landing in
        // between still wakes us.
        notified.as_mut().enable();
        if self.is_triggered() {
            return;
        }
        notified.await;
    }
}

/// The accepting side of the in-process transport.
pub struct ChannelTransport {
    incoming: mpsc::UnboundedReceiver<ChannelConnection>,
    signal: Arc<ShutdownSignal>,
}

/// The connecting side of the in-process transport. Cheap to clone.
#[derive(Clone)]
pub struct Connector {
    sender: mpsc::UnboundedSender<ChannelConnection>,
    signal: Arc<ShutdownSignal>,
}

/// Shuts a [`ChannelTransport`] down from another task, even while it is
/// blocked in `accept`.
#[derive(Clone)]
pub struct ShutdownHandle {
    signal: Arc<ShutdownSignal>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.signal.trigger();
    }

    pub fn is_shutdown(&self) -> bool {
        self.signal.is_triggered()
    }
}

impl ChannelTransport {
    /// Creates a transport together with the connector that feeds it.
    pub fn new() -> (Self, Connector) {
        let (sender, incoming) = mpsc::unbounded_channel();
        let signal = Arc::new(ShutdownSignal::default());
        let connector = Connector {
            sender,
            signal: Arc::clone(&signal),
        };
        (Self { incoming, signal }, connector)
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            signal: Arc::clone(&self.signal),
        }
    }
}

impl Connector {
    /// Opens a new connection and returns the client half.
    ///
    /// The server half is queued on the transport and handed out by the
    /// next [`Transport::accept`].
    ///
    /// # Errors
    /// Returns [`TransportError::Shutdown`] once the transport is shut down
    /// or dropped.
    pub fn connect(&self) -> Result<ChannelConnection, TransportError> {
        if self.signal.is_triggered() {
            return Err(TransportError::Shutdown);
        }
        let id = ConnectionId::new(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed));
        let (client, server) = ChannelConnection::pair(id);
        self.sender
            .send(server)
            .map_err(|_| TransportError::Shutdown)?;
        tracing::debug!(%id, "opened in-process connection");
        Ok(client)
    }
}

impl Transport for ChannelTransport {
    type Connection = ChannelConnection;
    type Error = TransportError;

    async fn accept(&mut self) -> Result<Option<ChannelConnection>, TransportError> {
        tokio::select! {
            biased;
            () = self.signal.wait() => Ok(None),
            conn = self.incoming.recv() => Ok(conn),
        }
    }

    async fn shutdown(&self) -> Result<(), TransportError> {
        self.signal.trigger();
        Ok(())
    }
}

/// One half of an in-process connection.
pub struct ChannelConnection {
    id: ConnectionId,
    // `None` once this half has been closed.
    outbound: Mutex<Option<mpsc::UnboundedSender<Vec<u8>>>>,
    inbound: AsyncMutex<mpsc::UnboundedReceiver<Vec<u8>>>,
}

impl ChannelConnection {
    /// Creates both halves of a connection with the given id.
    pub fn pair(id: ConnectionId) -> (Self, Self) {
        let (a_tx, a_rx) = mpsc::unbounded_channel();
        let (b_tx, b_rx) = mpsc::unbounded_channel();
        let half = |outbound, inbound| Self {
            id,
            outbound: Mutex::new(Some(outbound)),
            inbound: AsyncMutex::new(inbound),
        };
        (half(a_tx, b_rx), half(b_tx, a_rx))
    }
}

impl Connection for ChannelConnection {
    type Error = TransportError;

    fn id(&self) -> ConnectionId {
        self.id
    }

    async fn recv(&self) -> Result<Option<Vec<u8>>, TransportError> {
        Ok(self.inbound.lock().await.recv().await)
    }

    async fn send(&self, frame: &[u8]) -> Result<(), TransportError> {
        let outbound = self.outbound.lock().unwrap_or_else(PoisonError::into_inner);
        let sender = outbound.as_ref().ok_or(TransportError::Closed(self.id))?;
        sender
            .send(frame.to_vec())
            .map_err(|_| TransportError::PeerGone(self.id))
    }

    async fn close(&self) -> Result<(), TransportError> {
        // Dropping our sender ends the peer's stream with `None`.
        self.outbound
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        Ok(())
    }
}
