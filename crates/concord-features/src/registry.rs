//! The feature registry: what each connection has announced.
//!
//! # Concurrency note
//!
//! Two actors touch the registry. The connection-receive path writes once
//! per announcement; the messaging path reads on every outgoing message.
//! Sets are immutable and stored behind `Arc`, so a write swaps one `Arc`
//! for another under a short write lock and a read clones an `Arc` under a
//! short read lock. No lock is ever held across I/O or across an `.await`,
//! and a reader can only ever see a whole old set or a whole new one.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use concord_protocol::CapabilitySet;
use concord_transport::ConnectionId;

/// Maps live connections to the capability set they announced.
///
/// ## Lifecycle
///
/// ```text
/// connect ──→ (nothing attached: get() = empty)
///                  │
///             attach(set) ──→ attach(newer set)   (last writer wins)
///                  │                 │
///                  ▼                 ▼
///               detach() ←───────────┘            (connection closed)
/// ```
///
/// A connection that never announces simply stays absent. Nothing waits for
/// an announcement, so there is no timeout to expire.
#[derive(Debug, Default)]
pub struct FeatureRegistry {
    connections: RwLock<HashMap<ConnectionId, Arc<CapabilitySet>>>,
}

impl FeatureRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Associates `features` with a connection, replacing whatever was
    /// there before.
    pub fn attach(&self, conn_id: ConnectionId, features: CapabilitySet) {
        self.attach_shared(conn_id, Arc::new(features));
    }

    /// Like [`attach`](Self::attach), for a set that is already shared.
    pub fn attach_shared(&self, conn_id: ConnectionId, features: Arc<CapabilitySet>) {
        tracing::info!(%conn_id, features = %features, "capabilities attached");
        let previous = self
            .connections
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(conn_id, features);
        if previous.is_some() {
            tracing::debug!(%conn_id, "replaced earlier announcement");
        }
    }

    /// The capability set attached to a connection, or the shared empty
    /// set if it never announced (or has been detached).
    pub fn get(&self, conn_id: ConnectionId) -> Arc<CapabilitySet> {
        self.get_attached(conn_id)
            .unwrap_or_else(CapabilitySet::empty)
    }

    /// The capability set attached to a connection, if any.
    ///
    /// Unlike [`get`](Self::get) this tells "never announced" (`None`)
    /// apart from "announced an empty set" (`Some`).
    pub fn get_attached(&self, conn_id: ConnectionId) -> Option<Arc<CapabilitySet>> {
        self.connections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&conn_id)
            .cloned()
    }

    /// Forgets a connection. Calling this for an unknown connection, or
    /// twice for the same one, does nothing.
    ///
    /// Returns the set that was attached, if any.
    pub fn detach(&self, conn_id: ConnectionId) -> Option<Arc<CapabilitySet>> {
        let removed = self
            .connections
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&conn_id);
        if removed.is_some() {
            tracing::debug!(%conn_id, "capabilities detached");
        }
        removed
    }

    /// Number of connections with an attached set.
    pub fn len(&self) -> usize {
        self.connections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no connection has an attached set.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
