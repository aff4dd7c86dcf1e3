//! Per-connection handler: capability announcements until close.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! Every frame it receives is a capability payload. A valid payload
//! replaces whatever the connection announced before; a rejected one
//! leaves the connection attached with no capabilities. When the
//! connection goes away the registry entry goes with it.

use std::sync::Arc;

use concord_features::FeatureRegistry;
use concord_protocol::CapabilitySet;
use concord_transport::{Connection, ConnectionId};

/// Drop guard that detaches a connection's capabilities when the handler
/// exits, including by panic.
struct RegistryGuard {
    conn_id: ConnectionId,
    registry: Arc<FeatureRegistry>,
}

impl Drop for RegistryGuard {
    fn drop(&mut self) {
        self.registry.detach(self.conn_id);
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<C: Connection>(conn: C, registry: Arc<FeatureRegistry>) {
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");

    let _guard = RegistryGuard {
        conn_id,
        registry: Arc::clone(&registry),
    };

    loop {
        match conn.recv().await {
            Ok(Some(frame)) => accept_payload(&registry, conn_id, &frame),
            Ok(None) => {
                tracing::info!(%conn_id, "connection closed cleanly");
                break;
            }
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                break;
            }
        }
    }

    // _guard drops here and the connection is detached.
}

/// Decodes one capability payload and attaches the result.
fn accept_payload(registry: &FeatureRegistry, conn_id: ConnectionId, frame: &[u8]) {
    match concord_protocol::decode(frame) {
        Ok(features) => {
            tracing::debug!(%conn_id, features = features.len(), "capability payload received");
            registry.attach(conn_id, features);
        }
        Err(e) => {
            tracing::warn!(
                %conn_id,
                error = %e,
                "rejected capability payload; treating connection as having no capabilities"
            );
            registry.attach_shared(conn_id, CapabilitySet::empty());
        }
    }
}
