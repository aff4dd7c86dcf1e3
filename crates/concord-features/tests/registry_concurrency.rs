//! Concurrency tests for the feature registry.
//!
//! Writers swap between two internally-consistent sets while readers check
//! every snapshot they observe. A torn read would show a mix of the two.

use std::sync::Arc;

use concord_features::{is_compatible, FeatureRegistry, FeatureVersion};
use concord_protocol::{CapabilitySet, Version};
use concord_transport::ConnectionId;

fn uniform(major: u32) -> CapabilitySet {
    ["translations", "icons", "links", "fonts"]
        .into_iter()
        .map(|name| (name, Version::new(major, 0, 0)))
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_readers_never_observe_partial_sets() {
    let registry = Arc::new(FeatureRegistry::new());
    let conn = ConnectionId::new(1);
    registry.attach(conn, uniform(1));

    let mut tasks = Vec::new();

    for w in 0..2u32 {
        let registry = Arc::clone(&registry);
        tasks.push(tokio::spawn(async move {
            for i in 0..500u32 {
                registry.attach(conn, uniform(1 + (i + w) % 2));
                tokio::task::yield_now().await;
            }
        }));
    }

    for _ in 0..4 {
        let registry = Arc::clone(&registry);
        tasks.push(tokio::spawn(async move {
            for _ in 0..1000 {
                let snapshot = registry.get(conn);
                let majors: Vec<u32> =
                    snapshot.iter().map(|(_, v)| v.major).collect();
                assert_eq!(majors.len(), 4);
                assert!(
                    majors.iter().all(|m| *m == majors[0]),
                    "torn read: {snapshot}"
                );
                tokio::task::yield_now().await;
            }
        }));
    }

    for task in tasks {
        task.await.expect("task should not panic");
    }
}

#[tokio::test]
async fn test_lookup_before_announcement_is_absent_not_pending() {
    let registry = Arc::new(FeatureRegistry::new());
    let conn = ConnectionId::new(7);

    // The messaging path runs before the client's payload has arrived.
    let early = registry.get(conn);
    assert!(!is_compatible(&FeatureVersion::TRANSLATIONS, &early));

    // The announcement lands afterwards; later lookups see it.
    let writer = {
        let registry = Arc::clone(&registry);
        tokio::spawn(async move {
            registry.attach(
                conn,
                [("translations", Version::new(1, 0, 3))].into_iter().collect(),
            );
        })
    };
    writer.await.unwrap();

    let late = registry.get(conn);
    assert!(is_compatible(&FeatureVersion::TRANSLATIONS, &late));
    // The early snapshot was never upgraded in place.
    assert!(early.is_empty());
}

#[test]
fn test_many_connections_attach_and_detach_from_threads() {
    let registry = FeatureRegistry::new();

    std::thread::scope(|s| {
        for t in 0..8u64 {
            let registry = &registry;
            s.spawn(move || {
                for i in 0..100u64 {
                    let conn = ConnectionId::new(t * 1000 + i);
                    registry.attach(conn, uniform(1));
                    if i % 2 == 0 {
                        registry.detach(conn);
                    }
                }
            });
        }
    });

    assert_eq!(registry.len(), 8 * 50);
}
