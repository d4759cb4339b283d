//! Snapshot publication.
//!
//! The published snapshot is the only datum shared between the refresh
//! loop and the exposition server. Writers swap in a whole new `Arc`,
//! so a reader holds either the prior complete snapshot or the new one,
//! never a mix of fields from two ticks.

use std::sync::Arc;

use tokio::sync::RwLock;

use dorapulse_core::MetricsSnapshot;

/// Holds the current snapshot with atomic-replace semantics.
///
/// `Clone` + `Send` + `Sync`; clones share the same underlying slot.
#[derive(Clone)]
pub struct SnapshotStore {
    current: Arc<RwLock<Arc<MetricsSnapshot>>>,
}

impl SnapshotStore {
    /// Create a store seeded with `initial` (the zero-valued snapshot
    /// at startup).
    pub fn new(initial: MetricsSnapshot) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(initial))),
        }
    }

    /// Replace the published snapshot wholesale.
    pub async fn publish(&self, snapshot: MetricsSnapshot) {
        let mut slot = self.current.write().await;
        *slot = Arc::new(snapshot);
    }

    /// The current snapshot. Cheap: clones the `Arc`, not the data.
    pub async fn current(&self) -> Arc<MetricsSnapshot> {
        self.current.read().await.clone()
    }
}
