//! dorapulse-api — HTTP surface for the exporter.
//!
//! Serves the scraping system and human inspection. Handlers only
//! *read* the published snapshot; nothing on this path ever triggers a
//! fetch.
//!
//! # Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/metrics` | Prometheus exposition |
//! | GET | `/api/v1/snapshot` | Current snapshot as JSON |
//! | GET | `/healthz` | Liveness probe |

pub mod handlers;

use axum::Router;
use axum::routing::get;
use dorapulse_metrics::SnapshotStore;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub snapshots: SnapshotStore,
}

/// Build the complete router (exposition + inspection + liveness).
pub fn build_router(snapshots: SnapshotStore) -> Router {
    let state = ApiState { snapshots };

    Router::new()
        .route("/metrics", get(handlers::prometheus_metrics))
        .route("/api/v1/snapshot", get(handlers::get_snapshot))
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
}
