//! dorapulse-metrics — refresh scheduling and exposition for the engine.
//!
//! Owns the three stateful pieces around the pure engine:
//!
//! ```text
//! MetricsCollector
//!   ├── run() → periodic refresh loop (fetch → compute → publish)
//!   └── refresh() → one tick, bounded by the fetch timeout
//!
//! SnapshotStore
//!   └── the single published snapshot, replaced wholesale per tick
//!
//! Prometheus exposition
//!   └── render_prometheus() → text/plain for /metrics
//! ```
//!
//! A failed tick is logged and abandoned; the previous snapshot keeps
//! being served until a later tick succeeds.

pub mod collector;
pub mod prometheus;
pub mod publish;

pub use collector::MetricsCollector;
pub use prometheus::render_prometheus;
pub use publish::SnapshotStore;
