//! dorapulse-core — shared domain model for the dorapulse exporter.
//!
//! Defines the delivery-history types consumed by the metrics engine
//! (commits, deployment runs, outcomes), the derived sample types, the
//! published `MetricsSnapshot`, the lookback `MetricsWindow`, exporter
//! configuration, error kinds, and the `DeliveryProvider` contract that
//! data sources implement.
//!
//! All types are plain data: serializable, clonable, and free of I/O.

pub mod config;
pub mod error;
pub mod provider;
pub mod types;

pub use config::ExporterConfig;
pub use error::{ExporterError, ExporterResult};
pub use provider::DeliveryProvider;
pub use types::*;
