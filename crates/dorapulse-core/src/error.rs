//! Error types for the dorapulse exporter.

use thiserror::Error;

/// Result type alias for exporter operations.
pub type ExporterResult<T> = Result<T, ExporterError>;

/// Errors that can occur while configuring or refreshing metrics.
///
/// Only `Configuration` is fatal, and only at startup. `Provider` and
/// `Computation` are contained within a single refresh tick: the error
/// is logged, the previous snapshot is retained, and the next tick
/// retries.
#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("provider error: {0}")]
    Provider(String),

    #[error("computation error: {0}")]
    Computation(String),
}
