//! Exporter configuration.
//!
//! Assembled by the daemon from CLI flags (with environment-variable
//! fallbacks) and validated once at startup. A failed validation is
//! fatal: the process must not start serving with undefined behavior.

use serde::{Deserialize, Serialize};

use crate::error::{ExporterError, ExporterResult};

/// Runtime configuration for the exporter daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Provider API token.
    pub token: String,
    /// Port the exposition server binds.
    pub port: u16,
    /// Seconds between refresh ticks.
    pub refresh_interval_secs: u64,
    /// Lookback window length in days.
    pub window_days: u32,
    /// Upper bound on the fetch step of a single tick, in seconds.
    pub fetch_timeout_secs: u64,
}

impl ExporterConfig {
    /// `owner/repo` slug used as the snapshot's repository label.
    pub fn repo_slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Validate required settings; called once before the daemon starts.
    pub fn validate(&self) -> ExporterResult<()> {
        if self.owner.trim().is_empty() {
            return Err(ExporterError::Configuration(
                "repository owner must not be empty".to_string(),
            ));
        }
        if self.repo.trim().is_empty() {
            return Err(ExporterError::Configuration(
                "repository name must not be empty".to_string(),
            ));
        }
        if self.token.trim().is_empty() {
            return Err(ExporterError::Configuration(
                "provider token must not be empty".to_string(),
            ));
        }
        if self.window_days == 0 {
            return Err(ExporterError::Configuration(
                "lookback window must be at least one day".to_string(),
            ));
        }
        if self.refresh_interval_secs == 0 {
            return Err(ExporterError::Configuration(
                "refresh interval must be at least one second".to_string(),
            ));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(ExporterError::Configuration(
                "fetch timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}
