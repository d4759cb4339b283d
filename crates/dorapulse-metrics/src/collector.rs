//! The refresh loop: fetch delivery history, recompute, publish.
//!
//! Stateless across ticks — every refresh re-derives the snapshot from
//! a fresh fetch. The fetch step is the only suspension point and is
//! bounded by the configured timeout; compute is pure and synchronous.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{error, info};

use dorapulse_core::{
    DeliveryProvider, ExporterConfig, ExporterError, ExporterResult, MetricsSnapshot,
    MetricsWindow,
};

use crate::publish::SnapshotStore;

/// Periodically recomputes the published metrics from the provider.
pub struct MetricsCollector {
    provider: Arc<dyn DeliveryProvider>,
    store: SnapshotStore,
    repo: String,
    window_days: u32,
    interval: Duration,
    fetch_timeout: Duration,
}

impl MetricsCollector {
    /// Wire a collector to its provider and snapshot store.
    pub fn new(
        provider: Arc<dyn DeliveryProvider>,
        store: SnapshotStore,
        config: &ExporterConfig,
    ) -> Self {
        Self {
            provider,
            store,
            repo: config.repo_slug(),
            window_days: config.window_days,
            interval: Duration::from_secs(config.refresh_interval_secs),
            fetch_timeout: Duration::from_secs(config.fetch_timeout_secs),
        }
    }

    /// One refresh tick: fetch, compute, publish.
    ///
    /// On any error the previous snapshot is left untouched and the
    /// error is returned for the caller to log; the next tick retries.
    pub async fn refresh(&self) -> ExporterResult<MetricsSnapshot> {
        let now = Utc::now();
        let window = MetricsWindow::ending_at(now, self.window_days);

        let fetch = async {
            let commits = self.provider.fetch_commits(&window).await?;
            let runs = self.provider.fetch_deployment_runs(&window).await?;
            Ok::<_, ExporterError>((commits, runs))
        };

        let (commits, runs) = tokio::time::timeout(self.fetch_timeout, fetch)
            .await
            .map_err(|_| {
                ExporterError::Provider(format!(
                    "fetch did not complete within {}s",
                    self.fetch_timeout.as_secs()
                ))
            })??;

        let snapshot = dorapulse_engine::compute(&commits, &runs, &window, &self.repo, now);
        self.store.publish(snapshot.clone()).await;
        Ok(snapshot)
    }

    /// Run the refresh loop until shutdown signal.
    ///
    /// Refreshes once immediately, then on every interval tick.
    pub async fn run(&self, mut shutdown: tokio::sync::watch::Receiver<bool>) {
        info!(
            repo = %self.repo,
            interval_secs = self.interval.as_secs(),
            window_days = self.window_days,
            "metrics collector started"
        );

        self.tick().await;

        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {
                    self.tick().await;
                }
                _ = shutdown.changed() => {
                    info!("metrics collector shutting down");
                    break;
                }
            }
        }
    }

    async fn tick(&self) {
        match self.refresh().await {
            Ok(snapshot) => {
                info!(
                    repo = %self.repo,
                    deployments = snapshot.deployments_total(),
                    frequency_per_day = snapshot.deployment_frequency_per_day,
                    failure_rate_pct = snapshot.change_failure_rate_pct,
                    "metrics refreshed"
                );
            }
            Err(e) => {
                error!(error = %e, "refresh failed; previous snapshot retained");
            }
        }
    }
}
