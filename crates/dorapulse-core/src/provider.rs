//! The contract between the metrics engine and its data source.

use async_trait::async_trait;

use crate::error::ExporterResult;
use crate::types::{Commit, DeploymentRun, MetricsWindow};

/// A source of delivery history for one repository.
///
/// Implementations fetch the commits and the *completed* deployment runs
/// whose timestamps fall inside the window. In-flight runs must not be
/// returned; every run carries a terminal [`Outcome`](crate::Outcome).
/// Returned ordering is unconstrained — the engine sorts what it needs.
///
/// Transport and auth failures surface as
/// [`ExporterError::Provider`](crate::ExporterError::Provider).
#[async_trait]
pub trait DeliveryProvider: Send + Sync {
    async fn fetch_commits(&self, window: &MetricsWindow) -> ExporterResult<Vec<Commit>>;

    async fn fetch_deployment_runs(
        &self,
        window: &MetricsWindow,
    ) -> ExporterResult<Vec<DeploymentRun>>;
}
