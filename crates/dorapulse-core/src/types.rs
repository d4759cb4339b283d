//! Domain types for the dorapulse metrics engine.
//!
//! These types carry the delivery history fetched from the provider
//! (commits and completed deployment runs) and the derived metrics
//! published for scraping. Everything is an immutable value; the engine
//! re-derives all state from a fresh fetch on every refresh tick.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Opaque commit identifier (a Git SHA for the GitHub provider).
pub type CommitId = String;

/// Opaque deployment-run identifier.
pub type RunId = String;

// ── Delivery history ───────────────────────────────────────────────

/// A single commit in the fetched window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Commit {
    pub id: CommitId,
    /// When the commit was authored.
    pub authored_at: DateTime<Utc>,
}

/// Terminal outcome of a deployment run.
///
/// The provider maps its loosely-typed conclusion representation into
/// this closed enum at the fetch boundary; there is no pending state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Failure,
}

/// One completed CI/deployment execution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeploymentRun {
    pub id: RunId,
    pub started_at: DateTime<Utc>,
    /// Completion time; all engine ordering is based on this field.
    pub completed_at: DateTime<Utc>,
    pub outcome: Outcome,
}

// ── Derived samples ────────────────────────────────────────────────

/// A commit paired with the deployment that shipped it.
///
/// Only constructible for non-negative durations: a deployment cannot
/// ship a commit authored after it completed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeadTimeSample {
    pub commit_id: CommitId,
    pub deployment_id: RunId,
    /// Elapsed seconds from authoring to deployment completion.
    pub seconds: f64,
}

/// The gap between a failed deployment and the success that restored it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecoveryInterval {
    pub failure_id: RunId,
    pub recovery_id: RunId,
    /// Elapsed seconds from failure completion to recovery completion.
    pub seconds: f64,
}

// ── Window ─────────────────────────────────────────────────────────

/// The lookback window metrics are computed over.
///
/// A rolling duration ending at the moment of the refresh tick; both
/// endpoints are inclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MetricsWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl MetricsWindow {
    /// Build a window of `days` days ending at `end`.
    pub fn ending_at(end: DateTime<Utc>, days: u32) -> Self {
        Self {
            start: end - TimeDelta::days(i64::from(days)),
            end,
        }
    }

    /// Whether `at` falls inside the window (endpoints inclusive).
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at <= self.end
    }

    /// Window length in (fractional) days. 0 for a degenerate window.
    pub fn days(&self) -> f64 {
        let seconds = (self.end - self.start).num_milliseconds() as f64 / 1000.0;
        (seconds / 86_400.0).max(0.0)
    }
}

// ── Snapshot ───────────────────────────────────────────────────────

/// The published bundle of delivery metrics.
///
/// Recomputed wholesale on every refresh tick and swapped into the
/// snapshot store atomically; readers never observe a mix of two ticks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsSnapshot {
    /// Repository this snapshot was computed for (`owner/name`).
    pub repo: String,
    /// When the snapshot was computed.
    pub computed_at: DateTime<Utc>,

    /// Deployments completed inside the window, by outcome.
    pub successful_deployments: u64,
    pub failed_deployments: u64,

    /// Deployments (success + failure) per window day.
    pub deployment_frequency_per_day: f64,
    /// Mean commit-to-deployment lead time, in seconds.
    pub lead_time_seconds: f64,
    /// Failed deployments as a percentage of all deployments, 0..=100.
    pub change_failure_rate_pct: f64,
    /// Mean failure-to-recovery gap, in seconds.
    pub mttr_seconds: f64,

    /// How many commits contributed a lead-time sample.
    pub lead_time_samples: u64,
    /// How many failure/recovery pairs were closed inside the window.
    pub recovery_intervals: u64,
}

impl MetricsSnapshot {
    /// The zero-valued snapshot served before the first successful refresh.
    pub fn empty(repo: &str, computed_at: DateTime<Utc>) -> Self {
        Self {
            repo: repo.to_string(),
            computed_at,
            successful_deployments: 0,
            failed_deployments: 0,
            deployment_frequency_per_day: 0.0,
            lead_time_seconds: 0.0,
            change_failure_rate_pct: 0.0,
            mttr_seconds: 0.0,
            lead_time_samples: 0,
            recovery_intervals: 0,
        }
    }

    /// Total deployments in the window regardless of outcome.
    pub fn deployments_total(&self) -> u64 {
        self.successful_deployments + self.failed_deployments
    }
}
