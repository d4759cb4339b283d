//! Snapshot aggregation.
//!
//! Runs the windowing, association, and recovery passes over one
//! fetched data set and assembles the published `MetricsSnapshot`.

use chrono::{DateTime, Utc};
use dorapulse_core::{Commit, DeploymentRun, MetricsSnapshot, MetricsWindow};

use crate::{lead_time, recovery, window};

/// Compute a snapshot from one fetched data set.
///
/// Pure: `repo` and `computed_at` are stamped into the result but take
/// no part in the computation, so identical inputs produce identical
/// metrics.
pub fn compute(
    commits: &[Commit],
    runs: &[DeploymentRun],
    win: &MetricsWindow,
    repo: &str,
    computed_at: DateTime<Utc>,
) -> MetricsSnapshot {
    let windowed = window::filter_window(runs, win);
    let (success, failure) = window::count_by_outcome(&windowed);

    let samples = lead_time::associate(commits, &windowed);
    let intervals = recovery::recovery_intervals(&windowed);

    let lead_times: Vec<f64> = samples.iter().map(|s| s.seconds).collect();
    let recoveries: Vec<f64> = intervals.iter().map(|r| r.seconds).collect();

    MetricsSnapshot {
        repo: repo.to_string(),
        computed_at,
        successful_deployments: success,
        failed_deployments: failure,
        deployment_frequency_per_day: window::deployment_frequency(success + failure, win),
        lead_time_seconds: mean(&lead_times),
        change_failure_rate_pct: window::change_failure_rate(success, failure),
        mttr_seconds: mean(&recoveries),
        lead_time_samples: samples.len() as u64,
        recovery_intervals: intervals.len() as u64,
    }
}

/// Arithmetic mean; 0 for an empty set.
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use dorapulse_core::Outcome;

    const DAY_SECS: f64 = 86_400.0;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn commit(id: &str, authored: &str) -> Commit {
        Commit {
            id: id.to_string(),
            authored_at: ts(authored),
        }
    }

    fn run(id: &str, completed: &str, outcome: Outcome) -> DeploymentRun {
        DeploymentRun {
            id: id.to_string(),
            started_at: ts(completed),
            completed_at: ts(completed),
            outcome,
        }
    }

    fn ten_day_window() -> MetricsWindow {
        MetricsWindow {
            start: ts("2026-01-01T00:00:00Z"),
            end: ts("2026-01-11T00:00:00Z"),
        }
    }

    /// The reference scenario: five runs over a ten-day window.
    /// Frequency 0.5/day, failure rate 40%, MTTR two days.
    #[test]
    fn reference_scenario_ten_days() {
        let runs = vec![
            run("r1", "2026-01-02T00:00:00Z", Outcome::Success),
            run("r2", "2026-01-04T00:00:00Z", Outcome::Failure),
            run("r3", "2026-01-06T00:00:00Z", Outcome::Success),
            run("r4", "2026-01-08T00:00:00Z", Outcome::Failure),
            run("r5", "2026-01-10T00:00:00Z", Outcome::Success),
        ];

        let snap = compute(&[], &runs, &ten_day_window(), "acme/api", ts("2026-01-11T00:00:00Z"));

        assert_eq!(snap.deployments_total(), 5);
        assert_eq!(snap.deployment_frequency_per_day, 0.5);
        assert_eq!(snap.change_failure_rate_pct, 40.0);
        assert_eq!(snap.recovery_intervals, 2);
        assert_eq!(snap.mttr_seconds, 2.0 * DAY_SECS);
    }

    #[test]
    fn lead_time_skips_failed_run() {
        // Commit at day 0, Failure at day 1, Success at day 2.
        let commits = vec![commit("c1", "2026-01-01T00:00:00Z")];
        let runs = vec![
            run("r1", "2026-01-02T00:00:00Z", Outcome::Failure),
            run("r2", "2026-01-03T00:00:00Z", Outcome::Success),
        ];

        let snap = compute(
            &commits,
            &runs,
            &ten_day_window(),
            "acme/api",
            ts("2026-01-11T00:00:00Z"),
        );

        assert_eq!(snap.lead_time_samples, 1);
        assert_eq!(snap.lead_time_seconds, 2.0 * DAY_SECS);
    }

    #[test]
    fn empty_inputs_yield_zeroes_not_errors() {
        let snap = compute(&[], &[], &ten_day_window(), "acme/api", ts("2026-01-11T00:00:00Z"));

        assert_eq!(snap.deployment_frequency_per_day, 0.0);
        assert_eq!(snap.lead_time_seconds, 0.0);
        assert_eq!(snap.change_failure_rate_pct, 0.0);
        assert_eq!(snap.mttr_seconds, 0.0);
    }

    #[test]
    fn no_failures_means_zero_mttr_and_zero_failure_rate() {
        let runs = vec![
            run("r1", "2026-01-02T00:00:00Z", Outcome::Success),
            run("r2", "2026-01-05T00:00:00Z", Outcome::Success),
        ];

        let snap = compute(&[], &runs, &ten_day_window(), "acme/api", ts("2026-01-11T00:00:00Z"));

        assert_eq!(snap.mttr_seconds, 0.0);
        assert_eq!(snap.change_failure_rate_pct, 0.0);
        assert_eq!(snap.deployment_frequency_per_day, 0.2);
    }

    #[test]
    fn commit_after_every_deployment_does_not_contaminate() {
        let commits = vec![commit("c1", "2026-01-09T00:00:00Z")];
        let runs = vec![run("r1", "2026-01-05T00:00:00Z", Outcome::Success)];

        let snap = compute(
            &commits,
            &runs,
            &ten_day_window(),
            "acme/api",
            ts("2026-01-11T00:00:00Z"),
        );

        assert_eq!(snap.lead_time_samples, 0);
        assert_eq!(snap.lead_time_seconds, 0.0);
    }

    #[test]
    fn runs_outside_the_window_are_ignored() {
        let runs = vec![
            run("r1", "2025-12-20T00:00:00Z", Outcome::Failure),
            run("r2", "2026-01-05T00:00:00Z", Outcome::Success),
        ];

        let snap = compute(&[], &runs, &ten_day_window(), "acme/api", ts("2026-01-11T00:00:00Z"));

        assert_eq!(snap.deployments_total(), 1);
        assert_eq!(snap.failed_deployments, 0);
        // The out-of-window failure opens no incident.
        assert_eq!(snap.recovery_intervals, 0);
    }

    #[test]
    fn all_metrics_are_non_negative_and_rate_bounded() {
        let commits = vec![
            commit("c1", "2026-01-01T06:00:00Z"),
            commit("c2", "2026-01-07T18:00:00Z"),
        ];
        let runs = vec![
            run("r1", "2026-01-02T00:00:00Z", Outcome::Failure),
            run("r2", "2026-01-03T00:00:00Z", Outcome::Failure),
            run("r3", "2026-01-08T00:00:00Z", Outcome::Success),
        ];

        let snap = compute(
            &commits,
            &runs,
            &ten_day_window(),
            "acme/api",
            ts("2026-01-11T00:00:00Z"),
        );

        assert!(snap.deployment_frequency_per_day >= 0.0);
        assert!(snap.lead_time_seconds >= 0.0);
        assert!(snap.mttr_seconds >= 0.0);
        assert!((0.0..=100.0).contains(&snap.change_failure_rate_pct));
    }

    #[test]
    fn recomputation_is_idempotent() {
        let commits = vec![
            commit("c1", "2026-01-01T06:00:00Z"),
            commit("c2", "2026-01-04T12:00:00Z"),
        ];
        let runs = vec![
            run("r1", "2026-01-02T00:00:00Z", Outcome::Success),
            run("r2", "2026-01-04T00:00:00Z", Outcome::Failure),
            run("r3", "2026-01-06T00:00:00Z", Outcome::Success),
        ];
        let at = ts("2026-01-11T00:00:00Z");

        let first = compute(&commits, &runs, &ten_day_window(), "acme/api", at);
        let second = compute(&commits, &runs, &ten_day_window(), "acme/api", at);
        assert_eq!(first, second);
    }
}
