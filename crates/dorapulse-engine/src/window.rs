//! Deployment classification and windowing.
//!
//! Partitions fetched runs by outcome and by whether their completion
//! falls inside the lookback window, and derives the two rate metrics
//! (deployment frequency, change failure rate) from the counts.

use dorapulse_core::{DeploymentRun, MetricsWindow, Outcome};

/// Keep only the runs whose `completed_at` falls inside the window.
///
/// Both endpoints are inclusive.
pub fn filter_window(runs: &[DeploymentRun], window: &MetricsWindow) -> Vec<DeploymentRun> {
    runs.iter()
        .filter(|run| window.contains(run.completed_at))
        .cloned()
        .collect()
}

/// Count runs by outcome: `(success_count, failure_count)`.
pub fn count_by_outcome(runs: &[DeploymentRun]) -> (u64, u64) {
    let mut success = 0;
    let mut failure = 0;
    for run in runs {
        match run.outcome {
            Outcome::Success => success += 1,
            Outcome::Failure => failure += 1,
        }
    }
    (success, failure)
}

/// Deployments per window day. 0 for a degenerate (zero-length) window;
/// window length itself is validated at configuration time.
pub fn deployment_frequency(total: u64, window: &MetricsWindow) -> f64 {
    let days = window.days();
    if days <= 0.0 {
        return 0.0;
    }
    total as f64 / days
}

/// Failed deployments as a percentage of all deployments.
///
/// No deployments means no failure rate: the result is 0, not an error.
pub fn change_failure_rate(success: u64, failure: u64) -> f64 {
    let total = success + failure;
    if total == 0 {
        return 0.0;
    }
    failure as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
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

    #[test]
    fn filter_keeps_runs_on_both_endpoints() {
        let window = ten_day_window();
        let runs = vec![
            run("before", "2025-12-31T23:59:59Z", Outcome::Success),
            run("at-start", "2026-01-01T00:00:00Z", Outcome::Success),
            run("inside", "2026-01-05T12:00:00Z", Outcome::Failure),
            run("at-end", "2026-01-11T00:00:00Z", Outcome::Success),
            run("after", "2026-01-11T00:00:01Z", Outcome::Success),
        ];

        let kept = filter_window(&runs, &window);
        let ids: Vec<&str> = kept.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["at-start", "inside", "at-end"]);
    }

    #[test]
    fn count_by_outcome_partitions() {
        let runs = vec![
            run("a", "2026-01-02T00:00:00Z", Outcome::Success),
            run("b", "2026-01-03T00:00:00Z", Outcome::Failure),
            run("c", "2026-01-04T00:00:00Z", Outcome::Success),
        ];
        assert_eq!(count_by_outcome(&runs), (2, 1));
    }

    #[test]
    fn frequency_is_total_per_day() {
        let window = ten_day_window();
        assert_eq!(deployment_frequency(5, &window), 0.5);
    }

    #[test]
    fn frequency_of_empty_set_is_zero() {
        assert_eq!(deployment_frequency(0, &ten_day_window()), 0.0);
    }

    #[test]
    fn frequency_of_degenerate_window_is_zero() {
        let at = ts("2026-01-01T00:00:00Z");
        let window = MetricsWindow { start: at, end: at };
        assert_eq!(deployment_frequency(5, &window), 0.0);
    }

    #[test]
    fn failure_rate_is_a_percentage() {
        assert_eq!(change_failure_rate(3, 2), 40.0);
        assert_eq!(change_failure_rate(0, 4), 100.0);
        assert_eq!(change_failure_rate(4, 0), 0.0);
    }

    #[test]
    fn failure_rate_of_no_deployments_is_zero() {
        assert_eq!(change_failure_rate(0, 0), 0.0);
    }
}
