//! Failure/recovery pairing.
//!
//! Semantics are "time until restored to success": the first failure in
//! a streak opens the incident, the next success closes it. Later
//! consecutive failures before that success neither reopen nor extend
//! the incident, and a trailing open failure (recovery still pending)
//! is not measurable and contributes nothing.

use dorapulse_core::{DeploymentRun, Outcome, RecoveryInterval};

use crate::lead_time::sorted_by_completion;

/// Pair every failure streak with the success that closed it.
///
/// Single left-to-right scan over the runs in canonical completion
/// order; at most one failure is open at a time.
pub fn recovery_intervals(runs: &[DeploymentRun]) -> Vec<RecoveryInterval> {
    let mut intervals = Vec::new();
    let mut open_failure: Option<DeploymentRun> = None;

    for run in sorted_by_completion(runs) {
        match run.outcome {
            Outcome::Failure => {
                if open_failure.is_none() {
                    open_failure = Some(run);
                }
            }
            Outcome::Success => {
                if let Some(failure) = open_failure.take() {
                    let seconds = (run.completed_at - failure.completed_at).num_milliseconds()
                        as f64
                        / 1000.0;
                    intervals.push(RecoveryInterval {
                        failure_id: failure.id,
                        recovery_id: run.id,
                        seconds,
                    });
                }
            }
        }
    }

    intervals
}
