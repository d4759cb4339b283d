//! Commit-to-deployment association.
//!
//! A commit is shipped by the *earliest* successful run (by completion
//! time) that completed at or after the commit was authored. Failed
//! runs never ship anything. A commit with no qualifying later success
//! has not shipped yet and contributes no sample.

use dorapulse_core::{Commit, DeploymentRun, LeadTimeSample, Outcome};

/// Sort runs ascending by `completed_at`, ties broken by the
/// lexicographically smaller id. This is the canonical processing
/// order for every engine pass.
pub fn sorted_by_completion(runs: &[DeploymentRun]) -> Vec<DeploymentRun> {
    let mut sorted = runs.to_vec();
    sorted.sort_by(|a, b| {
        a.completed_at
            .cmp(&b.completed_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    sorted
}

/// Pair each commit with the deployment that shipped it.
///
/// The search predicate (`completed_at >= authored_at`) guarantees every
/// sample duration is non-negative; commits authored after the last
/// success are silently excluded.
pub fn associate(commits: &[Commit], runs: &[DeploymentRun]) -> Vec<LeadTimeSample> {
    let successes: Vec<DeploymentRun> = sorted_by_completion(runs)
        .into_iter()
        .filter(|run| run.outcome == Outcome::Success)
        .collect();

    let mut samples = Vec::new();
    for commit in commits {
        let shipped_by = successes
            .iter()
            .find(|run| run.completed_at >= commit.authored_at);
        if let Some(run) = shipped_by {
            let seconds =
                (run.completed_at - commit.authored_at).num_milliseconds() as f64 / 1000.0;
            samples.push(LeadTimeSample {
                commit_id: commit.id.clone(),
                deployment_id: run.id.clone(),
                seconds,
            });
        }
    }
    samples
}
