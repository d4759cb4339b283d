//! GitHub wire types and their mapping onto the domain model.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use dorapulse_core::{Commit, DeploymentRun, Outcome};

// ── Commits ────────────────────────────────────────────────────────

/// One element of the `/commits` listing.
#[derive(Debug, Deserialize)]
pub struct CommitPayload {
    pub sha: String,
    pub commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
pub struct CommitDetail {
    pub author: CommitAuthor,
}

#[derive(Debug, Deserialize)]
pub struct CommitAuthor {
    pub date: DateTime<Utc>,
}

impl From<CommitPayload> for Commit {
    fn from(payload: CommitPayload) -> Self {
        Commit {
            id: payload.sha,
            authored_at: payload.commit.author.date,
        }
    }
}

// ── Workflow runs ──────────────────────────────────────────────────

/// The `/actions/runs` listing envelope.
#[derive(Debug, Deserialize)]
pub struct RunsPage {
    pub workflow_runs: Vec<RunPayload>,
}

/// One workflow run as GitHub reports it.
#[derive(Debug, Deserialize)]
pub struct RunPayload {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Present on some API versions; `created_at` is the fallback.
    pub run_started_at: Option<DateTime<Utc>>,
    /// Terminal conclusion string; null while a run is in flight.
    pub conclusion: Option<String>,
}

impl RunPayload {
    /// Map onto a `DeploymentRun`, or `None` when the conclusion has no
    /// meaning for the metrics (unrecognized, or missing on a run that
    /// slipped past the `status=completed` filter).
    pub fn into_run(self) -> Option<DeploymentRun> {
        let outcome = match map_conclusion(self.conclusion.as_deref()) {
            Some(outcome) => outcome,
            None => {
                debug!(
                    run_id = self.id,
                    conclusion = self.conclusion.as_deref().unwrap_or("<none>"),
                    "skipping run with unrecognized conclusion"
                );
                return None;
            }
        };

        Some(DeploymentRun {
            id: self.id.to_string(),
            started_at: self.run_started_at.unwrap_or(self.created_at),
            completed_at: self.updated_at,
            outcome,
        })
    }
}

/// Map a workflow conclusion string onto the closed outcome enum.
pub fn map_conclusion(conclusion: Option<&str>) -> Option<Outcome> {
    match conclusion {
        Some("success") => Some(Outcome::Success),
        Some("failure") => Some(Outcome::Failure),
        _ => None,
    }
}

// ── Pagination ─────────────────────────────────────────────────────

/// Extract the `rel="next"` target from an RFC 5988 `Link` header.
pub fn parse_next_link(header: &str) -> Option<String> {
    for part in header.split(',') {
        let mut segments = part.split(';');
        let url = segments.next()?.trim();
        let is_next = segments.any(|s| s.trim() == "rel=\"next\"");
        if is_next {
            return Some(url.trim_start_matches('<').trim_end_matches('>').to_string());
        }
    }
    None
}
