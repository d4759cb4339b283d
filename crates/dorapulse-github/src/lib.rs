//! dorapulse-github — GitHub as a delivery-history provider.
//!
//! Fetches commits and completed workflow runs over the GitHub REST API
//! and maps them to the engine's domain types at the boundary:
//!
//! - commits: `GET /repos/{owner}/{repo}/commits` (windowed via
//!   `since`/`until`)
//! - deployment runs: `GET /repos/{owner}/{repo}/actions/runs` filtered
//!   to completed push-triggered runs
//!
//! Both endpoints are paginated; the client walks RFC 5988 `Link`
//! headers until the last page. Workflow conclusions are mapped to the
//! closed `Outcome` enum; runs with conclusions the engine has no
//! meaning for (`cancelled`, `skipped`, …) are dropped at this boundary
//! rather than leaking an open-ended string into the computation.

pub mod client;
pub mod model;

pub use client::GithubProvider;
