//! dorapulse-engine — the DORA metric computation core.
//!
//! A pure function from one fetched data set to one `MetricsSnapshot`.
//! No I/O, no clock reads: the lookback window and the computation
//! timestamp are inputs, so recomputing over identical data yields
//! bit-identical results.
//!
//! # Pipeline
//!
//! ```text
//! compute()
//!   ├── window::filter_window()      runs completed inside the window
//!   ├── window::count_by_outcome()   → deployment frequency, failure rate
//!   ├── lead_time::associate()       commit → earliest later success
//!   └── recovery::recovery_intervals()
//!                                    failure streak → next success
//! ```
//!
//! Runs are always processed in ascending `completed_at` order, ties
//! broken by the lexicographically smaller run id, regardless of the
//! order the provider returned them in.

pub mod lead_time;
pub mod recovery;
pub mod snapshot;
pub mod window;

pub use snapshot::compute;
