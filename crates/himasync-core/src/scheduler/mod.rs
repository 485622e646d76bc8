//! Work list runner.
//!
//! Drains the planned captures through a bounded pool of blocking workers
//! (curl is synchronous). Each capture touches only its own file, so workers
//! share nothing but the summary collected on join.

mod parallel;
mod summary;

pub use parallel::{run_bounded, run_fetches};
pub use summary::SyncSummary;
