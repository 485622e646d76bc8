//! Per-image downloader.
//!
//! Fetches one capture into `output_dir/<key>` with up to `max_retries`
//! GET attempts. Each attempt looks at the file on disk first: if one exists
//! the attempt asks for the remaining bytes (`Range: bytes=<len>-`) and
//! appends, otherwise it downloads from scratch. Bytes appended by a failed
//! attempt are kept, so attempts are cumulative. When the ceiling is reached
//! the file is deleted, so a planned image is either complete or absent.

mod attempt;

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::retry::{classify, run_with_retry, RetryOutcome, RetryPolicy};
use crate::storage;
use crate::timeline::Capture;

pub use attempt::{attempt_once, parse_status_line};

/// Retry ceiling and per-attempt timeout.
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    pub max_retries: u32,
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_retries: 10,
            timeout: Duration::from_secs(5),
        }
    }
}

/// Terminal state of one capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The file is complete.
    Completed { attempts: u32 },
    /// Attempts exhausted; any file at the target path was removed (best effort).
    Abandoned { attempts: u32 },
}

impl FetchOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, FetchOutcome::Completed { .. })
    }

    pub fn attempts(&self) -> u32 {
        match self {
            FetchOutcome::Completed { attempts } | FetchOutcome::Abandoned { attempts } => *attempts,
        }
    }
}

/// Target path of `capture` inside `output_dir`.
pub fn target_path(output_dir: &Path, capture: &Capture) -> PathBuf {
    output_dir.join(capture.key.as_str())
}

/// Downloads `url` into the target file of `capture`. Never returns an error:
/// failures end in `FetchOutcome::Abandoned`.
pub fn fetch_capture(
    capture: &Capture,
    url: &str,
    output_dir: &Path,
    opts: &FetchOptions,
) -> FetchOutcome {
    let target = target_path(output_dir, capture);
    let policy = RetryPolicy::new(opts.max_retries);

    let outcome = run_with_retry(&policy, |attempt| {
        tracing::trace!(key = %capture.key, attempt, "GET {}", url);
        attempt_once(url, &target, opts.timeout)
    });

    match outcome {
        RetryOutcome::Succeeded { attempts } => {
            tracing::info!(key = %capture.key, attempts, "image downloaded");
            FetchOutcome::Completed { attempts }
        }
        RetryOutcome::Exhausted {
            attempts,
            last_error,
        } => {
            let removed = storage::remove_best_effort(&target);
            match last_error {
                Some(e) => tracing::warn!(
                    key = %capture.key,
                    attempts,
                    kind = ?classify(&e),
                    error = %e,
                    removed,
                    "giving up on image"
                ),
                None => tracing::warn!(key = %capture.key, removed, "no attempts allowed, image skipped"),
            }
            FetchOutcome::Abandoned { attempts }
        }
    }
}
