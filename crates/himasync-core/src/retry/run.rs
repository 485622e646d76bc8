//! Retry loop: run a closure until success or the attempt ceiling.

use super::classify;
use super::error::AttemptError;
use super::policy::RetryPolicy;

/// Terminal state of a retry loop.
#[derive(Debug)]
pub enum RetryOutcome {
    Succeeded { attempts: u32 },
    /// `last_error` is `None` only when the ceiling allowed no attempt at all.
    Exhausted {
        attempts: u32,
        last_error: Option<AttemptError>,
    },
}

/// Runs `f` (given the 1-based attempt number) until it succeeds or the
/// policy allows no further attempt. Failed attempts are retried immediately.
pub fn run_with_retry<F>(policy: &RetryPolicy, mut f: F) -> RetryOutcome
where
    F: FnMut(u32) -> Result<(), AttemptError>,
{
    let mut failed = 0u32;
    let mut last_error = None;
    while policy.allows(failed) {
        let attempt = failed + 1;
        match f(attempt) {
            Ok(()) => return RetryOutcome::Succeeded { attempts: attempt },
            Err(e) => {
                tracing::debug!(attempt, kind = ?classify::classify(&e), error = %e, "attempt failed");
                failed = attempt;
                last_error = Some(e);
            }
        }
    }
    RetryOutcome::Exhausted {
        attempts: failed,
        last_error,
    }
}
