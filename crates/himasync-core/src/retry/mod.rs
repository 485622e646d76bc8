//! Attempt ceiling and error classification.
//!
//! Every failed GET (transport error, unexpected status, local write error)
//! counts as one attempt. Attempts repeat immediately until one succeeds or
//! the ceiling is reached; classification only feeds the logs.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::AttemptError;
pub use policy::{ErrorKind, RetryPolicy};
pub use run::{run_with_retry, RetryOutcome};
