//! Error of a single GET attempt.

use std::fmt;

/// Error returned by one download attempt (curl failure, HTTP status, or storage failure).
/// Used so we can classify and log the failure before the next attempt.
#[derive(Debug)]
pub enum AttemptError {
    /// Curl reported an error (timeout, connection reset, protocol error, ...).
    Curl(curl::Error),
    /// Response status was neither 200 nor 206.
    Http(u32),
    /// Writing the body to the target file failed (e.g. disk full, permission denied).
    Storage(std::io::Error),
}

impl fmt::Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptError::Curl(e) => write!(f, "{}", e),
            AttemptError::Http(code) => write!(f, "HTTP {}", code),
            AttemptError::Storage(e) => write!(f, "storage: {}", e),
        }
    }
}

impl std::error::Error for AttemptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AttemptError::Curl(e) => Some(e),
            AttemptError::Storage(e) => Some(e),
            AttemptError::Http(_) => None,
        }
    }
}
