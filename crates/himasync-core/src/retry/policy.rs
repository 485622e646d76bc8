/// High-level classification of an attempt failure, used for log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operation timed out (connect/read).
    Timeout,
    /// Server asked us to slow down (e.g. 429, 503).
    Throttled,
    /// Network-level failure (connection reset, DNS, short body, etc.).
    Connection,
    /// Server error status (5xx).
    Http5xx(u16),
    /// 416: the requested resume offset is at or past the end of the resource.
    RangeNotSatisfiable,
    /// Writing to the target file failed.
    Storage,
    /// Any other error.
    Other,
}

/// Attempt ceiling. Every error kind is retried; there is no backoff.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first). 0 disables fetching.
    pub max_attempts: u32,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Whether another attempt may start after `failed` failed attempts.
    pub fn allows(&self, failed: u32) -> bool {
        failed < self.max_attempts
    }
}
