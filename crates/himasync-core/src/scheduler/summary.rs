use crate::downloader::FetchOutcome;

/// Counts of one sync run; only used for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Captures in the work list.
    pub planned: usize,
    pub completed: usize,
    pub abandoned: usize,
    /// GET attempts made across all captures.
    pub attempts: u64,
}

impl SyncSummary {
    pub fn record(&mut self, outcome: FetchOutcome) {
        if outcome.is_completed() {
            self.completed += 1;
        } else {
            self.abandoned += 1;
        }
        self.attempts += u64::from(outcome.attempts());
    }
}
