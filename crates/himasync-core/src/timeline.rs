//! Expected capture timestamps for a look-back window.
//!
//! The satellite product is published on a fixed grid (every 10 minutes,
//! starting at the full hour). A window `[start, end]` enumerates every grid
//! point, both ends inclusive, paired with the image key it is archived under.

use anyhow::Result;
use chrono::{DateTime, TimeDelta, Timelike, Utc};

use crate::url_model::ImageKey;

/// One expected capture: when it was taken and the file it is stored in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub at: DateTime<Utc>,
    pub key: ImageKey,
}

/// Closed time window walked at a fixed cadence.
#[derive(Debug, Clone)]
pub struct CaptureWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    cadence: TimeDelta,
}

/// Zero seconds and sub-seconds.
pub fn whole_minute(dt: &DateTime<Utc>) -> DateTime<Utc> {
    *dt - TimeDelta::seconds(dt.second() as i64) - TimeDelta::nanoseconds(dt.nanosecond() as i64)
}

/// Zero minutes, seconds and sub-seconds.
pub fn full_hour(dt: &DateTime<Utc>) -> DateTime<Utc> {
    whole_minute(dt) - TimeDelta::minutes(dt.minute() as i64)
}

impl CaptureWindow {
    /// Both bounds are truncated to whole minutes. The cadence must be positive.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, cadence: TimeDelta) -> Result<Self> {
        if cadence <= TimeDelta::zero() {
            anyhow::bail!("capture cadence must be positive, got {}", cadence);
        }
        Ok(Self {
            start: whole_minute(&start),
            end: whole_minute(&end),
            cadence,
        })
    }

    /// Window of `look_back_days` ending at the full hour of `now`.
    pub fn ending_at(now: DateTime<Utc>, look_back_days: u32, cadence_minutes: u32) -> Result<Self> {
        let end = full_hour(&now);
        let start = TimeDelta::try_days(i64::from(look_back_days))
            .and_then(|span| end.checked_sub_signed(span))
            .ok_or_else(|| {
                anyhow::anyhow!("look-back of {} days reaches before the earliest representable date", look_back_days)
            })?;
        Self::new(start, end, TimeDelta::minutes(i64::from(cadence_minutes)))
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Number of captures in the window.
    pub fn len(&self) -> usize {
        if self.start > self.end {
            return 0;
        }
        let span = (self.end - self.start).num_seconds();
        (span / self.cadence.num_seconds().max(1)) as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lazy, restartable sequence of captures in ascending time.
    pub fn captures(&self, extension: &str) -> Captures {
        Captures {
            next: self.start,
            end: self.end,
            cadence: self.cadence,
            extension: extension.to_string(),
        }
    }
}

/// Iterator over the captures of a [`CaptureWindow`]. Clone it to restart.
#[derive(Debug, Clone)]
pub struct Captures {
    next: DateTime<Utc>,
    end: DateTime<Utc>,
    cadence: TimeDelta,
    extension: String,
}

impl Iterator for Captures {
    type Item = Capture;

    fn next(&mut self) -> Option<Capture> {
        if self.next > self.end {
            return None;
        }
        let at = self.next;
        self.next = at + self.cadence;
        Some(Capture {
            key: ImageKey::from_timestamp(&at, &self.extension),
            at,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = if self.next > self.end {
            0
        } else {
            ((self.end - self.next).num_seconds() / self.cadence.num_seconds().max(1)) as usize + 1
        };
        (n, Some(n))
    }
}

impl ExactSizeIterator for Captures {}
