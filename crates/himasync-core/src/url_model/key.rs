//! Local file names derived from capture timestamps.

use chrono::{DateTime, TimeZone, Utc};
use std::fmt;

/// `strftime` pattern of the key stem (minute precision).
pub const KEY_FORMAT: &str = "%Y%m%d%H%M";

const STEM_LEN: usize = 12;

/// Canonical basename of an archived image, e.g. `202401010010.jpg`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageKey(String);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("file name {0:?} does not end in .{1}")]
    Extension(String, String),
    #[error("file name {0:?} does not have a 12-digit timestamp stem")]
    Stem(String),
}

impl ImageKey {
    pub fn from_timestamp(at: &DateTime<Utc>, extension: &str) -> Self {
        ImageKey(format!("{}.{}", at.format(KEY_FORMAT), extension))
    }

    /// Parse a basename back into the capture time it names.
    pub fn parse(name: &str, extension: &str) -> Result<DateTime<Utc>, KeyParseError> {
        let stem = name
            .strip_suffix(extension)
            .and_then(|s| s.strip_suffix('.'))
            .ok_or_else(|| KeyParseError::Extension(name.to_string(), extension.to_string()))?;
        if stem.len() != STEM_LEN || !stem.bytes().all(|b| b.is_ascii_digit()) {
            return Err(KeyParseError::Stem(name.to_string()));
        }
        let field = |range: std::ops::Range<usize>| stem[range].parse::<u32>().unwrap_or(u32::MAX);
        Utc.with_ymd_and_hms(
            field(0..4) as i32,
            field(4..6),
            field(6..8),
            field(8..10),
            field(10..12),
            0,
        )
        .single()
        .ok_or_else(|| KeyParseError::Stem(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ImageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for ImageKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}
