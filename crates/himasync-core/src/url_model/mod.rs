//! Naming model for captures.
//!
//! Maps a capture timestamp to its local file name (`YYYYMMDDHHmm.jpg`, the
//! image key) and to its remote URL (`.../{prefix}YYYYMMDDHHMMSS.jpg`).

mod key;
mod source;

pub use key::{ImageKey, KeyParseError, KEY_FORMAT};
pub use source::{ImageSource, REMOTE_STAMP_FORMAT};
