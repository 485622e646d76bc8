//! Disk I/O and file lifecycle for archived images.
//!
//! Images are written in place under their final name. A fresh download
//! truncates the file; a resumed download appends to it. Files of abandoned
//! downloads are removed on a best-effort basis.

mod writer;

pub use writer::{TargetFile, WriteMode};

use std::fs;
use std::io;
use std::path::Path;

/// Length of the regular file at `path`, or `None` if there is none.
pub fn existing_len(path: &Path) -> Option<u64> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Some(meta.len()),
        _ => None,
    }
}

/// Delete `path` if it is a regular file. Failures are logged, never returned.
/// Returns true if nothing is left at `path` afterwards.
pub fn remove_best_effort(path: &Path) -> bool {
    if existing_len(path).is_none() {
        return true;
    }
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "removed incomplete file");
            true
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => true,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not remove incomplete file");
            false
        }
    }
}
