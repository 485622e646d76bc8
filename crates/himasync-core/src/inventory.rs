//! Snapshot of the images already present in the output directory.
//!
//! Only names are inspected. A zero-byte or truncated file counts as present;
//! the downloader re-checks the actual file length when it runs. Files whose
//! name is not an image key (`YYYYMMDDHHmm.<ext>`) are left alone.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::url_model::ImageKey;

/// Inventory listing failed; the run cannot be planned.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("output directory {} does not exist", .0.display())]
    Missing(PathBuf),
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("cannot read output directory {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Image keys of all `*.{extension}` files directly inside `dir`.
pub fn scan(dir: &Path, extension: &str) -> Result<HashSet<String>, InventoryError> {
    let io_err = |source: io::Error| InventoryError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let meta = match fs::metadata(dir) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(InventoryError::Missing(dir.to_path_buf()))
        }
        Err(e) => return Err(io_err(e)),
    };
    if !meta.is_dir() {
        return Err(InventoryError::NotADirectory(dir.to_path_buf()));
    }

    let mut present = HashSet::new();
    let mut ignored = 0usize;
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        if !entry.file_type().map_err(io_err)?.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        match ImageKey::parse(name, extension) {
            Ok(_) => {
                present.insert(name.to_string());
            }
            Err(e) => {
                ignored += 1;
                tracing::trace!(error = %e, "ignoring file");
            }
        }
    }

    tracing::debug!(dir = %dir.display(), count = present.len(), ignored, "scanned inventory");
    Ok(present)
}
