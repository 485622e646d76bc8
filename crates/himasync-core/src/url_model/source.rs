//! Remote URL template of the image server.

use chrono::{DateTime, Utc};

use crate::config::SourceConfig;

/// `strftime` pattern of the remote stamp (second precision).
pub const REMOTE_STAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Builds remote URLs for capture timestamps.
#[derive(Debug, Clone)]
pub struct ImageSource {
    base_url: String,
    prefix: String,
    extension: String,
}

impl ImageSource {
    pub fn new(cfg: &SourceConfig) -> Self {
        Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            prefix: cfg.prefix.clone(),
            extension: cfg.extension.clone(),
        }
    }

    /// File extension shared by remote files and local image keys.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// e.g. `.../full_disk_ahi_true_color_20240101001000.jpg`
    pub fn url_for(&self, at: &DateTime<Utc>) -> String {
        format!(
            "{}/{}{}.{}",
            self.base_url,
            self.prefix,
            at.format(REMOTE_STAMP_FORMAT),
            self.extension
        )
    }
}
