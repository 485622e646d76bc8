use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Sentinel for `n_jobs`: use every available worker.
pub const ALL_WORKERS: i32 = -1;

/// Remote image source (optional `[source]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Directory URL holding the images, without a trailing slash.
    pub base_url: String,
    /// Fixed file name prefix in front of the `YYYYMMDDHHMMSS` stamp.
    pub prefix: String,
    /// Remote and local file extension (no leading dot).
    pub extension: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://rammb.cira.colostate.edu/ramsdis/online/images/hi_res/himawari-8/full_disk_ahi_true_color".to_string(),
            prefix: "full_disk_ahi_true_color_".to_string(),
            extension: "jpg".to_string(),
        }
    }
}

/// Global configuration loaded from `~/.config/himasync/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Maximum number of GET attempts per image. 0 means no attempt at all.
    pub max_retries: u32,
    /// Per-attempt timeout in seconds (connect + transfer).
    pub timeout_secs: f64,
    /// Length of the window ending at the current full hour.
    pub look_back_days: u32,
    /// Concurrent downloads; -1 uses all available parallelism.
    pub n_jobs: i32,
    /// Capture cadence of the satellite product.
    #[serde(default = "default_cadence_minutes")]
    pub cadence_minutes: u32,
    #[serde(default)]
    pub source: SourceConfig,
}

fn default_cadence_minutes() -> u32 {
    10
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_retries: 10,
            timeout_secs: 5.0,
            look_back_days: 21,
            n_jobs: ALL_WORKERS,
            cadence_minutes: default_cadence_minutes(),
            source: SourceConfig::default(),
        }
    }
}

impl SyncConfig {
    /// Per-attempt timeout as a `Duration`; must be positive and finite.
    pub fn timeout(&self) -> Result<Duration> {
        match Duration::try_from_secs_f64(self.timeout_secs) {
            Ok(d) if !d.is_zero() => Ok(d),
            _ => anyhow::bail!("timeout must be a positive number of seconds, got {}", self.timeout_secs),
        }
    }

    /// Resolve `n_jobs` into a concrete worker count (always >= 1).
    pub fn worker_count(&self) -> usize {
        resolve_worker_count(self.n_jobs)
    }

    /// Check values that cannot be repaired silently.
    pub fn validate(&self) -> Result<()> {
        if self.cadence_minutes == 0 {
            anyhow::bail!("cadence_minutes must be positive");
        }
        self.timeout()?;
        let parsed = url::Url::parse(&self.source.base_url)
            .with_context(|| format!("invalid source base_url: {}", self.source.base_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("source base_url must be http or https, got {}", parsed.scheme());
        }
        if self.source.extension.is_empty() || self.source.extension.contains('.') {
            anyhow::bail!("source extension must be non-empty and without dots");
        }
        Ok(())
    }
}

/// `-1` means all available parallelism; other non-positive values clamp to one worker.
pub fn resolve_worker_count(n_jobs: i32) -> usize {
    if n_jobs == ALL_WORKERS {
        return std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
    }
    n_jobs.max(1) as usize
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("himasync")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SyncConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SyncConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<SyncConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: SyncConfig = toml::from_str(&data)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
