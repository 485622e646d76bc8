//! One archive sync: inventory → window → plan → downloads.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;

use crate::config::SyncConfig;
use crate::downloader::FetchOptions;
use crate::inventory;
use crate::planner;
use crate::scheduler::{self, SyncSummary};
use crate::timeline::CaptureWindow;
use crate::url_model::ImageSource;

/// Sync the window ending at the current full hour.
pub async fn run_sync(cfg: &SyncConfig, output_dir: &Path) -> Result<SyncSummary> {
    run_sync_at(cfg, output_dir, Utc::now()).await
}

/// Sync the window ending at the full hour of `now`.
///
/// Fails only on an invalid configuration, an unreadable inventory or a
/// window chrono cannot represent. Downloads that give up are counted in the
/// summary.
pub async fn run_sync_at(cfg: &SyncConfig, output_dir: &Path, now: DateTime<Utc>) -> Result<SyncSummary> {
    cfg.validate()?;
    let source = ImageSource::new(&cfg.source);
    let present = inventory::scan(output_dir, source.extension())
        .context("cannot plan downloads without an inventory")?;

    let window = CaptureWindow::ending_at(now, cfg.look_back_days, cfg.cadence_minutes)?;
    let work = planner::plan(window.captures(source.extension()), &present);
    tracing::info!(
        start = %window.start(),
        end = %window.end(),
        expected = window.len(),
        present = present.len(),
        missing = work.len(),
        "planned sync"
    );

    let opts = FetchOptions {
        max_retries: cfg.max_retries,
        timeout: cfg.timeout()?,
    };
    let summary = scheduler::run_fetches(
        work,
        source,
        output_dir.to_path_buf(),
        opts,
        cfg.worker_count(),
    )
    .await;

    tracing::info!(
        planned = summary.planned,
        completed = summary.completed,
        abandoned = summary.abandoned,
        attempts = summary.attempts,
        "sync finished"
    );
    Ok(summary)
}
