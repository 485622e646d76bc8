//! Run captures concurrently with at most `max_concurrent` in flight.
//!
//! Keeps up to `max_concurrent` blocking tasks running at once; when one
//! finishes, the next queued capture is started until the queue is empty.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

use crate::downloader::{self, FetchOptions, FetchOutcome};
use crate::timeline::Capture;
use crate::url_model::ImageSource;

use super::summary::SyncSummary;

/// Runs `job` once per capture on blocking worker threads, at most
/// `max_concurrent` at a time. A panicking job is logged and counted as
/// abandoned; it never stops the other captures.
pub async fn run_bounded<F>(work: Vec<Capture>, max_concurrent: usize, job: F) -> SyncSummary
where
    F: Fn(&Capture) -> FetchOutcome + Send + Sync + 'static,
{
    let max_concurrent = max_concurrent.max(1);
    let job = Arc::new(job);
    let mut summary = SyncSummary {
        planned: work.len(),
        ..Default::default()
    };
    let mut queue: VecDeque<Capture> = work.into();
    let mut join_set = tokio::task::JoinSet::new();

    loop {
        while join_set.len() < max_concurrent {
            let Some(capture) = queue.pop_front() else {
                break;
            };
            let job = Arc::clone(&job);
            join_set.spawn_blocking(move || job(&capture));
        }

        let Some(res) = join_set.join_next().await else {
            break;
        };
        match res {
            Ok(outcome) => summary.record(outcome),
            Err(e) => {
                tracing::error!("download task join: {}", e);
                summary.abandoned += 1;
            }
        }
    }

    summary
}

/// Downloads every capture of `work` from `source` into `output_dir`.
pub async fn run_fetches(
    work: Vec<Capture>,
    source: ImageSource,
    output_dir: PathBuf,
    opts: FetchOptions,
    max_concurrent: usize,
) -> SyncSummary {
    tracing::info!(
        planned = work.len(),
        workers = max_concurrent,
        max_retries = opts.max_retries,
        "starting downloads"
    );
    run_bounded(work, max_concurrent, move |capture| {
        let url = source.url_for(&capture.at);
        downloader::fetch_capture(capture, &url, &output_dir, &opts)
    })
    .await
}
