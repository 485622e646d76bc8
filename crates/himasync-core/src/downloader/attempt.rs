//! One HTTP GET attempt, fresh or resumed, streamed into the target file.

use std::cell::Cell;
use std::io;
use std::path::Path;
use std::str;
use std::time::Duration;

use crate::retry::AttemptError;
use crate::storage::{self, TargetFile, WriteMode};

/// Hard wall-clock limit so a trickling transfer eventually fails.
const SAFETY_TIMEOUT: Duration = Duration::from_secs(3600);

/// Status code from an HTTP status line (`HTTP/1.1 206 Partial Content`).
pub fn parse_status_line(line: &[u8]) -> Option<u32> {
    let line = str::from_utf8(line).ok()?;
    let rest = line.trim_end().strip_prefix("HTTP/")?;
    rest.split_whitespace().nth(1)?.parse().ok()
}

fn is_body_status(code: u32) -> bool {
    code == 200 || code == 206
}

/// Performs one GET of `url` into `target`.
///
/// If `target` exists the request carries `Range: bytes=<len>-` and the body
/// is appended; otherwise the file is created (or truncated) and written from
/// the start. Bodies of any status other than 200/206 are discarded. `timeout`
/// bounds connecting and any stall while receiving.
pub fn attempt_once(url: &str, target: &Path, timeout: Duration) -> Result<(), AttemptError> {
    let offset = storage::existing_len(target);
    let mode = if offset.is_some() {
        WriteMode::Append
    } else {
        WriteMode::Truncate
    };

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(AttemptError::Curl)?;
    easy.follow_location(true).map_err(AttemptError::Curl)?;
    easy.max_redirections(10).map_err(AttemptError::Curl)?;
    easy.connect_timeout(timeout).map_err(AttemptError::Curl)?;
    // Stall detection: less than 1 byte/s for `timeout` (whole seconds, at least 1) aborts.
    easy.low_speed_limit(1).map_err(AttemptError::Curl)?;
    easy.low_speed_time(Duration::from_secs(timeout.as_secs_f64().ceil().max(1.0) as u64))
        .map_err(AttemptError::Curl)?;
    easy.timeout(SAFETY_TIMEOUT.max(timeout)).map_err(AttemptError::Curl)?;
    if let Some(offset) = offset {
        // curl expects "start-" here, not "bytes=start-".
        easy.range(&format!("{}-", offset)).map_err(AttemptError::Curl)?;
        tracing::debug!(path = %target.display(), offset, "resuming partial file");
    }

    let status: Cell<Option<u32>> = Cell::new(None);
    let mut file: Option<TargetFile> = None;
    let mut storage_error: Option<io::Error> = None;

    let performed = {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|line| {
                if let Some(code) = parse_status_line(line) {
                    // Redirects produce several status lines; the last one wins.
                    status.set(Some(code));
                }
                true
            })
            .map_err(AttemptError::Curl)?;
        transfer
            .write_function(|data| {
                if !status.get().is_some_and(is_body_status) {
                    return Ok(0);
                }
                if file.is_none() {
                    match TargetFile::open(target, mode) {
                        Ok(f) => file = Some(f),
                        Err(e) => {
                            storage_error = Some(e);
                            return Ok(0);
                        }
                    }
                }
                let Some(f) = file.as_mut() else {
                    return Ok(0);
                };
                match f.write_chunk(data) {
                    Ok(()) => Ok(data.len()),
                    Err(e) => {
                        storage_error = Some(e);
                        Ok(0) // abort transfer
                    }
                }
            })
            .map_err(AttemptError::Curl)?;

        transfer.perform()
    };

    if let Err(e) = performed {
        if e.is_write_error() {
            if let Some(io_err) = storage_error.take() {
                return Err(AttemptError::Storage(io_err));
            }
            if let Some(code) = status.get().filter(|c| !is_body_status(*c)) {
                return Err(AttemptError::Http(code));
            }
        }
        return Err(AttemptError::Curl(e));
    }

    let code = easy.response_code().map_err(AttemptError::Curl)?;
    if !is_body_status(code) {
        return Err(AttemptError::Http(code));
    }

    // Empty body: nothing reached the write callback, but the file must still exist.
    let file = match file {
        Some(f) => f,
        None => TargetFile::open(target, mode).map_err(AttemptError::Storage)?,
    };
    file.sync().map_err(AttemptError::Storage)?;
    tracing::trace!(path = %target.display(), "attempt wrote body");
    Ok(())
}
