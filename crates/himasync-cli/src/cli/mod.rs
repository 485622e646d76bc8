//! CLI for himasync.

use anyhow::Result;
use clap::Parser;
use himasync_core::config::{self, SyncConfig};
use himasync_core::sync;
use std::path::PathBuf;

/// Options accepted with a single leading dash (`-max_retries 3`).
const SINGLE_DASH_OPTIONS: [&str; 4] = ["max_retries", "timeout", "look_back_days", "n_jobs"];

/// Keep a local archive of Himawari full disk true color images up to date.
///
/// Options left out fall back to the config file (created with defaults on first run).
#[derive(Debug, Parser)]
#[command(name = "himasync")]
#[command(about = "himasync: fill gaps in a local Himawari image archive", long_about = None)]
pub struct Cli {
    /// The name of the folder to save the images to (must exist).
    pub output_folder: PathBuf,

    /// Maximum GET attempts per image [default: 10].
    #[arg(long = "max_retries", value_name = "N")]
    pub max_retries: Option<u32>,

    /// Per-attempt timeout in seconds [default: 5].
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout: Option<f64>,

    /// Days of history to keep complete, ending at the current full hour [default: 21].
    #[arg(long = "look_back_days", value_name = "DAYS")]
    pub look_back_days: Option<u32>,

    /// Concurrent downloads; -1 uses all available cores [default: -1].
    #[arg(long = "n_jobs", value_name = "N", allow_negative_numbers = true)]
    pub n_jobs: Option<i32>,

    /// Config file to use instead of ~/.config/himasync/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Rewrite `-max_retries` style options to the `--max_retries` form clap parses.
pub fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .map(|arg| {
            let Some(rest) = arg.strip_prefix('-').filter(|r| !r.starts_with('-')) else {
                return arg;
            };
            let name = rest.split_once('=').map_or(rest, |(n, _)| n);
            if SINGLE_DASH_OPTIONS.contains(&name) {
                format!("-{}", arg)
            } else {
                arg
            }
        })
        .collect()
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply_to(&self, cfg: &mut SyncConfig) {
        if let Some(n) = self.max_retries {
            cfg.max_retries = n;
        }
        if let Some(t) = self.timeout {
            cfg.timeout_secs = t;
        }
        if let Some(d) = self.look_back_days {
            cfg.look_back_days = d;
        }
        if let Some(n) = self.n_jobs {
            cfg.n_jobs = n;
        }
    }

    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse_from(normalize_args(std::env::args()));

        let mut cfg = match &cli.config {
            Some(path) => config::load_from_path(path)?,
            None => config::load_or_init()?,
        };
        cli.apply_to(&mut cfg);
        cfg.validate()?;
        tracing::debug!("effective config: {:?}", cfg);

        let summary = sync::run_sync(&cfg, &cli.output_folder).await?;
        if summary.planned == 0 {
            println!("Archive is complete.");
        } else {
            println!(
                "Downloaded {} of {} missing image(s) in {} attempt(s); {} gave up.",
                summary.completed, summary.planned, summary.attempts, summary.abandoned
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
