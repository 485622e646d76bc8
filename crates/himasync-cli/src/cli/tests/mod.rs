//! CLI parse tests.

use super::{normalize_args, Cli};
use clap::Parser;
use himasync_core::config::SyncConfig;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(normalize_args(args.iter().map(|s| s.to_string()))).unwrap()
}

#[test]
fn cli_parse_positional_only() {
    let cli = parse(&["himasync", "/data/himawari"]);
    assert_eq!(cli.output_folder.to_str(), Some("/data/himawari"));
    assert!(cli.max_retries.is_none());
    assert!(cli.timeout.is_none());
    assert!(cli.look_back_days.is_none());
    assert!(cli.n_jobs.is_none());
    assert!(cli.config.is_none());
}

#[test]
fn cli_parse_single_dash_options() {
    let cli = parse(&[
        "himasync",
        "out",
        "-max_retries",
        "3",
        "-timeout",
        "0.5",
        "-look_back_days",
        "2",
        "-n_jobs",
        "-1",
    ]);
    assert_eq!(cli.max_retries, Some(3));
    assert_eq!(cli.timeout, Some(0.5));
    assert_eq!(cli.look_back_days, Some(2));
    assert_eq!(cli.n_jobs, Some(-1));
}

#[test]
fn cli_parse_double_dash_and_equals() {
    let cli = parse(&["himasync", "--n_jobs=4", "-max_retries=7", "out"]);
    assert_eq!(cli.n_jobs, Some(4));
    assert_eq!(cli.max_retries, Some(7));
}

#[test]
fn cli_requires_output_folder() {
    assert!(Cli::try_parse_from(["himasync"]).is_err());
}

#[test]
fn normalize_leaves_other_args_alone() {
    let args: Vec<String> = ["himasync", "-h", "-1", "--config", "c.toml", "-max_retries"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(
        normalize_args(args),
        vec!["himasync", "-h", "-1", "--config", "c.toml", "--max_retries"]
    );
}

#[test]
fn overrides_apply_on_top_of_config() {
    let cli = parse(&["himasync", "out", "-max_retries", "0", "-n_jobs", "2"]);
    let mut cfg = SyncConfig::default();
    cli.apply_to(&mut cfg);
    assert_eq!(cfg.max_retries, 0);
    assert_eq!(cfg.n_jobs, 2);
    assert_eq!(cfg.look_back_days, 21);
    assert!((cfg.timeout_secs - 5.0).abs() < 1e-9);
}

#[test]
fn zero_timeout_override_fails_validation() {
    let cli = parse(&["himasync", "out", "-timeout", "0"]);
    let mut cfg = SyncConfig::default();
    cli.apply_to(&mut cfg);
    assert!(cfg.validate().is_err());
}
