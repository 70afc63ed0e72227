//! Tests for the replay subcommand.

use super::parse;
use crate::cli::{Cli, CliCommand, ValuesArg};
use clap::Parser;
use std::path::Path;
use wxreplay_core::payload::ValueMode;

#[test]
fn cli_parse_replay_defaults() {
    match parse(&["wxreplay", "replay"]) {
        CliCommand::Replay {
            input,
            url,
            delay,
            fail_fast,
            dry_run,
        } => {
            assert!(input.input.is_none());
            assert!(input.values.is_none());
            assert!(!input.skip_malformed);
            assert!(url.is_none());
            assert!(delay.is_none());
            assert!(!fail_fast);
            assert!(!dry_run);
        }
        _ => panic!("expected Replay"),
    }
}

#[test]
fn cli_parse_replay_all_flags() {
    match parse(&[
        "wxreplay",
        "replay",
        "obs.tsv",
        "--url",
        "http://127.0.0.1:9000/submit",
        "--delay",
        "0.5",
        "--values",
        "number",
        "--skip-malformed",
        "--fail-fast",
        "--dry-run",
    ]) {
        CliCommand::Replay {
            input,
            url,
            delay,
            fail_fast,
            dry_run,
        } => {
            assert_eq!(input.input.as_deref(), Some(Path::new("obs.tsv")));
            assert_eq!(input.values, Some(ValuesArg::Number));
            assert!(input.skip_malformed);
            assert_eq!(url.as_deref(), Some("http://127.0.0.1:9000/submit"));
            assert_eq!(delay, Some(0.5));
            assert!(fail_fast);
            assert!(dry_run);
        }
        _ => panic!("expected Replay with flags"),
    }
}

#[test]
fn cli_replay_flags_override_config() {
    let mut cfg = wxreplay_core::config::ReplayConfig::default();
    if let CliCommand::Replay { input, .. } =
        parse(&["wxreplay", "replay", "x.tsv", "--values", "number"])
    {
        cfg.apply(input.overrides());
    }
    assert_eq!(cfg.input_path, Path::new("x.tsv"));
    assert_eq!(cfg.values, ValueMode::Number);
    assert_eq!(cfg.target_url, "http://localhost:8080/submit");
}

#[test]
fn cli_rejects_unknown_values_mode() {
    assert!(Cli::try_parse_from(["wxreplay", "replay", "--values", "hex"]).is_err());
}
