//! Tests for the replay subcommand.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_replay_defaults() {
    match parse(&["pvline", "replay"]) {
        CliCommand::Replay {
            path,
            size,
            width,
            format,
            numeric,
            offset,
            interval,
            ..
        } => {
            assert!(path.is_none());
            assert!(size.is_none());
            assert!(width.is_none());
            assert!(format.is_none());
            assert!(!numeric);
            assert_eq!(offset, 0);
            assert!(interval.is_none());
        }
        _ => panic!("expected Replay"),
    }
}

#[test]
fn cli_parse_replay_all_flags() {
    match parse(&[
        "pvline",
        "replay",
        "samples.txt",
        "--size",
        "1048576",
        "--width",
        "100",
        "--format",
        "%b %r",
        "--name",
        "net",
        "--numeric",
        "--bits",
        "--line-mode",
        "--offset",
        "4096",
        "--interval",
        "0.5",
    ]) {
        CliCommand::Replay {
            path,
            size,
            width,
            format,
            name,
            numeric,
            bits,
            line_mode,
            offset,
            interval,
        } => {
            assert_eq!(path.as_deref(), Some(std::path::Path::new("samples.txt")));
            assert_eq!(size, Some(1_048_576));
            assert_eq!(width, Some(100));
            assert_eq!(format.as_deref(), Some("%b %r"));
            assert_eq!(name.as_deref(), Some("net"));
            assert!(numeric && bits && line_mode);
            assert_eq!(offset, 4096);
            assert_eq!(interval, Some(0.5));
        }
        _ => panic!("expected Replay with flags"),
    }
}

#[test]
fn cli_replay_rejects_bad_width() {
    assert!(Cli::try_parse_from(["pvline", "replay", "--width", "wide"]).is_err());
    assert!(Cli::try_parse_from(["pvline", "replay", "--width", "-1"]).is_err());
}
