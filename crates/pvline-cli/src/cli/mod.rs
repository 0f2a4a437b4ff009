//! CLI for the pvline status-line renderer.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pvline_core::config;
use std::path::PathBuf;

use commands::{run_layout, run_replay, ReplaySettings};

/// Top-level CLI for the pvline status-line renderer.
#[derive(Debug, Parser)]
#[command(name = "pvline")]
#[command(about = "pvline: progress status lines for data transfers", long_about = None)]
pub struct Cli {
    /// Read display settings from this file instead of the XDG config.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Compile a format string and list its segments and fields.
    Layout {
        /// Format string, e.g. "%N: %b %t %r %p".
        format: String,
        /// Name shown by %N.
        #[arg(long)]
        name: Option<String>,
    },

    /// Render recorded samples ("elapsed delta total" per line) as status lines.
    Replay {
        /// Sample file; reads stdin when omitted or "-".
        path: Option<PathBuf>,
        /// Expected total size; enables percentage and ETA.
        #[arg(long, value_name = "N")]
        size: Option<i64>,
        /// Terminal width to render for.
        #[arg(long, value_name = "COLS")]
        width: Option<usize>,
        /// Format string; overrides the configured format and fields.
        #[arg(long)]
        format: Option<String>,
        /// Name shown by %N.
        #[arg(long)]
        name: Option<String>,
        /// Print bare numbers instead of status lines.
        #[arg(long)]
        numeric: bool,
        /// Count in bits.
        #[arg(long)]
        bits: bool,
        /// Count lines instead of bytes.
        #[arg(long)]
        line_mode: bool,
        /// Amount already transferred before the first sample.
        #[arg(long, default_value = "0", value_name = "N")]
        offset: i64,
        /// Minimum seconds between lines (default from config).
        #[arg(long, value_name = "SECS")]
        interval: Option<f64>,
    },
}

impl CliCommand {
    /// Run the parsed command; returns the process exit code.
    pub fn run_from_args() -> Result<u8> {
        let cli = Cli::parse();
        let cfg = match &cli.config {
            Some(path) => config::load_from_path(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Layout { format, name } => {
                run_layout(&format, name.as_deref())?;
                Ok(0)
            }
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
                let settings = ReplaySettings {
                    size,
                    width,
                    format,
                    name,
                    numeric,
                    bits,
                    line_mode,
                    offset,
                    interval,
                };
                let status = run_replay(path.as_deref(), &cfg, settings)?;
                Ok(status.code())
            }
        }
    }
}

#[cfg(test)]
mod tests;
