use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::format::FormatOptions;
use crate::render::{RenderOptions, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::stats::DEFAULT_WINDOW_SECS;

/// Display configuration loaded from `~/.config/pvline/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Explicit format string (e.g. "%N %b %r"). Overrides `[fields]`.
    pub format: Option<String>,
    /// Label shown by `%N`.
    pub name: Option<String>,
    /// Print bare numbers instead of a status line.
    pub numeric: bool,
    /// Count in bits rather than bytes.
    pub bits: bool,
    /// Count lines rather than bytes.
    pub line_mode: bool,
    /// Window for the `%a` average rate and the ETA, in seconds.
    pub average_rate_window_secs: u32,
    /// Minimum seconds between two status lines.
    pub interval_secs: f64,
    /// Fixed terminal width; probed from the terminal when unset.
    pub width: Option<usize>,
    /// Fixed terminal height; probed from the terminal when unset.
    pub height: Option<usize>,
    /// Fields to show when `format` is not set.
    pub fields: FormatOptions,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: None,
            name: None,
            numeric: false,
            bits: false,
            line_mode: false,
            average_rate_window_secs: DEFAULT_WINDOW_SECS,
            interval_secs: 1.0,
            width: None,
            height: None,
            fields: FormatOptions::default(),
        }
    }
}

impl DisplayConfig {
    /// Renderer options for this configuration. Unset dimensions fall back to
    /// the probed terminal size, then to 80x25.
    pub fn to_render_options(&self, screen: Option<(usize, usize)>) -> RenderOptions {
        let (probed_w, probed_h) = screen.unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT));
        RenderOptions {
            format: self.format.clone(),
            fields: self.fields.clone(),
            name: self.name.clone(),
            numeric: self.numeric,
            bits: self.bits,
            line_mode: self.line_mode,
            average_rate_window_secs: self.average_rate_window_secs,
            width: self.width.unwrap_or(probed_w),
            height: self.height.unwrap_or(probed_h),
            ..RenderOptions::default()
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pvline")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DisplayConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = DisplayConfig::default();
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
pub fn load_from_path(path: &Path) -> Result<DisplayConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: DisplayConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded display config");
    Ok(cfg)
}
