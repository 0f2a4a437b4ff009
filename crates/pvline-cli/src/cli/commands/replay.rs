//! `pvline replay` – render recorded samples as status lines.

use anyhow::{bail, Context, Result};
use pvline_core::config::DisplayConfig;
use pvline_core::display::StatusLine;
use pvline_core::error::ExitStatus;
use pvline_core::render::{RenderOptions, RenderRequest, Renderer};
use pvline_core::term;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// Command-line overrides for the configured display settings.
#[derive(Debug, Clone, Default)]
pub struct ReplaySettings {
    pub size: Option<i64>,
    pub width: Option<usize>,
    pub format: Option<String>,
    pub name: Option<String>,
    pub numeric: bool,
    pub bits: bool,
    pub line_mode: bool,
    pub offset: i64,
    pub interval: Option<f64>,
}

impl ReplaySettings {
    fn render_options(
        &self,
        cfg: &DisplayConfig,
        screen: Option<(usize, usize)>,
    ) -> Result<RenderOptions> {
        if self.offset < 0 {
            bail!("offset must not be negative, got {}", self.offset);
        }
        let mut opts = cfg.to_render_options(screen);
        if let Some(size) = self.size {
            opts.size = size;
        }
        if let Some(width) = self.width {
            opts.width = width;
        }
        if self.format.is_some() {
            opts.format = self.format.clone();
        }
        if self.name.is_some() {
            opts.name = self.name.clone();
        }
        opts.numeric |= self.numeric;
        opts.bits |= self.bits;
        opts.line_mode |= self.line_mode;
        opts.initial_offset = self.offset;
        Ok(opts)
    }

    fn interval_secs(&self, cfg: &DisplayConfig) -> f64 {
        self.interval.unwrap_or(cfg.interval_secs)
    }
}

/// Replay samples from `path` (stdin when `None` or `-`) to stdout.
pub fn run_replay(
    path: Option<&Path>,
    cfg: &DisplayConfig,
    settings: ReplaySettings,
) -> Result<ExitStatus> {
    let input: Box<dyn BufRead> = match path {
        Some(p) if p != Path::new("-") => {
            let file = File::open(p)
                .with_context(|| format!("failed to open sample file: {}", p.display()))?;
            Box::new(BufReader::new(file))
        }
        _ => Box::new(io::stdin().lock()),
    };

    let opts = settings.render_options(cfg, term::screen_size())?;
    tracing::debug!(
        format = %opts.directives(),
        width = opts.width,
        size = opts.size,
        "replaying samples"
    );
    let renderer = Renderer::new(opts);
    let stdout = io::stdout();
    let mut status =
        StatusLine::new(renderer, stdout.lock()).with_interval(settings.interval_secs(cfg));
    replay(input, &mut status)?;
    Ok(status.exit_status())
}

/// Parse one `elapsed delta total` line. Blank lines and `#` comments give
/// `None`.
fn parse_sample(line: &str) -> Result<Option<(f64, i64, i64)>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let parts: Vec<&str> = line.split_whitespace().collect();
    let [elapsed, delta, total] = parts[..] else {
        bail!("expected \"elapsed delta total\", got {:?}", line);
    };
    let elapsed: f64 = elapsed
        .parse()
        .with_context(|| format!("bad elapsed time {:?}", elapsed))?;
    if !elapsed.is_finite() || elapsed < 0.0 {
        bail!("elapsed time must be a non-negative number, got {}", elapsed);
    }
    let delta: i64 = delta
        .parse()
        .with_context(|| format!("bad delta {:?}", delta))?;
    let total: i64 = total
        .parse()
        .with_context(|| format!("bad total {:?}", total))?;
    Ok(Some((elapsed, delta, total)))
}

/// Feed every sample to `status`. A negative delta ends the transfer, a
/// negative total releases the buffer. Input that ends without a final
/// sample is finished from the last update.
fn replay<R: BufRead, W: Write>(input: R, status: &mut StatusLine<W>) -> Result<()> {
    let mut last_update = None;
    let mut finished = false;

    for (i, line) in input.lines().enumerate() {
        let line_no = i + 1;
        let line = line.with_context(|| format!("reading sample line {line_no}"))?;
        let Some((elapsed, delta, total)) =
            parse_sample(&line).with_context(|| format!("sample line {line_no}"))?
        else {
            continue;
        };

        match RenderRequest::from_raw(elapsed, delta, total) {
            RenderRequest::Update { .. } => {
                status.tick(elapsed, delta, total)?;
                last_update = Some((elapsed, total));
                finished = false;
            }
            RenderRequest::Final { .. } => {
                status.finish(elapsed, total)?;
                finished = true;
            }
            RenderRequest::Release => status.release(),
        }
    }

    if !finished {
        if let Some((elapsed, total)) = last_update {
            status.finish(elapsed, total)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn status(format: &str, numeric: bool) -> StatusLine<Vec<u8>> {
        let renderer = Renderer::new(RenderOptions {
            format: Some(format.to_owned()),
            numeric,
            ..RenderOptions::default()
        });
        StatusLine::new(renderer, Vec::new())
    }

    #[test]
    fn parse_sample_lines() {
        assert_eq!(parse_sample("1.5 100 200").unwrap(), Some((1.5, 100, 200)));
        assert_eq!(parse_sample("  2\t-1  300 ").unwrap(), Some((2.0, -1, 300)));
        assert_eq!(parse_sample("").unwrap(), None);
        assert_eq!(parse_sample("# header").unwrap(), None);
        assert!(parse_sample("1 2").is_err());
        assert!(parse_sample("x 2 3").is_err());
        assert!(parse_sample("-1 2 3").is_err());
        assert!(parse_sample("1 2 3 4").is_err());
    }

    #[test]
    fn replay_finishes_from_last_update() {
        let mut s = status("%b", true);
        replay(Cursor::new("# t d total\n1 10 10\n2 10 20\n"), &mut s).unwrap();
        let out = String::from_utf8(s.into_inner()).unwrap();
        assert_eq!(out, "10\n20\n20\n");
    }

    #[test]
    fn explicit_final_sample_is_not_repeated() {
        let mut s = status("%b", true);
        replay(Cursor::new("1 10 10\n2 -1 20\n"), &mut s).unwrap();
        let out = String::from_utf8(s.into_inner()).unwrap();
        assert_eq!(out, "10\n20\n");
    }

    #[test]
    fn status_lines_use_carriage_returns() {
        let mut s = status("%b", false);
        replay(Cursor::new("1 512 512\n"), &mut s).unwrap();
        let out = String::from_utf8(s.into_inner()).unwrap();
        assert_eq!(out, " 512  B\r 512  B\n");
    }

    #[test]
    fn bad_line_names_its_number() {
        let mut s = status("%b", true);
        let err = replay(Cursor::new("1 1 1\noops\n"), &mut s).unwrap_err();
        assert!(format!("{err:#}").contains("sample line 2"), "{err:#}");
    }

    #[test]
    fn flags_override_config() {
        let cfg = DisplayConfig {
            width: Some(100),
            format: Some("%t".to_owned()),
            ..DisplayConfig::default()
        };
        let settings = ReplaySettings {
            width: Some(50),
            size: Some(1000),
            bits: true,
            offset: 10,
            ..ReplaySettings::default()
        };
        let opts = settings.render_options(&cfg, Some((132, 43))).unwrap();
        assert_eq!(opts.width, 50);
        assert_eq!(opts.height, 43);
        assert_eq!(opts.size, 1000);
        assert_eq!(opts.format.as_deref(), Some("%t"));
        assert!(opts.bits);
        assert_eq!(opts.initial_offset, 10);
        assert!((settings.interval_secs(&cfg) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn negative_offset_is_rejected() {
        let settings = ReplaySettings {
            offset: i64::MIN,
            ..ReplaySettings::default()
        };
        let err = settings
            .render_options(&DisplayConfig::default(), None)
            .unwrap_err();
        assert!(err.to_string().contains("offset"), "{err:#}");
    }
}
