//! Status-line sink: drives a [`Renderer`] and writes its lines.

use std::io::{self, Write};

use crate::error::ExitStatus;
use crate::render::{RenderRequest, Renderer};

/// Writes rendered status lines to `W`, at most once per interval.
///
/// Outside numeric mode each line ends with `\r` so the next one overwrites
/// it; the final line ends with `\n`. Updates arriving before the interval is
/// up are folded into the next line that is drawn.
pub struct StatusLine<W: Write> {
    renderer: Renderer,
    out: W,
    interval_secs: f64,
    next_due: Option<f64>,
    pending: i64,
    reported: bool,
}

impl<W: Write> StatusLine<W> {
    pub fn new(renderer: Renderer, out: W) -> Self {
        Self {
            renderer,
            out,
            interval_secs: 0.0,
            next_due: None,
            pending: 0,
            reported: false,
        }
    }

    /// Draw at most one line per `secs`.
    pub fn with_interval(mut self, secs: f64) -> Self {
        self.interval_secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
        self
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    pub fn exit_status(&self) -> ExitStatus {
        self.renderer.exit_status()
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Feed one sample. Returns whether a line was written.
    pub fn tick(&mut self, elapsed_secs: f64, since_last: i64, total: i64) -> io::Result<bool> {
        self.pending = self.pending.saturating_add(since_last.max(0));
        if self.next_due.is_some_and(|due| elapsed_secs < due) {
            return Ok(false);
        }
        self.next_due = Some(elapsed_secs + self.interval_secs);

        let since_last = std::mem::take(&mut self.pending);
        let request = RenderRequest::Update {
            elapsed_secs,
            since_last,
            total,
        };
        let terminator = if self.renderer.options().numeric { "" } else { "\r" };
        self.draw(request, terminator)
    }

    /// Draw the final line with whole-run rates and free the buffer.
    pub fn finish(&mut self, elapsed_secs: f64, total: i64) -> io::Result<()> {
        self.pending = 0;
        let request = RenderRequest::Final {
            elapsed_secs,
            total,
        };
        let terminator = if self.renderer.options().numeric { "" } else { "\n" };
        self.draw(request, terminator)?;
        self.release();
        Ok(())
    }

    /// Free the renderer's output buffer. Safe to call more than once.
    pub fn release(&mut self) {
        // A release never renders, so the result carries nothing.
        let _ = self.renderer.render(RenderRequest::Release);
    }

    fn draw(&mut self, request: RenderRequest, terminator: &str) -> io::Result<bool> {
        match self.renderer.render(request) {
            Ok(Some(line)) => {
                self.out.write_all(line.as_bytes())?;
                self.out.write_all(terminator.as_bytes())?;
                self.out.flush()?;
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(err) => {
                if !self.reported {
                    self.reported = true;
                    tracing::warn!(error = %err, "status line disabled until memory is available");
                    eprintln!("pvline: {err}");
                }
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderOptions;

    fn status(format: &str, numeric: bool) -> StatusLine<Vec<u8>> {
        let renderer = Renderer::new(RenderOptions {
            format: Some(format.to_owned()),
            numeric,
            ..RenderOptions::default()
        });
        StatusLine::new(renderer, Vec::new())
    }

    fn written(s: &StatusLine<Vec<u8>>) -> String {
        String::from_utf8(s.get_ref().clone()).unwrap()
    }

    #[test]
    fn lines_overwrite_then_finish_with_newline() {
        let mut s = status("%b", false);
        assert!(s.tick(1.0, 512, 512).unwrap());
        assert!(s.tick(2.0, 512, 1024).unwrap());
        s.finish(2.0, 1024).unwrap();
        assert_eq!(written(&s), " 512  B\r1.00KiB\r1.00KiB\n");
    }

    #[test]
    fn numeric_lines_are_newline_terminated() {
        let mut s = status("%b", true);
        s.tick(1.0, 10, 10).unwrap();
        s.finish(2.0, 20).unwrap();
        assert_eq!(written(&s), "10\n20\n");
    }

    #[test]
    fn interval_folds_updates() {
        let renderer = Renderer::new(RenderOptions {
            format: Some("%r".to_owned()),
            ..RenderOptions::default()
        });
        let mut s = StatusLine::new(renderer, Vec::new()).with_interval(1.0);
        assert!(s.tick(1.0, 1024, 1024).unwrap());
        assert!(!s.tick(1.5, 512, 1536).unwrap());
        assert!(s.tick(2.0, 512, 2048).unwrap());
        // Both half-second deltas land in the second line.
        assert_eq!(written(&s), "[1.00KiB/s]\r[1.00KiB/s]\r");
    }

    #[test]
    fn allocation_failure_reported_once() {
        let renderer = Renderer::new(RenderOptions {
            format: Some("%b".to_owned()),
            width: usize::MAX / 4,
            ..RenderOptions::default()
        });
        let mut s = StatusLine::new(renderer, Vec::new());
        assert!(!s.tick(1.0, 1, 1).unwrap());
        assert!(!s.tick(2.0, 1, 2).unwrap());
        assert!(s.reported);
        assert_eq!(s.exit_status().code(), ExitStatus::DISPLAY_ALLOC);
        assert!(written(&s).is_empty());
    }

    #[test]
    fn release_is_repeatable() {
        let mut s = status("%b", false);
        s.tick(1.0, 1, 1).unwrap();
        s.release();
        s.release();
        assert!(s.exit_status().is_ok());
    }
}
