//! The status-line renderer.
//!
//! One `Renderer` per monitored transfer. Each call to [`Renderer::render`]
//! takes the latest sample, updates the rate statistics, renders the fields
//! the layout uses, sizes the progress bar from what is left, and assembles
//! the line into the output buffer.

mod assemble;
mod bar;
mod buffer;
mod fields;

use std::fmt::Write;

use chrono::Local;

use crate::error::{ExitStatus, RenderError};
use crate::format::{compile, Field, FormatOptions, Layout};
use crate::stats::{
    eta_secs, percentage, whole_run_rate, AverageRateWindow, RateSmoother, Sweep,
    DEFAULT_WINDOW_SECS,
};

use assemble::LineHistory;
use bar::BarFill;
use fields::{Scratch, UnitStyle};

pub use buffer::OutputBuffer;
pub use fields::{BufferFill, OutputTail};

/// Terminal size assumed until the caller reports one.
pub const DEFAULT_WIDTH: usize = 80;
pub const DEFAULT_HEIGHT: usize = 25;

/// One tick from the copy loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderRequest {
    /// Regular update: `since_last` units moved, `total` so far.
    Update {
        elapsed_secs: f64,
        since_last: i64,
        total: i64,
    },
    /// Last update of the transfer; rates become whole-run averages.
    Final { elapsed_secs: f64, total: i64 },
    /// Free the output buffer; nothing is rendered.
    Release,
}

impl RenderRequest {
    /// Decode the signed form: a negative `total` releases, a negative
    /// `since_last` marks the final update.
    pub fn from_raw(elapsed_secs: f64, since_last: i64, total: i64) -> Self {
        if total < 0 {
            RenderRequest::Release
        } else if since_last < 0 {
            RenderRequest::Final {
                elapsed_secs,
                total,
            }
        } else {
            RenderRequest::Update {
                elapsed_secs,
                since_last,
                total,
            }
        }
    }
}

/// Settings that shape the rendered line.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Explicit directive string; overrides `fields` when set.
    pub format: Option<String>,
    pub fields: FormatOptions,
    pub name: Option<String>,
    /// Print bare numbers, one per line.
    pub numeric: bool,
    /// Show amounts and rates in bits.
    pub bits: bool,
    /// Amounts are lines, not bytes.
    pub line_mode: bool,
    /// Expected total; 0 or less when unknown.
    pub size: i64,
    /// Amount already present before this run (e.g. a resumed transfer).
    pub initial_offset: i64,
    pub average_rate_window_secs: u32,
    pub width: usize,
    pub height: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: None,
            fields: FormatOptions::default(),
            name: None,
            numeric: false,
            bits: false,
            line_mode: false,
            size: 0,
            initial_offset: 0,
            average_rate_window_secs: DEFAULT_WINDOW_SECS,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl RenderOptions {
    /// The directive string in effect.
    pub fn directives(&self) -> String {
        self.format
            .clone()
            .unwrap_or_else(|| self.fields.to_format_string())
    }
}

/// Per-transfer rendering state.
#[derive(Debug)]
pub struct Renderer {
    options: RenderOptions,
    layout: Layout,
    stale: bool,
    scratch: Scratch,
    smoother: RateSmoother,
    window: AverageRateWindow,
    sweep: Sweep,
    percentage: i64,
    buffer: OutputBuffer,
    history: LineHistory,
    fill: BufferFill,
    tail: OutputTail,
    exit_status: ExitStatus,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        let window = AverageRateWindow::with_window_secs(options.average_rate_window_secs);
        Self {
            options,
            layout: Layout::default(),
            stale: true,
            scratch: Scratch::new(),
            smoother: RateSmoother::new(),
            window,
            sweep: Sweep::new(),
            percentage: 0,
            buffer: OutputBuffer::new(),
            history: LineHistory::default(),
            fill: BufferFill::default(),
            tail: OutputTail::default(),
            exit_status: ExitStatus::default(),
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Current layout, recompiling first if the format or name changed.
    pub fn layout(&mut self) -> &Layout {
        self.refresh_layout();
        &self.layout
    }

    pub fn exit_status(&self) -> ExitStatus {
        self.exit_status
    }

    /// Percentage from the most recent render (sweep counter when the size
    /// is unknown).
    pub fn percentage(&self) -> i64 {
        self.percentage
    }

    pub fn set_format(&mut self, format: Option<String>) {
        self.options.format = format;
        self.stale = true;
    }

    pub fn set_fields(&mut self, fields: FormatOptions) {
        self.options.fields = fields;
        self.stale = true;
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.options.name = name;
        self.stale = true;
    }

    pub fn set_size(&mut self, size: i64) {
        self.options.size = size;
    }

    pub fn set_initial_offset(&mut self, offset: i64) {
        self.options.initial_offset = offset;
    }

    pub fn set_terminal_size(&mut self, width: usize, height: usize) {
        self.options.width = width;
        self.options.height = height;
    }

    /// Replace the average-rate window; collected history is discarded.
    pub fn set_average_rate_window(&mut self, window_secs: u32) {
        self.options.average_rate_window_secs = window_secs;
        self.window = AverageRateWindow::with_window_secs(window_secs);
    }

    pub fn set_buffer_fill(&mut self, fill: BufferFill) {
        self.fill = fill;
    }

    /// Remember bytes just written, for the `%A` preview.
    pub fn record_output(&mut self, data: &[u8]) {
        self.tail.record(data);
    }

    fn refresh_layout(&mut self) {
        if !self.stale {
            return;
        }
        let directives = self.options.directives();
        self.layout = compile(&directives, self.options.name.as_deref());
        self.scratch.name.set(self.layout.name_label());
        self.stale = false;
        tracing::debug!(
            format = %directives,
            segments = self.layout.segments().len(),
            "layout compiled"
        );
    }

    /// Render one tick.
    ///
    /// Returns `Ok(None)` for a release, the line otherwise. An allocation
    /// failure raises the sticky exit status and skips this tick; the next
    /// call tries again.
    pub fn render(&mut self, request: RenderRequest) -> Result<Option<&str>, RenderError> {
        let (elapsed_secs, since_last, total, is_final) = match request {
            RenderRequest::Release => {
                self.buffer.release();
                return Ok(None);
            }
            RenderRequest::Update {
                elapsed_secs,
                since_last,
                total,
            } => (elapsed_secs, since_last, total, false),
            RenderRequest::Final {
                elapsed_secs,
                total,
            } => (elapsed_secs, 0, total, true),
        };

        self.refresh_layout();

        let (rate, average_rate) = if is_final {
            let rate = whole_run_rate(elapsed_secs, total, self.options.initial_offset);
            self.window.observe(total, elapsed_secs, rate);
            (rate, rate)
        } else {
            let rate = self.smoother.update(elapsed_secs, since_last);
            (rate, self.window.observe(total, elapsed_secs, rate))
        };

        let size_known = self.options.size > 0;
        if !size_known {
            self.sweep.advance(rate);
            self.percentage = i64::from(self.sweep.value());
        } else if self.options.numeric || self.layout.uses(Field::Progress) {
            self.percentage = percentage(total, self.options.size);
        }

        let name_len = self.options.name.as_deref().map_or(0, str::len);
        if let Err(err) = self.buffer.ensure_capacity(self.options.width, name_len) {
            self.exit_status.raise(ExitStatus::DISPLAY_ALLOC);
            tracing::debug!(error = %err, width = self.options.width, "status line skipped");
            return Err(err);
        }

        if self.options.numeric {
            self.render_numeric(elapsed_secs, total);
        } else {
            self.render_fields(elapsed_secs, total, rate, average_rate, is_final);
            self.render_line();
        }
        Ok(self.buffer.as_str())
    }

    fn render_numeric(&mut self, elapsed_secs: f64, total: i64) {
        let uses_timer = self.layout.uses(Field::Timer);
        let uses_bytes = self.layout.uses(Field::Bytes);
        let value = if uses_bytes {
            if self.options.bits {
                total.saturating_mul(8)
            } else {
                total
            }
        } else {
            self.percentage
        };

        let Some(out) = self.buffer.begin() else {
            return;
        };
        if uses_timer {
            let _ = write!(out, "{elapsed_secs:.4} ");
        }
        let _ = writeln!(out, "{value}");
    }

    fn render_fields(
        &mut self,
        elapsed_secs: f64,
        total: i64,
        rate: f64,
        average_rate: f64,
        is_final: bool,
    ) {
        let opts = &self.options;
        let layout = &self.layout;
        let scratch = &mut self.scratch;
        let style = UnitStyle::new(opts.bits, opts.line_mode);
        scratch.clear();

        if layout.uses(Field::Bytes) {
            fields::write_amount(&mut scratch.transferred, total, &style);
        }
        if layout.uses(Field::BufferPercent) {
            fields::write_buffer_percent(&mut scratch.buffer_percent, &self.fill);
        }
        if layout.uses(Field::Timer) {
            fields::write_timer(&mut scratch.timer, elapsed_secs);
        }
        if layout.uses(Field::Rate) {
            fields::write_rate(&mut scratch.rate, rate, &style);
        }
        if layout.uses(Field::AverageRate) {
            fields::write_rate(&mut scratch.average_rate, average_rate, &style);
        }
        if layout.uses(Field::LastOutput) {
            fields::write_last_output(&mut scratch.last_output, &self.tail, layout.last_output_len());
        }

        let wants_eta = layout.uses(Field::Eta) || layout.uses(Field::FinishTime);
        if wants_eta && opts.size > 0 {
            let eta = eta_secs(
                total.saturating_sub(opts.initial_offset),
                opts.size.saturating_sub(opts.initial_offset),
                self.window.average(),
            );
            if layout.uses(Field::Eta) {
                fields::write_eta(&mut scratch.eta, eta, is_final);
            }
            if layout.uses(Field::FinishTime) {
                fields::write_finish_time(&mut scratch.finish_time, Local::now(), eta);
            }
        }

        if layout.uses(Field::Progress) {
            let fill = if opts.size > 0 {
                BarFill::Determinate(self.percentage)
            } else {
                BarFill::Indeterminate(self.sweep.position())
            };
            let static_width = assemble::static_width(layout, scratch);
            bar::write_bar(&mut scratch.progress, fill, opts.width, static_width);
        }
    }

    fn render_line(&mut self) {
        let width = self.options.width;
        let limit = self.buffer.limit();
        let Some(out) = self.buffer.begin() else {
            return;
        };
        let cols = assemble::assemble(out, &self.layout, &self.scratch, limit, width);
        self.history.stabilize(out, cols, width);
    }
}
