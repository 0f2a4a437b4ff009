//! Per-field text renderers.

use std::fmt::Write;

use chrono::{DateTime, Local, TimeDelta};

use crate::format::{Field, MAX_LAST_OUTPUT};
use crate::stats::{percentage, DURATION_CEILING};
use crate::text::{limits, BoundedText};
use crate::units::{write_size, Ratio};

const SECS_PER_DAY: i64 = 86_400;
/// Absolute ETAs further out than this include the date.
const DATE_THRESHOLD_SECS: i64 = 6 * 3600;

const TIME_OF_DAY: &str = "%H:%M:%S";
const DATE_AND_TIME: &str = "%Y-%m-%d %H:%M:%S";

/// State of the transfer buffer between the reader and the writer, as
/// reported by the copy loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferFill {
    /// Buffer size in bytes; 0 when unknown.
    pub size: u64,
    pub read_position: u64,
    pub write_position: u64,
    /// Data is moving without passing through the buffer.
    pub zero_copy: bool,
}

/// How amounts are labelled: bytes, bits, or bare line counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct UnitStyle {
    pub multiplier: f64,
    pub amount_unit: &'static str,
    pub rate_unit: &'static str,
    pub ratio: Ratio,
}

impl UnitStyle {
    pub fn new(bits: bool, line_mode: bool) -> Self {
        if line_mode {
            Self {
                multiplier: 1.0,
                amount_unit: "",
                rate_unit: "/s",
                ratio: Ratio::Decimal,
            }
        } else if bits {
            Self {
                multiplier: 8.0,
                amount_unit: "b",
                rate_unit: "b/s",
                ratio: Ratio::Binary,
            }
        } else {
            Self {
                multiplier: 1.0,
                amount_unit: "B",
                rate_unit: "B/s",
                ratio: Ratio::Binary,
            }
        }
    }
}

/// The last bytes written to the output, kept for `%A`.
#[derive(Debug, Clone, Default)]
pub struct OutputTail {
    bytes: Vec<u8>,
}

impl OutputTail {
    pub fn record(&mut self, data: &[u8]) {
        if data.len() >= MAX_LAST_OUTPUT {
            self.bytes.clear();
            self.bytes
                .extend_from_slice(&data[data.len() - MAX_LAST_OUTPUT..]);
            return;
        }
        let overflow = (self.bytes.len() + data.len()).saturating_sub(MAX_LAST_OUTPUT);
        self.bytes.drain(..overflow);
        self.bytes.extend_from_slice(data);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Rendered text for every fixed field plus the progress bar.
#[derive(Debug, Clone)]
pub(crate) struct Scratch {
    pub name: BoundedText,
    pub transferred: BoundedText,
    pub buffer_percent: BoundedText,
    pub timer: BoundedText,
    pub rate: BoundedText,
    pub average_rate: BoundedText,
    pub progress: BoundedText,
    pub last_output: BoundedText,
    pub eta: BoundedText,
    pub finish_time: BoundedText,
}

impl Scratch {
    pub fn new() -> Self {
        Self {
            name: BoundedText::with_max(limits::NAME),
            transferred: BoundedText::with_max(limits::TRANSFERRED),
            buffer_percent: BoundedText::with_max(limits::BUFFER_PERCENT),
            timer: BoundedText::with_max(limits::TIMER),
            rate: BoundedText::with_max(limits::RATE),
            average_rate: BoundedText::with_max(limits::AVERAGE_RATE),
            progress: BoundedText::with_max(limits::PROGRESS),
            last_output: BoundedText::with_max(limits::LAST_OUTPUT),
            eta: BoundedText::with_max(limits::ETA),
            finish_time: BoundedText::with_max(limits::FINISH_TIME),
        }
    }

    /// Clear every field except the name, which only changes on recompile.
    pub fn clear(&mut self) {
        self.transferred.clear();
        self.buffer_percent.clear();
        self.timer.clear();
        self.rate.clear();
        self.average_rate.clear();
        self.progress.clear();
        self.last_output.clear();
        self.eta.clear();
        self.finish_time.clear();
    }

    pub fn get(&self, field: Field) -> &BoundedText {
        match field {
            Field::Progress => &self.progress,
            Field::Timer => &self.timer,
            Field::Eta => &self.eta,
            Field::FinishTime => &self.finish_time,
            Field::LastOutput => &self.last_output,
            Field::Rate => &self.rate,
            Field::AverageRate => &self.average_rate,
            Field::Bytes => &self.transferred,
            Field::BufferPercent => &self.buffer_percent,
            Field::Name => &self.name,
        }
    }
}

/// `h:mm:ss`, or `d:hh:mm:ss` past one day.
fn write_duration(out: &mut BoundedText, secs: i64) {
    let secs = secs.clamp(0, DURATION_CEILING);
    if secs > SECS_PER_DAY {
        let _ = write!(
            out,
            "{}:{:02}:{:02}:{:02}",
            secs / SECS_PER_DAY,
            (secs / 3600) % 24,
            (secs / 60) % 60,
            secs % 60
        );
    } else {
        let _ = write!(out, "{}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60);
    }
}

pub(crate) fn write_timer(out: &mut BoundedText, elapsed_secs: f64) {
    out.clear();
    let secs = if elapsed_secs.is_finite() {
        elapsed_secs.clamp(0.0, DURATION_CEILING as f64) as i64
    } else {
        0
    };
    write_duration(out, secs);
}

/// `ETA h:mm:ss`; blanked to the same width on the final update.
pub(crate) fn write_eta(out: &mut BoundedText, eta_secs: i64, is_final: bool) {
    out.clear();
    out.push_str("ETA ");
    write_duration(out, eta_secs);
    if is_final {
        out.blank();
    }
}

/// `ETA HH:MM:SS` at `now + eta_secs`, with the date when more than six
/// hours away. Blank if the clock time cannot be represented.
pub(crate) fn write_finish_time(out: &mut BoundedText, now: DateTime<Local>, eta_secs: i64) {
    out.clear();
    let pattern = if eta_secs > DATE_THRESHOLD_SECS {
        DATE_AND_TIME
    } else {
        TIME_OF_DAY
    };
    let then = TimeDelta::try_seconds(eta_secs).and_then(|d| now.checked_add_signed(d));
    match then {
        Some(then) => {
            let _ = write!(out, "ETA {}", then.format(pattern));
        }
        None => {
            // "ETA " plus the width the pattern would have produced.
            let cols = if pattern == DATE_AND_TIME { 23 } else { 12 };
            out.push_repeat(' ', cols);
        }
    }
}

/// `{ 42%}` of the transfer buffer in use, or `{----}` when bypassed.
pub(crate) fn write_buffer_percent(out: &mut BoundedText, fill: &BufferFill) {
    out.clear();
    if fill.zero_copy {
        out.push_str("{----}");
        return;
    }
    if fill.size == 0 {
        return;
    }
    let used = fill.read_position.saturating_sub(fill.write_position);
    let pct = percentage(
        i64::try_from(used).unwrap_or(i64::MAX),
        i64::try_from(fill.size).unwrap_or(i64::MAX),
    );
    let _ = write!(out, "{{{pct:>3}%}}");
}

/// The last `len` bytes written, with anything unprintable shown as `.`.
/// Positions not yet written are also `.`.
pub(crate) fn write_last_output(out: &mut BoundedText, tail: &OutputTail, len: usize) {
    out.clear();
    let bytes = tail.as_bytes();
    let shown = &bytes[bytes.len().saturating_sub(len)..];
    out.push_repeat('.', len - shown.len());
    for &b in shown {
        let c = if b.is_ascii_graphic() || b == b' ' {
            char::from(b)
        } else {
            '.'
        };
        out.push_repeat(c, 1);
    }
}

pub(crate) fn write_amount(out: &mut BoundedText, total: i64, style: &UnitStyle) {
    let amount = total as f64 * style.multiplier;
    write_size(out, amount, style.amount_unit, style.ratio, "", "");
}

pub(crate) fn write_rate(out: &mut BoundedText, rate: f64, style: &UnitStyle) {
    write_size(out, rate * style.multiplier, style.rate_unit, style.ratio, "[", "]");
}
