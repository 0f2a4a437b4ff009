//! Progress bar layout.

use crate::stats::PERCENT_CEILING;
use crate::text::{limits, BoundedText};

/// Widest bar interior, leaving room for brackets and the percentage.
const MAX_INTERIOR: usize = limits::PROGRESS - 16;

/// What the bar should show this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BarFill {
    /// Known total: percentage complete.
    Determinate(i64),
    /// Unknown total: marker position, `0..=100`.
    Indeterminate(u32),
}

/// Render the bar into `out` for a line of `width` columns of which
/// `static_width` are taken by the other segments.
///
/// Leaves `out` empty when even the smallest bar would not fit.
pub(crate) fn write_bar(out: &mut BoundedText, fill: BarFill, width: usize, static_width: usize) {
    out.clear();
    let room = width.saturating_sub(static_width);

    match fill {
        BarFill::Determinate(pct) => {
            let pct = pct.clamp(0, PERCENT_CEILING) as usize;
            let label = format!("{pct:>2}%");
            let interior = room.saturating_sub(label.len() + 3).min(MAX_INTERIOR);
            let filled = (interior * pct / 100).min(interior);

            out.push_str("[");
            out.push_repeat('=', filled);
            if filled < interior {
                out.push_str(">");
                out.push_repeat(' ', interior - filled - 1);
            }
            out.push_str("] ");
            out.push_str(&label);
        }
        BarFill::Indeterminate(position) => {
            let interior = room.saturating_sub(5).min(MAX_INTERIOR);
            let lead = interior * (position.min(100) as usize) / 100;

            out.push_str("[");
            out.push_repeat(' ', lead);
            out.push_str("<=>");
            out.push_repeat(' ', interior - lead);
            out.push_str("]");
        }
    }

    if out.width() + static_width > width {
        tracing::trace!(width, static_width, "progress bar does not fit, dropped");
        out.clear();
    }
}
