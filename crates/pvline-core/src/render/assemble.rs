//! Joining rendered segments into one line.

use unicode_width::UnicodeWidthStr;

use super::fields::Scratch;
use crate::format::{Layout, Segment};

/// Most trailing spaces added to cover a longer previous line.
const MAX_PADDING: usize = 15;

fn segment_text<'a>(segment: &'a Segment, scratch: &'a Scratch) -> &'a str {
    match segment {
        Segment::Literal(text) => text,
        Segment::Fixed(field) | Segment::Variable(field) => scratch.get(*field).as_str(),
    }
}

/// Columns used by everything except the variable-width segments.
pub(crate) fn static_width(layout: &Layout, scratch: &Scratch) -> usize {
    layout
        .segments()
        .iter()
        .filter(|s| !matches!(s, Segment::Variable(_)))
        .map(|s| segment_text(s, scratch).width())
        .sum()
}

/// Append segments to `out` in order. Stops at the first segment that
/// would push the line past `limit` bytes or `width` columns; that segment
/// and everything after it are left out. Returns the line's width.
pub(crate) fn assemble(
    out: &mut String,
    layout: &Layout,
    scratch: &Scratch,
    limit: usize,
    width: usize,
) -> usize {
    let mut cols = 0;
    for segment in layout.segments() {
        let text = segment_text(segment, scratch);
        if text.is_empty() {
            continue;
        }
        let text_cols = text.width();
        if out.len() + text.len() > limit || cols + text_cols > width {
            break;
        }
        out.push_str(text);
        cols += text_cols;
    }
    cols
}

/// Previous line's geometry, used to blank leftovers from a longer line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct LineHistory {
    prev_cols: usize,
    prev_width: usize,
}

impl LineHistory {
    /// Pad `out` (currently `cols` wide) if it is shorter than the previous
    /// line drawn at the same terminal width, then remember this line.
    pub fn stabilize(&mut self, out: &mut String, cols: usize, width: usize) {
        let mut cols = cols;
        if cols < self.prev_cols && width == self.prev_width {
            let pad = (self.prev_cols - cols).min(MAX_PADDING);
            out.extend(std::iter::repeat(' ').take(pad));
            cols += pad;
        }
        self.prev_cols = cols;
        self.prev_width = width;
    }
}
