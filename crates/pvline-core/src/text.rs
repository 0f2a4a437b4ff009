//! Fixed-capacity text buffers for rendered fields.
//!
//! Each field kind has a maximum length in bytes. Writes past the limit are
//! truncated on a character boundary, so a field can never grow without
//! bound regardless of its input.

use std::fmt;

use unicode_width::UnicodeWidthStr;

/// Field capacities in bytes.
pub mod limits {
    pub const NAME: usize = 512;
    pub const TRANSFERRED: usize = 128;
    pub const BUFFER_PERCENT: usize = 16;
    pub const TIMER: usize = 128;
    pub const RATE: usize = 128;
    pub const AVERAGE_RATE: usize = 128;
    pub const PROGRESS: usize = 1024;
    pub const LAST_OUTPUT: usize = 512;
    pub const ETA: usize = 128;
    pub const FINISH_TIME: usize = 128;
}

/// A string that never holds more than `max` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedText {
    buf: String,
    max: usize,
}

impl BoundedText {
    pub fn with_max(max: usize) -> Self {
        Self {
            buf: String::with_capacity(max),
            max,
        }
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Replace the contents, truncating to capacity.
    pub fn set(&mut self, s: &str) {
        self.buf.clear();
        self.push_str(s);
    }

    /// Append as much of `s` as fits. Returns false if anything was cut.
    pub fn push_str(&mut self, s: &str) -> bool {
        let room = self.max - self.buf.len();
        if s.len() <= room {
            self.buf.push_str(s);
            return true;
        }
        let mut cut = room;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        self.buf.push_str(&s[..cut]);
        false
    }

    /// Append `count` copies of `ch`, stopping at capacity.
    pub fn push_repeat(&mut self, ch: char, count: usize) {
        let room = (self.max - self.buf.len()) / ch.len_utf8();
        self.buf.extend(std::iter::repeat(ch).take(count.min(room)));
    }

    /// Overwrite every character with a space, keeping the column count.
    pub fn blank(&mut self) {
        let cols = self.width();
        self.buf.clear();
        self.push_repeat(' ', cols);
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Width in terminal columns.
    pub fn width(&self) -> usize {
        self.buf.width()
    }
}

impl fmt::Write for BoundedText {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        // Truncation is silent.
        self.push_str(s);
        Ok(())
    }
}
