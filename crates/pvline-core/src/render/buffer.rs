//! Growable output buffer for the assembled line.

use crate::error::RenderError;

/// Columns of headroom beyond twice the terminal width.
const BASE_BYTES: usize = 80;
/// Extra bytes reserved past the assembly limit for trailing padding.
const SLACK_BYTES: usize = 16;

/// Owns the line buffer. Grows when the terminal widens, never shrinks while
/// in use, and is freed on release.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    text: Option<String>,
    limit: usize,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembly limit for a terminal `width` and a name of `name_len` bytes.
    pub fn required(width: usize, name_len: usize) -> Option<usize> {
        width
            .checked_mul(2)?
            .checked_add(BASE_BYTES)?
            .checked_add(name_len)
    }

    /// Make sure the buffer can hold a line for `width` columns.
    ///
    /// On failure the existing buffer, if any, is left untouched.
    pub fn ensure_capacity(&mut self, width: usize, name_len: usize) -> Result<(), RenderError> {
        let limit = Self::required(width, name_len).ok_or(RenderError::SizeOverflow { width })?;
        let wanted = limit
            .checked_add(SLACK_BYTES)
            .ok_or(RenderError::SizeOverflow { width })?;

        let have = self.text.as_ref().map_or(0, String::capacity);
        if self.text.is_some() && have >= wanted {
            return Ok(());
        }

        let mut grown = String::new();
        grown
            .try_reserve_exact(wanted)
            .map_err(|source| RenderError::Allocation {
                requested: wanted,
                source,
            })?;
        tracing::debug!(from = have, to = wanted, width, "output buffer resized");
        self.text = Some(grown);
        self.limit = limit;
        Ok(())
    }

    /// Free the buffer. Safe to call repeatedly.
    pub fn release(&mut self) {
        if self.text.take().is_some() {
            tracing::debug!("output buffer released");
        }
        self.limit = 0;
    }

    pub fn is_allocated(&self) -> bool {
        self.text.is_some()
    }

    /// Bytes a line may occupy before padding.
    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn capacity(&self) -> usize {
        self.text.as_ref().map_or(0, String::capacity)
    }

    /// Cleared buffer ready for a new line.
    pub fn begin(&mut self) -> Option<&mut String> {
        let text = self.text.as_mut()?;
        text.clear();
        Some(text)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.text.as_deref()
    }
}
