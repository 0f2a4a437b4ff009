//! Errors surfaced by the renderer.
//!
//! Only the output buffer can fail; every other degenerate input is resolved
//! by clamping or literal passthrough.

use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// The requested buffer size does not fit in `usize`.
    #[error("buffer allocation failed: size for width {width} overflows")]
    SizeOverflow { width: usize },
    /// The allocator refused to grow the output buffer.
    #[error("buffer allocation failed: {requested} bytes: {source}")]
    Allocation {
        requested: usize,
        #[source]
        source: TryReserveError,
    },
}

/// Sticky process exit-status bits raised by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExitStatus(u8);

impl ExitStatus {
    /// The output buffer could not be allocated at least once.
    pub const DISPLAY_ALLOC: u8 = 64;

    pub fn raise(&mut self, bits: u8) {
        self.0 |= bits;
    }

    pub fn code(self) -> u8 {
        self.0
    }

    pub fn is_ok(self) -> bool {
        self.0 == 0
    }
}
