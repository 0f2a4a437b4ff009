//! The `%` directive mini-language.
//!
//! | Directive | Field |
//! |---|---|
//! | `%p` | progress bar, fills the remaining width |
//! | `%t` | elapsed time |
//! | `%e` | ETA countdown |
//! | `%I` | ETA as clock time |
//! | `%<n>A` | last `n` bytes written |
//! | `%r` / `%a` | current / average rate |
//! | `%b` | amount transferred |
//! | `%T` | transfer buffer fill |
//! | `%N` | transfer name |
//! | `%%` | literal `%` |

mod compile;
mod field;
mod options;

pub use compile::{compile, name_label, Layout, Segment, MAX_LAST_OUTPUT, MAX_SEGMENTS};
pub use field::{Field, FieldSet};
pub use options::FormatOptions;
