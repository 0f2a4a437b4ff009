//! CLI command handlers, one per file.

mod layout;
mod replay;

pub use layout::run_layout;
pub use replay::{run_replay, ReplaySettings};
