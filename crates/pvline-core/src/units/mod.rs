//! Unit scaling and amount formatting.

mod si;
mod size;

pub use si::{si_scale, Prefix, Ratio, Scaled};
pub use size::{size_string, write_size};
