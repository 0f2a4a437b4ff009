pub mod config;
pub mod display;
pub mod error;
pub mod format;
pub mod logging;
pub mod render;
pub mod stats;
pub mod term;
pub mod text;
pub mod units;
