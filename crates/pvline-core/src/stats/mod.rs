//! Rate statistics carried across render calls.
//!
//! The smoother produces an instantaneous rate from raw ticks, the window
//! turns that into a longer-term average for the ETA, and the sweep animates
//! the bar when the total size is unknown.

mod metrics;
mod smoother;
mod sweep;
mod window;

pub use metrics::{eta_secs, percentage, DURATION_CEILING, PERCENT_CEILING};
pub use smoother::{whole_run_rate, RateSmoother};
pub use sweep::{Sweep, SweepPhase};
pub use window::{AverageRateWindow, HistorySample, DEFAULT_WINDOW_SECS};
