//! Percentage and ETA.

/// Upper bound on the percentage; a growing input can exceed its stated size.
pub const PERCENT_CEILING: i64 = 100_000;

/// Upper bound on any displayed duration, in seconds (about 11.4 years).
pub const DURATION_CEILING: i64 = 360_000_000;

/// Whole percent of `total` covered by `done`; 0 when `total` is unknown.
pub fn percentage(done: i64, total: i64) -> i64 {
    if total < 1 {
        return 0;
    }
    let pct = i128::from(done) * 100 / i128::from(total);
    pct.clamp(0, i128::from(PERCENT_CEILING)) as i64
}

/// Seconds until `done` reaches `total` at `rate` units per second.
///
/// The rate is truncated to whole units first, so anything below one unit
/// per second counts as stalled and reports 0.
pub fn eta_secs(done: i64, total: i64, rate: f64) -> i64 {
    let whole_rate = if rate.is_finite() { rate as i64 } else { 0 };
    if done < 1 || whole_rate == 0 {
        return 0;
    }
    let left = (i128::from(total) - i128::from(done)) / i128::from(whole_rate);
    left.clamp(0, i128::from(DURATION_CEILING)) as i64
}
