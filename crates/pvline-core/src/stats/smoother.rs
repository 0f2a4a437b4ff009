//! Instantaneous rate with short-interval carry.

/// Ticks closer together than this are folded into the next one.
const MIN_UPDATE_SECS: f64 = 0.01;

/// Smallest elapsed time used when averaging over a whole run.
const MIN_ELAPSED_SECS: f64 = 0.000_001;

/// Turns bursty per-tick deltas into a stable rate.
///
/// When two updates land within 10ms of each other the amount is carried
/// over and the previous rate is reported again, which avoids dividing by a
/// near-zero interval.
#[derive(Debug, Clone, Default)]
pub struct RateSmoother {
    last_update_secs: f64,
    carried: i64,
    last_rate: f64,
}

impl RateSmoother {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one tick and return the current rate in units per second.
    pub fn update(&mut self, elapsed_secs: f64, since_last: i64) -> f64 {
        let interval = elapsed_secs - self.last_update_secs;
        if interval <= MIN_UPDATE_SECS {
            self.carried = self.carried.saturating_add(since_last);
            return self.last_rate;
        }

        let rate = (self.carried as f64 + since_last as f64) / interval;
        self.carried = 0;
        self.last_update_secs = elapsed_secs;
        self.last_rate = rate;
        rate
    }

    pub fn last_rate(&self) -> f64 {
        self.last_rate
    }

    /// Amount waiting for the next update that is far enough away.
    pub fn carried(&self) -> i64 {
        self.carried
    }
}

/// Average rate over a whole run, used for the final update.
pub fn whole_run_rate(elapsed_secs: f64, total: i64, initial_offset: i64) -> f64 {
    let elapsed = elapsed_secs.max(MIN_ELAPSED_SECS);
    (total as f64 - initial_offset as f64) / elapsed
}
