//! Sliding-window average rate over a fixed ring of samples.

/// Default averaging window in seconds.
pub const DEFAULT_WINDOW_SECS: u32 = 30;

/// One point of the rate history.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HistorySample {
    pub elapsed_secs: f64,
    pub total: i64,
}

/// Fixed-capacity ring of history samples.
///
/// Samples are only appended once `interval_secs` has passed since the
/// newest one; when the ring is full the oldest sample is overwritten. The
/// average is taken between the oldest and newest retained samples.
#[derive(Debug, Clone)]
pub struct AverageRateWindow {
    samples: Vec<HistorySample>,
    first: usize,
    last: usize,
    interval_secs: f64,
    primed: bool,
    average: f64,
}

impl AverageRateWindow {
    /// A ring holding `capacity` samples (at least one) taken at least
    /// `interval_secs` apart.
    pub fn new(capacity: usize, interval_secs: f64) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: vec![HistorySample::default(); capacity],
            first: 0,
            last: 0,
            interval_secs: interval_secs.max(0.0),
            primed: false,
            average: 0.0,
        }
    }

    /// Size the ring for an averaging window of `window_secs`.
    ///
    /// Windows of 20s or more sample every 5s; shorter ones every second.
    pub fn with_window_secs(window_secs: u32) -> Self {
        let window = window_secs.max(1) as usize;
        if window >= 20 {
            Self::new(window / 5 + 1, 5.0)
        } else {
            Self::new(window + 1, 1.0)
        }
    }

    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    pub fn interval_secs(&self) -> f64 {
        self.interval_secs
    }

    /// Number of samples currently retained.
    pub fn len(&self) -> usize {
        if !self.primed {
            return 0;
        }
        (self.last + self.capacity() - self.first) % self.capacity() + 1
    }

    pub fn is_empty(&self) -> bool {
        !self.primed
    }

    pub fn average(&self) -> f64 {
        self.average
    }

    /// Retained samples, oldest first.
    pub fn samples(&self) -> impl Iterator<Item = &HistorySample> {
        let cap = self.capacity();
        (0..self.len()).map(move |i| &self.samples[(self.first + i) % cap])
    }

    /// Record a tick and return the windowed average rate.
    pub fn observe(&mut self, total: i64, elapsed_secs: f64, instantaneous: f64) -> f64 {
        if self.primed {
            let newest = self.samples[self.last];
            if elapsed_secs < newest.elapsed_secs + self.interval_secs {
                return self.average;
            }
            let cap = self.capacity();
            self.last = (self.last + 1) % cap;
            if self.last == self.first {
                self.first = (self.first + 1) % cap;
            }
        }
        self.primed = true;
        self.samples[self.last] = HistorySample {
            elapsed_secs,
            total,
        };

        if self.first == self.last {
            self.average = instantaneous;
        } else {
            let oldest = self.samples[self.first];
            let newest = self.samples[self.last];
            let secs = newest.elapsed_secs - oldest.elapsed_secs;
            if secs > 0.0 {
                self.average = (newest.total - oldest.total) as f64 / secs;
            }
        }
        self.average
    }
}

impl Default for AverageRateWindow {
    fn default() -> Self {
        Self::with_window_secs(DEFAULT_WINDOW_SECS)
    }
}
