//! Bouncing percentage for transfers of unknown size.

/// Direction the indeterminate marker is travelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepPhase {
    #[default]
    Ascending,
    Descending,
}

/// Counter cycling `0, 2, ..., 198, 0, ...` while data flows.
///
/// Values up to 100 are the ascending half of the sweep; above 100 the
/// marker travels back, so `position()` mirrors them as `200 - value`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sweep {
    value: u32,
    phase: SweepPhase,
}

impl Sweep {
    const STEP: u32 = 2;
    const TURN: u32 = 100;
    const WRAP: u32 = 200;

    pub fn new() -> Self {
        Self::default()
    }

    /// Step forward when `rate` is positive; stall otherwise.
    pub fn advance(&mut self, rate: f64) {
        if rate > 0.0 {
            self.value += Self::STEP;
        }
        if self.value >= Self::WRAP {
            self.value = 0;
        }
        self.phase = if self.value > Self::TURN {
            SweepPhase::Descending
        } else {
            SweepPhase::Ascending
        };
    }

    /// Raw counter in `0..200`; this is what numeric mode prints.
    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn phase(&self) -> SweepPhase {
        self.phase
    }

    /// Marker position as a percentage of the bar, `0..=100`.
    pub fn position(&self) -> u32 {
        match self.phase {
            SweepPhase::Ascending => self.value,
            SweepPhase::Descending => Self::WRAP - self.value,
        }
    }
}
