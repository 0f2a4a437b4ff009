//! Building a directive string from on/off field switches.

use serde::{Deserialize, Serialize};

/// Which fields to show when no explicit format string is given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub progress: bool,
    pub timer: bool,
    pub eta: bool,
    /// Absolute ETA as a clock time.
    pub finish_time: bool,
    pub rate: bool,
    pub average_rate: bool,
    pub bytes: bool,
    pub buffer_percent: bool,
    /// Show this many of the most recently written bytes (0 = off).
    pub last_written: u32,
    pub name: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            progress: true,
            timer: true,
            eta: true,
            finish_time: false,
            rate: true,
            average_rate: false,
            bytes: true,
            buffer_percent: false,
            last_written: 0,
            name: false,
        }
    }
}

impl FormatOptions {
    /// Everything off; useful as a starting point for explicit selections.
    pub fn none() -> Self {
        Self {
            progress: false,
            timer: false,
            eta: false,
            finish_time: false,
            rate: false,
            average_rate: false,
            bytes: false,
            buffer_percent: false,
            last_written: 0,
            name: false,
        }
    }

    /// The directive string for the enabled fields, space separated.
    pub fn to_format_string(&self) -> String {
        let parts = [
            (self.name, "%N"),
            (self.bytes, "%b"),
            (self.buffer_percent, "%T"),
            (self.timer, "%t"),
            (self.rate, "%r"),
            (self.average_rate, "%a"),
            (self.progress, "%p"),
            (self.eta, "%e"),
            (self.finish_time, "%I"),
        ];
        let mut out: Vec<String> = parts
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, d)| (*d).to_owned())
            .collect();
        if self.last_written > 0 {
            out.push(format!("%{}A", self.last_written));
        }
        out.join(" ")
    }
}
