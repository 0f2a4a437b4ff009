//! Synthetic transfer samples for driving the renderer in tests.

/// One tick as the copy loop would report it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub elapsed_secs: f64,
    pub since_last: i64,
    pub total: i64,
}

/// A transfer moving `bytes_per_tick` every `tick_secs` until `size` bytes
/// have moved. The last sample may be short.
pub fn steady(size: i64, bytes_per_tick: i64, tick_secs: f64) -> Vec<Sample> {
    let mut samples = Vec::new();
    let mut total = 0;
    let mut tick = 0u32;
    while total < size {
        tick += 1;
        let step = bytes_per_tick.min(size - total);
        total += step;
        samples.push(Sample {
            elapsed_secs: f64::from(tick) * tick_secs,
            since_last: step,
            total,
        });
    }
    samples
}

/// `count` ticks of `tick_secs` each with nothing moving.
pub fn stalled(after: &Sample, count: u32, tick_secs: f64) -> Vec<Sample> {
    (1..=count)
        .map(|i| Sample {
            elapsed_secs: after.elapsed_secs + f64::from(i) * tick_secs,
            since_last: 0,
            total: after.total,
        })
        .collect()
}
