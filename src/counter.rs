// Energy Monitor - Counter Mode
//
// Counter mode: a saturating running total, advanced once per interval.
//
// The monitor loop polls much faster than the counter ticks; each poll
// offers a sample and the accumulator only takes it when a full interval of
// monotonic time has passed since the previous tick.

use std::time::{Duration, Instant};

/// Add `delta` unless the sum would go past `ceiling`.
///
/// An increment that does not fit is dropped whole; the total is never
/// clamped up to the ceiling.
pub fn tick(total: u32, delta: u32, ceiling: u32) -> u32 {
    match total.checked_add(delta) {
        Some(sum) if sum <= ceiling => sum,
        _ => total,
    }
}

#[derive(Debug, Clone)]
pub struct CounterAccumulator {
    total: u32,
    last_tick: Instant,
    interval: Duration,
    ceiling: u32,
}

impl CounterAccumulator {
    pub fn new(now: Instant, interval: Duration, ceiling: u32) -> Self {
        Self {
            total: 0,
            last_tick: now,
            interval,
            ceiling,
        }
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Zero the total and restart the interval at `now`.
    pub fn reset(&mut self, now: Instant) {
        self.total = 0;
        self.last_tick = now;
    }

    /// Offer a sample.  Returns `true` when an interval elapsed and a tick
    /// happened (whether or not the increment fit under the ceiling).
    pub fn poll(&mut self, now: Instant, delta: u16) -> bool {
        if now.saturating_duration_since(self.last_tick) < self.interval {
            return false;
        }
        let before = self.total;
        self.total = tick(self.total, u32::from(delta), self.ceiling);
        if self.total == before && delta > 0 {
            log::debug!("Counter increment {} dropped at {}", delta, before);
        }
        self.last_tick = now;
        true
    }
}
