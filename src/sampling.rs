// Energy Monitor - Sampling Seam
//
// The detection core never touches peripherals directly.  It reads raw ADC
// values through `SampleSource` and waits through `Delay`; the firmware wires
// both to ESP-IDF, tests wire them to recorded data.

/// A raw analog reading provider (12-bit ADC counts on the target).
pub trait SampleSource {
    /// Take one reading.  Assumed always ready.
    fn read(&mut self) -> u16;
}

/// Blocking delay primitive.
pub trait Delay {
    fn delay_ms(&mut self, ms: u32);
}

/// Replays a recorded sequence of readings, wrapping around at the end.
///
/// Used for bench replays and tests.  An empty recording reads as 0.
#[derive(Debug, Clone)]
pub struct ReplaySource<'a> {
    readings: &'a [u16],
    pos: usize,
}

impl<'a> ReplaySource<'a> {
    pub fn new(readings: &'a [u16]) -> Self {
        Self { readings, pos: 0 }
    }

    /// Total number of reads served so far.
    pub fn reads(&self) -> usize {
        self.pos
    }
}

impl SampleSource for ReplaySource<'_> {
    fn read(&mut self) -> u16 {
        if self.readings.is_empty() {
            return 0;
        }
        let value = self.readings[self.pos % self.readings.len()];
        self.pos += 1;
        value
    }
}

/// A constant reading, e.g. a sensor resting at its center.
#[derive(Debug, Clone, Copy)]
pub struct Constant(pub u16);

impl SampleSource for Constant {
    fn read(&mut self) -> u16 {
        self.0
    }
}

/// Delay that only records how long it was asked to wait.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay {
    pub total_ms: u64,
}

impl Delay for NoDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += u64::from(ms);
    }
}
