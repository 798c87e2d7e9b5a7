// Energy Monitor - Calibration & Normalization
//
// Joystick rest-position calibration and per-sample normalization.
//
// The sensor idles somewhere near mid-scale, but the exact rest value varies
// per board.  At boot a short burst of readings is averaged into a
// `Calibration`; afterwards every raw reading is turned into a distance
// from that center, with small deviations swallowed by a deadzone.

use crate::sampling::{Delay, SampleSource};

/// Baseline computed once at startup.  There is no re-calibration path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    center: u16,
}

impl Calibration {
    /// Use a known center, e.g. from a bench setup.
    pub const fn from_center(center: u16) -> Self {
        Self { center }
    }

    pub const fn center(&self) -> u16 {
        self.center
    }
}

/// Average `n` raw readings spaced `interval_ms` apart.
///
/// Integer division truncates.  `n == 0` is treated as a single reading.
pub fn calibrate<S, D>(source: &mut S, delay: &mut D, n: usize, interval_ms: u32) -> Calibration
where
    S: SampleSource + ?Sized,
    D: Delay + ?Sized,
{
    let n = n.max(1);
    let mut sum: u64 = 0;
    for _ in 0..n {
        sum += u64::from(source.read());
        delay.delay_ms(interval_ms);
    }
    // The mean of u16 values always fits in u16.
    let center = (sum / n as u64) as u16;
    log::info!("Joystick center: {}", center);
    Calibration { center }
}

/// Distance of `raw` from `center`, or 0 inside the deadzone.
pub fn normalize(raw: u16, center: u16, deadzone: u16) -> u16 {
    let delta = raw.abs_diff(center);
    if delta < deadzone {
        0
    } else {
        delta
    }
}

/// Normalizes live readings against a fixed calibration.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    calibration: Calibration,
    deadzone: u16,
}

impl Normalizer {
    pub fn new(calibration: Calibration, deadzone: u16) -> Self {
        Self {
            calibration,
            deadzone,
        }
    }

    pub fn calibration(&self) -> Calibration {
        self.calibration
    }

    /// Read once from `source` and normalize.
    pub fn sample<S: SampleSource + ?Sized>(&self, source: &mut S) -> u16 {
        self.apply(source.read())
    }

    pub fn apply(&self, raw: u16) -> u16 {
        normalize(raw, self.calibration.center, self.deadzone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::{Constant, NoDelay, ReplaySource};
    use rstest::rstest;

    #[test]
    fn test_calibrate_constant_input() {
        let mut delay = NoDelay::default();
        let cal = calibrate(&mut Constant(2000), &mut delay, 10, 10);
        assert_eq!(cal.center(), 2000);
        assert_eq!(delay.total_ms, 100);
    }

    #[test]
    fn test_calibrate_truncates_average() {
        let mut source = ReplaySource::new(&[10, 11, 11]);
        let cal = calibrate(&mut source, &mut NoDelay::default(), 3, 0);
        // 32 / 3 = 10.67
        assert_eq!(cal.center(), 10);
        assert_eq!(source.reads(), 3);
    }

    #[test]
    fn test_calibrate_zero_samples_reads_once() {
        let mut source = ReplaySource::new(&[1234, 9]);
        let cal = calibrate(&mut source, &mut NoDelay::default(), 0, 0);
        assert_eq!(cal.center(), 1234);
        assert_eq!(source.reads(), 1);
    }

    #[test]
    fn test_calibrate_full_scale_does_not_overflow() {
        let cal = calibrate(&mut Constant(u16::MAX), &mut NoDelay::default(), 1000, 0);
        assert_eq!(cal.center(), u16::MAX);
    }

    #[rstest]
    #[case(2000, 0)]
    #[case(2049, 0)]
    #[case(1951, 0)]
    #[case(2050, 50)]
    #[case(1950, 50)]
    #[case(2200, 200)]
    #[case(0, 2000)]
    #[case(4095, 2095)]
    fn test_normalize_deadzone(#[case] raw: u16, #[case] expected: u16) {
        assert_eq!(normalize(raw, 2000, 50), expected);
    }

    #[test]
    fn test_normalize_every_reading_near_center() {
        let center = 1800;
        let deadzone = 50;
        for raw in (center - (deadzone - 1))..=(center + (deadzone - 1)) {
            assert_eq!(normalize(raw, center, deadzone), 0, "raw = {}", raw);
        }
        for raw in (0..=(center - deadzone)).chain((center + deadzone)..=4095) {
            assert_eq!(normalize(raw, center, deadzone), raw.abs_diff(center));
        }
    }

    #[test]
    fn test_zero_deadzone_passes_everything() {
        assert_eq!(normalize(2001, 2000, 0), 1);
        assert_eq!(normalize(2000, 2000, 0), 0);
    }

    #[test]
    fn test_normalizer_samples_source() {
        let normalizer = Normalizer::new(Calibration::from_center(2000), 50);
        let mut source = ReplaySource::new(&[2010, 2300, 1500]);
        assert_eq!(normalizer.sample(&mut source), 0);
        assert_eq!(normalizer.sample(&mut source), 300);
        assert_eq!(normalizer.sample(&mut source), 500);
    }
}
