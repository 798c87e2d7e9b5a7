// Energy Monitor - Signatures
//
// Fixed-length signal signatures and the distance metric between them.
//
// A signature is the temporal profile of the sensor over a short burst: `N`
// normalized magnitudes taken at a fixed cadence.  Two signatures are
// compared by the sum of absolute per-position differences.

use crate::calibration::Normalizer;
use crate::config::MAX_SAMPLES;
use crate::sampling::{Delay, SampleSource};

/// An ordered burst of `N` normalized magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature<const N: usize = MAX_SAMPLES> {
    samples: [u16; N],
}

impl<const N: usize> Signature<N> {
    pub const fn new(samples: [u16; N]) -> Self {
        Self { samples }
    }

    /// A flat signature (sensor at rest for the whole burst).
    pub const fn zeroed() -> Self {
        Self { samples: [0; N] }
    }

    pub fn samples(&self) -> &[u16; N] {
        &self.samples
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Full sum of absolute differences.
    pub fn distance(&self, other: &Self) -> u32 {
        self.samples
            .iter()
            .zip(other.samples.iter())
            .map(|(&a, &b)| u32::from(a.abs_diff(b)))
            .sum()
    }

    /// Sum of absolute differences, abandoned once it exceeds `limit`.
    ///
    /// Returns the partial sum at the point of abandonment, so the result is
    /// `> limit` exactly when [`Signature::distance`] is.  Every term is
    /// non-negative, hence the partial sum can only grow.
    pub fn distance_within(&self, other: &Self, limit: u32) -> u32 {
        let mut diff: u32 = 0;
        for (&a, &b) in self.samples.iter().zip(other.samples.iter()) {
            diff = diff.saturating_add(u32::from(a.abs_diff(b)));
            if diff > limit {
                break;
            }
        }
        diff
    }
}

impl<const N: usize> Default for Signature<N> {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Capture exactly `N` normalized samples, `interval_ms` apart.
///
/// Runs to completion; there is no partial capture.
pub fn capture<S, D, const N: usize>(
    normalizer: &Normalizer,
    source: &mut S,
    delay: &mut D,
    interval_ms: u32,
) -> Signature<N>
where
    S: SampleSource + ?Sized,
    D: Delay + ?Sized,
{
    let mut samples = [0u16; N];
    for slot in samples.iter_mut() {
        *slot = normalizer.sample(source);
        delay.delay_ms(interval_ms);
    }
    Signature { samples }
}
