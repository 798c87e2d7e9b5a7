// Energy Monitor - Identification
//
// Matching a fresh signature against the trained set.
//
// Devices are scanned in training order and the first one closer than the
// threshold wins, even if a later device would be closer.  Distance
// accumulation stops early once it is past the threshold.

use crate::config::UNKNOWN_LABEL;
use crate::signature::Signature;
use crate::store::{SignatureStore, TrainedDevice};

/// Outcome of one identification pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identification<'a> {
    Match {
        index: usize,
        device: &'a TrainedDevice,
        distance: u32,
    },
    Unknown,
}

impl<'a> Identification<'a> {
    pub fn matched(&self) -> bool {
        matches!(self, Self::Match { .. })
    }

    /// Device name, or [`UNKNOWN_LABEL`].
    pub fn name(&self) -> &'a str {
        match self {
            Self::Match { device, .. } => device.name(),
            Self::Unknown => UNKNOWN_LABEL,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Identifier {
    threshold: u32,
}

impl Identifier {
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    pub fn identify<'a>(
        &self,
        store: &'a SignatureStore,
        current: &Signature,
    ) -> Identification<'a> {
        for (index, device) in store.iter().enumerate() {
            let distance = current.distance_within(device.signature(), self.threshold);
            log::debug!("{}: distance {}", device.name(), distance);
            if distance < self.threshold {
                log::info!("Identified: {}", device.name());
                return Identification::Match {
                    index,
                    device,
                    distance,
                };
            }
        }
        Identification::Unknown
    }
}
