// Energy Monitor - Signature Store
//
// Fixed-capacity, append-only store of trained devices.
//
// Entries stay in training order for the lifetime of the process; the order
// matters because identification returns the first match.  Nothing is
// persisted across power cycles.

use heapless::{String, Vec};
use thiserror::Error;

use crate::config::{MAX_DEVICES, NAME_LEN};
use crate::signature::Signature;

/// Device label, truncated to [`NAME_LEN`] characters.
pub type DeviceName = String<NAME_LEN>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("signature store is full ({capacity} devices)")]
    CapacityExceeded { capacity: usize },
}

/// Build a [`DeviceName`], keeping as many leading characters as fit.
pub fn device_name(name: &str) -> DeviceName {
    let mut out = DeviceName::new();
    for ch in name.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

/// A signature accepted by training, with its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainedDevice {
    signature: Signature,
    name: DeviceName,
}

impl TrainedDevice {
    pub fn new(name: &str, signature: Signature) -> Self {
        Self {
            signature,
            name: device_name(name),
        }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

#[derive(Debug, Default, Clone)]
pub struct SignatureStore {
    devices: Vec<TrainedDevice, MAX_DEVICES>,
}

impl SignatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.devices.capacity()
    }

    pub fn is_full(&self) -> bool {
        self.devices.is_full()
    }

    pub fn get(&self, index: usize) -> Option<&TrainedDevice> {
        self.devices.get(index)
    }

    /// Devices in training order.
    pub fn iter(&self) -> impl Iterator<Item = &TrainedDevice> {
        self.devices.iter()
    }

    /// Append a device.  A full store is left untouched.
    pub(crate) fn insert(&mut self, device: TrainedDevice) -> Result<&TrainedDevice, StoreError> {
        let index = self.devices.len();
        self.devices
            .push(device)
            .map_err(|_| StoreError::CapacityExceeded {
                capacity: MAX_DEVICES,
            })?;
        Ok(&self.devices[index])
    }
}
