// Energy Monitor - Signal-Fingerprint Device Identifier
//
// An analog sensor is calibrated once at boot, then sampled in short bursts.
// Each burst is a `signature::Signature`; up to `config::MAX_DEVICES`
// of them can be trained under a name and later recognized again by a
// bounded sum-of-absolute-differences match.  A second mode accumulates the
// sensor level into a saturating counter once per second.
//
// The library is target-independent.  The ESP32 firmware in `main.rs`
// provides the ADC, delay, display and feedback peripherals.

pub mod calibration;
pub mod config;
pub mod counter;
pub mod events;
pub mod identify;
pub mod input;
pub mod monitor;
pub mod sampling;
pub mod signature;
pub mod store;
pub mod trainer;
pub mod ui;

pub use calibration::{calibrate, normalize, Calibration, Normalizer};
pub use counter::{tick, CounterAccumulator};
pub use events::{ButtonEvent, Mode, MonitorEvent};
pub use identify::{Identification, Identifier};
pub use monitor::Monitor;
pub use sampling::{Delay, SampleSource};
pub use signature::{capture, Signature};
pub use store::{DeviceName, SignatureStore, StoreError, TrainedDevice};
pub use trainer::{TrainError, Trainer};
