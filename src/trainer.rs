// Energy Monitor - Trainer
//
// Training: capture a signature and file it under a name.

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

use crate::signature::Signature;
use crate::store::{SignatureStore, StoreError, TrainedDevice};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrainError {
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Training is only offered while identifying.
    #[error("training is disabled in counter mode")]
    CounterMode,
}

/// The only writer of the [`SignatureStore`].
///
/// Raises a "training in progress" flag around each capture; the monitor
/// loop holds off identification and further training while it is set.
#[derive(Debug, Default)]
pub struct Trainer {
    in_progress: AtomicBool,
}

impl Trainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_training(&self) -> bool {
        self.in_progress.load(Ordering::SeqCst)
    }

    /// Capture with `capture_fn` and append the result as `name`.
    ///
    /// A full store is reported before anything is captured.
    pub fn train<'s, F>(
        &self,
        store: &'s mut SignatureStore,
        name: &str,
        capture_fn: F,
    ) -> Result<&'s TrainedDevice, TrainError>
    where
        F: FnOnce() -> Signature,
    {
        if store.is_full() {
            log::warn!(
                "Training {} refused: store is full ({} devices)",
                name,
                store.capacity()
            );
            return Err(StoreError::CapacityExceeded {
                capacity: store.capacity(),
            }
            .into());
        }

        log::info!("Training {}", name);
        self.in_progress.store(true, Ordering::SeqCst);
        let signature = capture_fn();
        let result = store.insert(TrainedDevice::new(name, signature));
        self.in_progress.store(false, Ordering::SeqCst);

        let device = result?;
        log::info!("Training complete: {}", device.name());
        Ok(device)
    }
}
