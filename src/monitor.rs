// Energy Monitor - Monitor Context
//
// The monitor context: everything the polling loop mutates, in one place.
//
// Constructed once after calibration and owned by the loop.  Store and
// counter are only reachable through `&mut Monitor`, so there is exactly one
// mutation domain for each.

use std::time::Instant;

use crate::calibration::{Calibration, Normalizer};
use crate::config::{MonitorConfig, TRAINING_NAMES};
use crate::counter::CounterAccumulator;
use crate::events::{Mode, MonitorEvent};
use crate::identify::{Identification, Identifier};
use crate::sampling::{Delay, SampleSource};
use crate::signature::{capture, Signature};
use crate::store::{device_name, SignatureStore, TrainedDevice};
use crate::trainer::{TrainError, Trainer};

pub struct Monitor {
    config: MonitorConfig,
    normalizer: Normalizer,
    store: SignatureStore,
    trainer: Trainer,
    identifier: Identifier,
    counter: CounterAccumulator,
    mode: Mode,
}

impl Monitor {
    pub fn new(calibration: Calibration, config: MonitorConfig, now: Instant) -> Self {
        Self {
            normalizer: Normalizer::new(calibration, config.deadzone),
            store: SignatureStore::new(),
            trainer: Trainer::new(),
            identifier: Identifier::new(config.threshold),
            counter: CounterAccumulator::new(now, config.counter_interval, config.counter_limit),
            mode: Mode::default(),
            config,
        }
    }

    pub fn calibration(&self) -> Calibration {
        self.normalizer.calibration()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn store(&self) -> &SignatureStore {
        &self.store
    }

    pub fn counter_total(&self) -> u32 {
        self.counter.total()
    }

    pub fn is_training(&self) -> bool {
        self.trainer.is_training()
    }

    /// Training is accepted in identification mode when no capture is running.
    pub fn can_train(&self) -> bool {
        self.mode == Mode::Identify && !self.is_training()
    }

    /// Switch between identification and counter mode.  Restarts the counter.
    pub fn toggle_mode(&mut self, now: Instant) -> Mode {
        self.mode = self.mode.toggled();
        self.counter.reset(now);
        log::info!("Mode: {}", self.mode.display_name());
        self.mode
    }

    /// Name the next training slot would get, if any slot is left.
    pub fn next_training_name(&self) -> Option<&'static str> {
        TRAINING_NAMES.get(self.store.len()).copied()
    }

    /// Capture one signature from `source`.
    pub fn capture<S, D>(&self, source: &mut S, delay: &mut D) -> Signature
    where
        S: SampleSource + ?Sized,
        D: Delay + ?Sized,
    {
        capture(&self.normalizer, source, delay, self.config.sample_interval_ms)
    }

    /// Train `name` from a fresh capture.
    pub fn train<S, D>(
        &mut self,
        name: &str,
        source: &mut S,
        delay: &mut D,
    ) -> Result<&TrainedDevice, TrainError>
    where
        S: SampleSource + ?Sized,
        D: Delay + ?Sized,
    {
        if self.mode == Mode::Counter {
            return Err(TrainError::CounterMode);
        }
        let normalizer = self.normalizer;
        let interval = self.config.sample_interval_ms;
        self.trainer.train(&mut self.store, name, || {
            capture(&normalizer, source, delay, interval)
        })
    }

    /// Train the next free slot under its default name.
    pub fn train_next<S, D>(
        &mut self,
        source: &mut S,
        delay: &mut D,
    ) -> Result<&TrainedDevice, TrainError>
    where
        S: SampleSource + ?Sized,
        D: Delay + ?Sized,
    {
        // A full store has no default name left; `train` reports the refusal.
        let name = self.next_training_name().unwrap_or("");
        self.train(name, source, delay)
    }

    /// Match a signature against the trained set.
    pub fn identify(&self, current: &Signature) -> Identification<'_> {
        self.identifier.identify(&self.store, current)
    }

    /// One loop iteration: capture, read the live level, then identify or count.
    pub fn poll<S, D>(&mut self, source: &mut S, delay: &mut D, now: Instant) -> MonitorEvent
    where
        S: SampleSource + ?Sized,
        D: Delay + ?Sized,
    {
        let current = self.capture(source, delay);
        let level = self.normalizer.sample(source);

        match self.mode {
            Mode::Counter => {
                let ticked = self.counter.poll(now, level);
                MonitorEvent::Counter {
                    level,
                    total: self.counter.total(),
                    ticked,
                }
            }
            Mode::Identify => {
                let device = match self.identify(&current) {
                    Identification::Match { device, .. } => Some(device_name(device.name())),
                    Identification::Unknown => None,
                };
                MonitorEvent::Identified { level, device }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MAX_DEVICES, MAX_SAMPLES};
    use crate::sampling::{Constant, NoDelay};
    use crate::store::StoreError;
    use std::time::Duration;

    fn monitor(now: Instant) -> Monitor {
        Monitor::new(Calibration::from_center(2000), MonitorConfig::default(), now)
    }

    #[test]
    fn test_default_names_follow_slots() {
        let mut m = monitor(Instant::now());
        let mut delay = NoDelay::default();
        let names: Vec<String> = (0..MAX_DEVICES)
            .map(|i| {
                m.train_next(&mut Constant(2000 + 100 * i as u16), &mut delay)
                    .unwrap()
                    .name()
                    .to_string()
            })
            .collect();
        assert_eq!(names, ["Geladei", "TV", "Lamp"]);
        assert_eq!(m.next_training_name(), None);

        let err = m.train_next(&mut Constant(2000), &mut delay).unwrap_err();
        assert_eq!(
            err,
            TrainError::Store(StoreError::CapacityExceeded {
                capacity: MAX_DEVICES
            })
        );
        assert_eq!(m.store().len(), MAX_DEVICES);
    }

    #[test]
    fn test_poll_identifies_trained_device() {
        let now = Instant::now();
        let mut m = monitor(now);
        let mut delay = NoDelay::default();
        m.train_next(&mut Constant(2300), &mut delay).unwrap();

        let event = m.poll(&mut Constant(2300), &mut delay, now);
        assert!(event.matched());
        assert_eq!(
            event,
            MonitorEvent::Identified {
                level: 300,
                device: Some(device_name("Geladeira")),
            }
        );

        let event = m.poll(&mut Constant(2000), &mut delay, now);
        assert_eq!(event, MonitorEvent::Identified { level: 0, device: None });
    }

    #[test]
    fn test_poll_reads_one_extra_sample() {
        let mut m = monitor(Instant::now());
        let mut delay = NoDelay::default();
        let mut source = crate::sampling::ReplaySource::new(&[2000]);
        m.poll(&mut source, &mut delay, Instant::now());
        assert_eq!(source.reads(), MAX_SAMPLES + 1);
        assert_eq!(delay.total_ms, MAX_SAMPLES as u64);
    }

    #[test]
    fn test_counter_mode_accumulates_per_second() {
        let t0 = Instant::now();
        let mut m = monitor(t0);
        let mut delay = NoDelay::default();
        assert_eq!(m.toggle_mode(t0), Mode::Counter);

        let mut totals = Vec::new();
        for step in 1..=25u64 {
            let now = t0 + Duration::from_millis(step * 100);
            match m.poll(&mut Constant(2400), &mut delay, now) {
                MonitorEvent::Counter { total, .. } => totals.push(total),
                other => panic!("expected counter event, got {:?}", other),
            }
        }
        assert_eq!(totals[8], 0);
        assert_eq!(totals[9], 400);
        assert_eq!(totals[19], 800);
        assert_eq!(m.counter_total(), 800);
    }

    #[test]
    fn test_toggle_resets_counter() {
        let t0 = Instant::now();
        let mut m = monitor(t0);
        let mut delay = NoDelay::default();
        m.toggle_mode(t0);
        m.poll(&mut Constant(2400), &mut delay, t0 + Duration::from_secs(1));
        assert_eq!(m.counter_total(), 400);

        assert_eq!(m.toggle_mode(t0 + Duration::from_secs(2)), Mode::Identify);
        assert_eq!(m.counter_total(), 0);
        m.toggle_mode(t0 + Duration::from_secs(3));
        assert_eq!(m.counter_total(), 0);
    }

    #[test]
    fn test_training_refused_in_counter_mode() {
        let t0 = Instant::now();
        let mut m = monitor(t0);
        m.toggle_mode(t0);
        let err = m.train_next(&mut Constant(2000), &mut NoDelay::default()).unwrap_err();
        assert_eq!(err, TrainError::CounterMode);
        assert!(m.store().is_empty());
    }

    #[test]
    fn test_can_train_follows_mode() {
        let t0 = Instant::now();
        let mut m = monitor(t0);
        assert!(m.can_train());
        assert!(!m.is_training());

        m.toggle_mode(t0);
        assert!(!m.can_train());
        m.toggle_mode(t0);
        assert!(m.can_train());
    }

    #[test]
    fn test_not_training_after_train_returns() {
        let mut m = monitor(Instant::now());
        m.train_next(&mut Constant(2300), &mut NoDelay::default()).unwrap();
        assert!(!m.is_training());
        assert!(m.can_train());
    }
}
