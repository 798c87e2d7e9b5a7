// Energy Monitor - Monitor Task
//
// Owns the joystick, display, feedback outputs and both buttons.  Every
// ~100 ms it handles button presses, then either trains the next slot or
// runs one monitor iteration (identify or count) and renders the result.

use std::time::{Duration, Instant};

use esp_idf_hal::delay::{Ets, FreeRtos};
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, Input, Output, PinDriver};
use esp_idf_hal::i2c::I2cDriver;

use energymon::config::*;
use energymon::events::{ButtonEvent, Mode, MonitorEvent};
use energymon::input::InputManager;
use energymon::sampling::{Delay, SampleSource};
use energymon::{calibrate, ui, Monitor};

use crate::drivers::display::OledDisplay;
use crate::drivers::feedback::Feedback;
use crate::drivers::joystick::Joystick;

/// Peripherals handed over from `main`.
pub struct Board {
    pub i2c: I2cDriver<'static>,
    pub train_button: PinDriver<'static, AnyIOPin, Input>,
    pub counter_button: PinDriver<'static, AnyIOPin, Input>,
    pub led_train: PinDriver<'static, AnyOutputPin, Output>,
    pub led_found: PinDriver<'static, AnyOutputPin, Output>,
    pub buzzer: PinDriver<'static, AnyOutputPin, Output>,
}

/// Blocking delay for the detection core.  The FreeRTOS tick is 10 ms, so
/// shorter waits (the 1 ms sample spacing) busy-spin instead.
struct BoardDelay;

impl Delay for BoardDelay {
    fn delay_ms(&mut self, ms: u32) {
        if ms < 10 {
            Ets::delay_ms(ms);
        } else {
            FreeRtos::delay_ms(ms);
        }
    }
}

pub fn monitor_task(board: Board) {
    log::info!("Monitor task started");
    if let Err(e) = run(board) {
        log::error!("Monitor task stopped: {:#}", e);
    }
}

fn run(board: Board) -> anyhow::Result<()> {
    let Board {
        i2c,
        train_button,
        counter_button,
        led_train,
        led_found,
        buzzer,
    } = board;
    let mut delay = BoardDelay;

    // ---- Calibration (sensor must rest untouched) --------------------------
    let mut joystick = Joystick::new()?;
    let calibration = calibrate(
        &mut joystick,
        &mut delay,
        CALIBRATION_SAMPLES,
        CALIBRATION_INTERVAL_MS,
    );

    // ---- Display + feedback -----------------------------------------------
    let mut display = OledDisplay::new(i2c);
    display.init()?;
    let mut feedback = Feedback::new(led_train, led_found, buzzer);
    feedback.self_test();

    display.show(|fb| ui::draw_splash(fb))?;
    FreeRtos::delay_ms(SPLASH_DISPLAY_MS);

    let mut monitor = Monitor::new(calibration, MonitorConfig::default(), Instant::now());
    let mut input = InputManager::new(Duration::from_millis(BUTTON_LOCKOUT_MS));
    log::info!("Boot complete (center {})", monitor.calibration().center());

    loop {
        let now = Instant::now();
        let mut trained = false;

        // Buttons are active LOW (pull-up).
        for event in input.update(train_button.is_low(), counter_button.is_low(), now) {
            match event {
                ButtonEvent::ToggleCounter => {
                    monitor.toggle_mode(now);
                    FreeRtos::delay_ms(MODE_SWITCH_SETTLE_MS);
                }
                ButtonEvent::Train if monitor.can_train() => {
                    train_next(&mut monitor, &mut display, &mut feedback, &mut joystick);
                    FreeRtos::delay_ms(TRAIN_COOLDOWN_MS);
                    trained = true;
                }
                ButtonEvent::Train if monitor.mode() == Mode::Counter => {
                    log::debug!("Train ignored in counter mode")
                }
                ButtonEvent::Train => log::debug!("Train ignored while training"),
            }
        }

        if !trained && !monitor.is_training() {
            let event = monitor.poll(&mut joystick, &mut delay, Instant::now());
            if let Err(e) = display.show(|fb| ui::draw_event(fb, &event)) {
                log::error!("Display error: {}", e);
            }
            if let MonitorEvent::Identified { device: Some(_), .. } = event {
                feedback.announce_match();
            }
        }

        FreeRtos::delay_ms(LOOP_INTERVAL_MS);
    }
}

fn train_next(
    monitor: &mut Monitor,
    display: &mut OledDisplay,
    feedback: &mut Feedback,
    joystick: &mut impl SampleSource,
) {
    let mut delay = BoardDelay;
    let Some(name) = monitor.next_training_name() else {
        log::warn!("All {} training slots are used", MAX_DEVICES);
        return;
    };

    feedback.set_training(true);
    if let Err(e) = display.show(|fb| ui::draw_training(fb, name)) {
        log::error!("Display error: {}", e);
    }
    let result = monitor.train(name, joystick, &mut delay).map(|_| ());
    feedback.set_training(false);

    match result {
        Ok(_) => {
            if let Err(e) = display.show(|fb| ui::draw_ready(fb)) {
                log::error!("Display error: {}", e);
            }
            FreeRtos::delay_ms(TRAIN_READY_DISPLAY_MS);
        }
        Err(e) => log::warn!("Training failed: {}", e),
    }
}
