// Energy Monitor - LED & Buzzer Feedback
//
// Two status LEDs and an active buzzer, all plain GPIO outputs.

use std::thread;
use std::time::Duration;

use esp_idf_hal::gpio::{AnyOutputPin, Output, PinDriver};

use energymon::config::*;

type OutPin = PinDriver<'static, AnyOutputPin, Output>;

pub struct Feedback {
    led_train: OutPin,
    led_found: OutPin,
    buzzer: OutPin,
}

impl Feedback {
    pub fn new(led_train: OutPin, led_found: OutPin, buzzer: OutPin) -> Self {
        Self {
            led_train,
            led_found,
            buzzer,
        }
    }

    /// Light both LEDs for a moment at boot (blocks the calling thread).
    pub fn self_test(&mut self) {
        log::info!("Testing LEDs...");
        let _ = self.led_train.set_high();
        let _ = self.led_found.set_high();
        thread::sleep(Duration::from_millis(u64::from(LED_SELF_TEST_MS)));
        let _ = self.led_train.set_low();
        let _ = self.led_found.set_low();
    }

    pub fn set_training(&mut self, on: bool) {
        let _ = if on {
            self.led_train.set_high()
        } else {
            self.led_train.set_low()
        };
    }

    /// Found LED + short beep.  Blocks for the whole pattern.
    pub fn announce_match(&mut self) {
        let _ = self.led_found.set_high();
        let _ = self.buzzer.set_high();
        thread::sleep(Duration::from_millis(u64::from(MATCH_BEEP_MS)));
        let _ = self.buzzer.set_low();
        thread::sleep(Duration::from_millis(u64::from(MATCH_LED_HOLD_MS)));
        let _ = self.led_found.set_low();
    }
}
