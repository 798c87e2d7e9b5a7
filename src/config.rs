// Energy Monitor - Hardware & System Configuration
// Target: Seeed Studio Xiao ESP32-C3 (RISC-V) with an analog joystick sensor

use std::time::Duration;

// ---------------------------------------------------------------------------
// GPIO Pin Definitions (Xiao ESP32-C3 pinout)
// ---------------------------------------------------------------------------
pub const PIN_JOYSTICK_ADC: i32 = 2; // D0/A0 - Joystick X axis (ADC1 channel 2)
pub const PIN_BUTTON_TRAIN: i32 = 3; // D1    - "A" button, train (INPUT_PULLUP, active LOW)
pub const PIN_BUTTON_COUNTER: i32 = 4; // D2  - "B" button, counter mode (INPUT_PULLUP, active LOW)
pub const PIN_LED_TRAIN: i32 = 5; // D3       - Training in progress LED
pub const PIN_I2C_SDA: i32 = 6; // D4         - I2C data line
pub const PIN_I2C_SCL: i32 = 7; // D5         - I2C clock line
pub const PIN_LED_FOUND: i32 = 20; // D7      - Device identified LED
pub const PIN_BUZZER: i32 = 21; // D6         - Active buzzer

// ---------------------------------------------------------------------------
// I2C Bus
// ---------------------------------------------------------------------------
pub const I2C_ADDR_OLED: u8 = 0x3C;
pub const I2C_BAUDRATE_KHZ: u32 = 400;
pub const I2C_TIMEOUT_TICKS: u32 = 1000; // FreeRTOS ticks

// ---------------------------------------------------------------------------
// Display (SSD1306 OLED)
// ---------------------------------------------------------------------------
pub const SCREEN_WIDTH: u32 = 128;
pub const SCREEN_HEIGHT: u32 = 64;
pub const DISPLAY_BUFFER_SIZE: usize = (SCREEN_WIDTH as usize * SCREEN_HEIGHT as usize) / 8; // 1024

// ---------------------------------------------------------------------------
// Task Stack Sizes (bytes)
// ---------------------------------------------------------------------------
pub const STACK_MONITOR: usize = 8192;

// ---------------------------------------------------------------------------
// Timing (milliseconds)
// ---------------------------------------------------------------------------
pub const CALIBRATION_INTERVAL_MS: u32 = 10; // Spacing of the calibration burst
pub const SAMPLE_INTERVAL_MS: u32 = 1; // Spacing inside one signature capture
pub const LOOP_INTERVAL_MS: u32 = 100; // Main polling cadence
pub const COUNTER_TICK_MS: u64 = 1000; // Counter accumulates once per second
pub const BUTTON_LOCKOUT_MS: u64 = 500; // Debounce lockout after an accepted press
pub const MODE_SWITCH_SETTLE_MS: u32 = 500;
pub const TRAIN_READY_DISPLAY_MS: u32 = 500; // "Ready!" screen after training
pub const TRAIN_COOLDOWN_MS: u32 = 1000;
pub const MATCH_BEEP_MS: u32 = 200;
pub const MATCH_LED_HOLD_MS: u32 = 300; // Found LED stays lit after the beep
pub const LED_SELF_TEST_MS: u32 = 1000;
pub const SPLASH_DISPLAY_MS: u32 = 1000;

// ---------------------------------------------------------------------------
// Detection Parameters
// ---------------------------------------------------------------------------
pub const MAX_SAMPLES: usize = 24; // Samples per signature
pub const MAX_DEVICES: usize = 3; // Trainable devices
pub const NAME_LEN: usize = 7; // Visible characters kept per device name
pub const THRESHOLD: u32 = 1000; // Distance below which two signatures match
pub const CALIBRATION_SAMPLES: usize = 10;
pub const TOLERANCE: u16 = 50; // Joystick deadzone around the calibrated center
pub const COUNTER_LIMIT: u32 = 10_000;

/// Names handed out to training slots, in store order.
pub const TRAINING_NAMES: [&str; MAX_DEVICES] = ["Geladeira", "TV", "Lamp"];

/// Label shown when no trained device matches.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Runtime-tunable detection parameters.
///
/// Defaults mirror the constants above; tests and bench setups override
/// individual fields.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Minimum deviation from the calibrated center that registers.
    pub deadzone: u16,
    /// Exclusive upper bound on signature distance for a match.
    pub threshold: u32,
    /// Ceiling of the counter-mode accumulator.
    pub counter_limit: u32,
    /// Minimum monotonic time between two counter ticks.
    pub counter_interval: Duration,
    /// Delay between consecutive samples of one capture.
    pub sample_interval_ms: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            deadzone: TOLERANCE,
            threshold: THRESHOLD,
            counter_limit: COUNTER_LIMIT,
            counter_interval: Duration::from_millis(COUNTER_TICK_MS),
            sample_interval_ms: SAMPLE_INTERVAL_MS,
        }
    }
}
