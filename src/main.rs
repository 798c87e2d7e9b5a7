// Energy Monitor - Firmware Entry Point
//
// Boot sequence:
//   1. Initialise logging and take the peripherals.
//   2. Configure buttons (pull-up, active LOW), LEDs and buzzer.
//   3. Bring up the shared I2C bus for the OLED.
//   4. Hand everything to the monitor task, which calibrates the joystick,
//      runs the LED self-test, shows the splash and enters the main loop.
//
// The detection core lives in the `energymon` library and builds on the
// host; this binary only targets ESP-IDF.

#[cfg(target_os = "espidf")]
mod drivers;
#[cfg(target_os = "espidf")]
mod tasks;

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use std::thread;
    use std::time::Duration;

    use esp_idf_hal::gpio::{IOPin, OutputPin, PinDriver, Pull};
    use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
    use esp_idf_hal::prelude::*;

    use energymon::config::*;

    // Link esp-idf-sys runtime patches and initialise logging.
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("Energy Monitor firmware starting...");

    // ---- Peripherals ------------------------------------------------------
    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;

    // Pull configuration needs an input-output pin driver.
    let mut train_button = PinDriver::input(pins.gpio3.downgrade())?;
    train_button.set_pull(Pull::Up)?;
    let mut counter_button = PinDriver::input(pins.gpio4.downgrade())?;
    counter_button.set_pull(Pull::Up)?;

    let mut led_train = PinDriver::output(pins.gpio5.downgrade_output())?;
    let mut led_found = PinDriver::output(pins.gpio20.downgrade_output())?;
    let mut buzzer = PinDriver::output(pins.gpio21.downgrade_output())?;
    led_train.set_low()?;
    led_found.set_low()?;
    buzzer.set_low()?;

    // ---- I2C bus (OLED) ---------------------------------------------------
    let i2c_config = I2cConfig::new().baudrate(I2C_BAUDRATE_KHZ.kHz().into());
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        pins.gpio6, // SDA
        pins.gpio7, // SCL
        &i2c_config,
    )?;

    // ---- Monitor task -----------------------------------------------------
    let board = tasks::monitor::Board {
        i2c,
        train_button,
        counter_button,
        led_train,
        led_found,
        buzzer,
    };
    thread::Builder::new()
        .name("monitor".into())
        .stack_size(STACK_MONITOR)
        .spawn(move || {
            tasks::monitor::monitor_task(board);
        })?;

    // Main thread has nothing left to do - park it forever.
    loop {
        thread::sleep(Duration::from_secs(60));
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("energymon: the firmware only runs on ESP-IDF targets (riscv32imc-esp-espidf)");
}
