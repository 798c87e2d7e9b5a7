// Energy Monitor - SSD1306 OLED Driver
//
// Register-level driver over I2C.  Screens are drawn into an in-memory
// `FrameBuffer` and streamed to the panel in one go.

use core::convert::Infallible;

use esp_idf_hal::i2c::I2cDriver;

use energymon::config::*;
use energymon::ui::FrameBuffer;

// Control bytes
const CONTROL_CMD: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

// Bytes of pixel data per I2C transaction
const DATA_CHUNK: usize = 16;

const INIT_SEQUENCE: &[u8] = &[
    0xAE, // display off
    0xD5, 0x80, // clock divide
    0xA8, 0x3F, // multiplex 64
    0xD3, 0x00, // display offset
    0x40, // start line 0
    0x8D, 0x14, // charge pump on
    0x20, 0x00, // horizontal addressing
    0xA1, // segment remap
    0xC8, // COM scan descending
    0xDA, 0x12, // COM pins
    0x81, 0xCF, // contrast
    0xD9, 0xF1, // pre-charge
    0xDB, 0x40, // VCOMH deselect
    0xA4, // resume from RAM
    0xA6, // normal (not inverted)
    0xAF, // display on
];

pub struct OledDisplay {
    i2c: I2cDriver<'static>,
    frame: FrameBuffer,
}

impl OledDisplay {
    pub fn new(i2c: I2cDriver<'static>) -> Self {
        Self {
            i2c,
            frame: FrameBuffer::new(),
        }
    }

    pub fn init(&mut self) -> anyhow::Result<()> {
        for &cmd in INIT_SEQUENCE {
            self.command(cmd)?;
        }
        self.flush()?;
        log::info!("SSD1306 initialised ({}x{})", SCREEN_WIDTH, SCREEN_HEIGHT);
        Ok(())
    }

    /// Draw a screen into the frame buffer and push it to the panel.
    pub fn show<F>(&mut self, draw: F) -> anyhow::Result<()>
    where
        F: FnOnce(&mut FrameBuffer) -> Result<(), Infallible>,
    {
        match draw(&mut self.frame) {
            Ok(()) => {}
            Err(never) => match never {},
        }
        self.flush()
    }

    fn command(&mut self, cmd: u8) -> anyhow::Result<()> {
        self.i2c
            .write(I2C_ADDR_OLED, &[CONTROL_CMD, cmd], I2C_TIMEOUT_TICKS)?;
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        // Full-screen column and page window
        for cmd in [0x21, 0, (SCREEN_WIDTH - 1) as u8, 0x22, 0, (SCREEN_HEIGHT / 8 - 1) as u8] {
            self.command(cmd)?;
        }

        let mut packet = [0u8; DATA_CHUNK + 1];
        packet[0] = CONTROL_DATA;
        for chunk in self.frame.as_bytes().chunks(DATA_CHUNK) {
            packet[1..=chunk.len()].copy_from_slice(chunk);
            self.i2c
                .write(I2C_ADDR_OLED, &packet[..=chunk.len()], I2C_TIMEOUT_TICKS)?;
        }
        Ok(())
    }
}
