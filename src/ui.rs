// Energy Monitor - Screens
//
// Every screen clears the target and draws a few lines of 6x10 text.  The
// target is any monochrome `DrawTarget`; on the device that is the SSD1306
// frame buffer below, flushed over I2C by the display driver.

use core::convert::Infallible;
use core::fmt::Write;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use heapless::String;

use crate::config::*;
use crate::events::MonitorEvent;

// Text rows (top baseline), matching the 8/24/40 layout of the splash.
const ROW_1: Point = Point::new(8, 8);
const ROW_2: Point = Point::new(8, 24);
const ROW_3: Point = Point::new(8, 40);

fn style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyle::new(&FONT_6X10, BinaryColor::On)
}

fn line<D>(target: &mut D, text: &str, at: Point) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Text::with_baseline(text, at, style(), Baseline::Top).draw(target)?;
    Ok(())
}

/// Boot splash with the button legend.
pub fn draw_splash<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(BinaryColor::Off)?;
    line(target, "Energy Mon", ROW_1)?;
    line(target, "A: Train", ROW_2)?;
    line(target, "B: Counter", ROW_3)
}

/// Shown while a signature is being captured for `name`.
pub fn draw_training<D>(target: &mut D, name: &str) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(BinaryColor::Off)?;
    line(target, "Train:", ROW_1)?;
    line(target, name, Point::new(48, 8))
}

pub fn draw_ready<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(BinaryColor::Off)?;
    line(target, "Ready!", ROW_1)
}

/// Render the outcome of one monitor iteration.
pub fn draw_event<D>(target: &mut D, event: &MonitorEvent) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let mut text: String<24> = String::new();
    target.clear(BinaryColor::Off)?;
    match event {
        MonitorEvent::Identified { level, device } => {
            let _ = write!(text, "X: {}", level);
            line(target, &text, ROW_1)?;
            let name = device.as_ref().map(|n| n.as_str()).unwrap_or(UNKNOWN_LABEL);
            line(target, name, ROW_2)
        }
        MonitorEvent::Counter { total, .. } => {
            let _ = write!(text, "Total: {}", total);
            line(target, &text, ROW_1)
        }
    }
}

// ---------------------------------------------------------------------------
// SSD1306 frame buffer (page layout: 8 vertical pixels per byte)
// ---------------------------------------------------------------------------
pub struct FrameBuffer {
    buf: [u8; DISPLAY_BUFFER_SIZE],
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            buf: [0; DISPLAY_BUFFER_SIZE],
        }
    }

    /// Raw bytes in controller order, ready to stream to GDDRAM.
    pub fn as_bytes(&self) -> &[u8; DISPLAY_BUFFER_SIZE] {
        &self.buf
    }

    pub fn pixel(&self, x: u32, y: u32) -> bool {
        if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return false;
        }
        let idx = (x + (y / 8) * SCREEN_WIDTH) as usize;
        self.buf[idx] & (1 << (y % 8)) != 0
    }

    pub fn lit_pixels(&self) -> u32 {
        self.buf.iter().map(|b| b.count_ones()).sum()
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            // Off-screen pixels are clipped silently.
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as u32, point.y as u32);
            if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
                continue;
            }
            let idx = (x + (y / 8) * SCREEN_WIDTH) as usize;
            let mask = 1u8 << (y % 8);
            if color.is_on() {
                self.buf[idx] |= mask;
            } else {
                self.buf[idx] &= !mask;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::device_name;

    fn rows_lit(fb: &FrameBuffer, rows: core::ops::Range<u32>) -> u32 {
        rows.flat_map(|y| (0..SCREEN_WIDTH).map(move |x| (x, y)))
            .filter(|&(x, y)| fb.pixel(x, y))
            .count() as u32
    }

    #[test]
    fn test_frame_buffer_page_layout() {
        let mut fb = FrameBuffer::new();
        fb.draw_iter([Pixel(Point::new(3, 9), BinaryColor::On)]).unwrap();
        assert!(fb.pixel(3, 9));
        // Second page, bit 1
        assert_eq!(fb.as_bytes()[SCREEN_WIDTH as usize + 3], 0b0000_0010);
        fb.draw_iter([Pixel(Point::new(3, 9), BinaryColor::Off)]).unwrap();
        assert_eq!(fb.lit_pixels(), 0);
    }

    #[test]
    fn test_frame_buffer_clips_off_screen() {
        let mut fb = FrameBuffer::new();
        fb.draw_iter([
            Pixel(Point::new(-1, 0), BinaryColor::On),
            Pixel(Point::new(0, 64), BinaryColor::On),
            Pixel(Point::new(128, 0), BinaryColor::On),
        ])
        .unwrap();
        assert_eq!(fb.lit_pixels(), 0);
    }

    #[test]
    fn test_splash_uses_three_rows() {
        let mut fb = FrameBuffer::new();
        draw_splash(&mut fb).unwrap();
        assert!(rows_lit(&fb, 8..18) > 0);
        assert!(rows_lit(&fb, 24..34) > 0);
        assert!(rows_lit(&fb, 40..50) > 0);
        assert_eq!(rows_lit(&fb, 0..8), 0);
    }

    #[test]
    fn test_screens_clear_previous_content() {
        let mut fb = FrameBuffer::new();
        draw_splash(&mut fb).unwrap();
        draw_ready(&mut fb).unwrap();
        assert!(rows_lit(&fb, 8..18) > 0);
        assert_eq!(rows_lit(&fb, 24..64), 0);
    }

    #[test]
    fn test_identified_screen_shows_name_row() {
        let mut fb = FrameBuffer::new();
        let event = MonitorEvent::Identified {
            level: 120,
            device: Some(device_name("TV")),
        };
        draw_event(&mut fb, &event).unwrap();
        assert!(rows_lit(&fb, 8..18) > 0);
        assert!(rows_lit(&fb, 24..34) > 0);
    }

    #[test]
    fn test_counter_screen_single_row() {
        let mut fb = FrameBuffer::new();
        let event = MonitorEvent::Counter {
            level: 0,
            total: 9995,
            ticked: true,
        };
        draw_event(&mut fb, &event).unwrap();
        assert!(rows_lit(&fb, 8..18) > 0);
        assert_eq!(rows_lit(&fb, 20..64), 0);
    }

    #[test]
    fn test_training_screen_draws_name() {
        let mut blank = FrameBuffer::new();
        draw_training(&mut blank, "").unwrap();
        let mut named = FrameBuffer::new();
        draw_training(&mut named, "Geladei").unwrap();
        assert!(named.lit_pixels() > blank.lit_pixels());
    }
}
