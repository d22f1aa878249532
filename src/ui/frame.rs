// ShakeUp - Frame Buffer
//
// 1-bit off-screen buffer in SSD1306 page layout: byte `x + (y / 8) * WIDTH`,
// bit `y % 8`. Rendering draws here; the OLED driver streams `as_bytes()`
// to the panel in one transfer.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::config::*;

pub struct FrameBuffer {
    buf: [u8; DISPLAY_BUFFER_SIZE],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self {
            buf: [0; DISPLAY_BUFFER_SIZE],
        }
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn pixel(&self, x: u32, y: u32) -> bool {
        match Self::index(x, y) {
            Some((i, bit)) => self.buf[i] & bit != 0,
            None => false,
        }
    }

    pub fn lit_pixels(&self) -> u32 {
        self.buf.iter().map(|b| b.count_ones()).sum()
    }

    /// Number of lit pixels inside a horizontal band of rows `[top, bottom)`.
    pub fn lit_pixels_in_rows(&self, top: u32, bottom: u32) -> u32 {
        let mut count = 0;
        for y in top..bottom.min(SCREEN_HEIGHT) {
            for x in 0..SCREEN_WIDTH {
                if self.pixel(x, y) {
                    count += 1;
                }
            }
        }
        count
    }

    fn index(x: u32, y: u32) -> Option<(usize, u8)> {
        if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return None;
        }
        let i = x as usize + (y as usize / 8) * SCREEN_WIDTH as usize;
        Some((i, 1 << (y % 8)))
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
            if point.x < 0 || point.y < 0 {
                continue;
            }
            if let Some((i, bit)) = Self::index(point.x as u32, point.y as u32) {
                if color.is_on() {
                    self.buf[i] |= bit;
                } else {
                    self.buf[i] &= !bit;
                }
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.buf.fill(if color.is_on() { 0xFF } else { 0x00 });
        Ok(())
    }
}
