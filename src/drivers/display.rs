// ShakeUp - SSD1306 OLED Driver
//
// Register-level driver over the shared I2C bus. The screen is rendered into
// an off-screen frame buffer and pushed to the panel in horizontal
// addressing mode, one page row of 128 bytes per transfer.

use shakeup::config::*;
use shakeup::ui::{render_centered_text, render_screen, FrameBuffer, ScreenModel};

use super::{lock_bus, SharedBus};

const CONTROL_CMD: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

const CMD_DISPLAY_OFF: u8 = 0xAE;
const CMD_DISPLAY_ON: u8 = 0xAF;
const CMD_NOP: u8 = 0xE3;

const INIT_SEQUENCE: &[u8] = &[
    CMD_DISPLAY_OFF,
    0xD5, 0x80, // clock divide / oscillator
    0xA8, 0x3F, // multiplex 1/64
    0xD3, 0x00, // display offset 0
    0x40,       // start line 0
    0x8D, 0x14, // charge pump on
    0x20, 0x00, // horizontal addressing
    0xA1,       // segment remap
    0xC8,       // COM scan descending
    0xDA, 0x12, // COM pins
    0x81, 0xCF, // contrast
    0xD9, 0xF1, // pre-charge
    0xDB, 0x40, // VCOMH deselect
    0xA4,       // resume from RAM
    0xA6,       // normal (not inverted)
    CMD_DISPLAY_ON,
];

pub struct OledDisplay {
    bus: SharedBus,
    frame: FrameBuffer,
}

impl OledDisplay {
    pub fn new(bus: SharedBus) -> Self {
        Self {
            bus,
            frame: FrameBuffer::new(),
        }
    }

    pub fn init(&mut self) -> anyhow::Result<()> {
        for cmd in INIT_SEQUENCE {
            self.command(*cmd)?;
        }
        log::info!("SSD1306 initialised ({}x{})", SCREEN_WIDTH, SCREEN_HEIGHT);
        self.flush()
    }

    pub fn is_connected(&self) -> bool {
        self.command(CMD_NOP).is_ok()
    }

    pub fn show_screen(&mut self, screen: &ScreenModel) -> anyhow::Result<()> {
        render_screen(screen, &mut self.frame).unwrap_or_else(|e| match e {});
        self.flush()
    }

    pub fn show_centered_text(&mut self, text: &str) -> anyhow::Result<()> {
        render_centered_text(text, &mut self.frame).unwrap_or_else(|e| match e {});
        self.flush()
    }

    pub fn turn_off(&mut self) -> anyhow::Result<()> {
        self.command(CMD_DISPLAY_OFF)
    }

    pub fn turn_on(&mut self) -> anyhow::Result<()> {
        self.command(CMD_DISPLAY_ON)
    }

    fn command(&self, cmd: u8) -> anyhow::Result<()> {
        let mut bus = lock_bus(self.bus)?;
        bus.write(I2C_ADDR_OLED, &[CONTROL_CMD, cmd], I2C_TIMEOUT_TICKS)?;
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        // Full-screen column and page window.
        for cmd in [0x21, 0x00, (SCREEN_WIDTH - 1) as u8, 0x22, 0x00, (SCREEN_HEIGHT / 8 - 1) as u8] {
            self.command(cmd)?;
        }

        let mut bus = lock_bus(self.bus)?;
        let mut packet = [0u8; SCREEN_WIDTH as usize + 1];
        packet[0] = CONTROL_DATA;
        for page in self.frame.as_bytes().chunks(SCREEN_WIDTH as usize) {
            packet[1..=page.len()].copy_from_slice(page);
            bus.write(I2C_ADDR_OLED, &packet[..=page.len()], I2C_TIMEOUT_TICKS)?;
        }
        Ok(())
    }
}
