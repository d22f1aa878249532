// ShakeUp - Haptic Motor Driver
//
// Simple GPIO-driven vibration motor.

use std::thread;
use std::time::Duration;

use esp_idf_hal::gpio::{AnyOutputPin, Output, PinDriver};

use shakeup::config::*;

pub struct HapticDriver<'d> {
    pin: PinDriver<'d, AnyOutputPin, Output>,
}

impl<'d> HapticDriver<'d> {
    pub fn new(pin: PinDriver<'d, AnyOutputPin, Output>) -> Self {
        Self { pin }
    }

    /// Short pulse - tactile feedback for button gestures.
    pub fn trigger(&mut self) {
        self.buzz(Duration::from_millis(HAPTIC_CLICK_MS));
    }

    /// Longer pulse that accompanies a shake toast.
    pub fn shake(&mut self) {
        self.buzz(Duration::from_millis(HAPTIC_SHAKE_MS));
    }

    /// Vibrate for a custom duration (blocks the calling thread).
    pub fn buzz(&mut self, duration: Duration) {
        if let Err(e) = self.pin.set_high() {
            log::warn!("Haptic pin error: {}", e);
            return;
        }
        thread::sleep(duration);
        let _ = self.pin.set_low();
    }
}
