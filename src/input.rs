// ShakeUp - Button Input Manager
//
// Debounced button handler with single-click, double-click, and long-press
// detection.  Designed to be polled at ~100 Hz from the UI task; the caller
// reads the pin and passes its level in, which keeps the gesture logic free
// of any GPIO type.

use std::sync::mpsc::Sender;

use crate::config::*;
use crate::events::UiEvent;

pub struct InputManager {
    ui_tx: Sender<UiEvent>,

    // Debounce state
    last_raw: bool,
    last_debounce: u32,

    // Press tracking
    press_start: Option<u32>,
    button_down: bool,
    long_press_sent: bool,

    // Double-click state machine
    waiting_for_second_click: bool,
    first_click_time: u32,
}

impl InputManager {
    pub fn new(ui_tx: Sender<UiEvent>, now_ms: u32) -> Self {
        Self {
            ui_tx,
            last_raw: false,
            last_debounce: now_ms,
            press_start: None,
            button_down: false,
            long_press_sent: false,
            waiting_for_second_click: false,
            first_click_time: now_ms,
        }
    }

    /// Call every ~10 ms with the current button level (`true` = pressed).
    pub fn update(&mut self, pressed_raw: bool, now: u32) {
        // ---- debounce filter ----
        if pressed_raw != self.last_raw {
            self.last_debounce = now;
        }
        self.last_raw = pressed_raw;

        if now.wrapping_sub(self.last_debounce) < DEBOUNCE_MS {
            // Signal still bouncing - wait.
            self.check_double_click_timeout(now);
            return;
        }

        let pressed = pressed_raw;

        // ---- button pressed edge ----
        if pressed && !self.button_down {
            self.button_down = true;
            self.long_press_sent = false;
            self.press_start = Some(now);
        }

        // ---- long press fires while still held ----
        if pressed && self.button_down && !self.long_press_sent {
            let hold_ms = self.press_start.map(|t| now.wrapping_sub(t)).unwrap_or(0);
            if hold_ms >= LONG_PRESS_MS {
                self.long_press_sent = true;
                self.waiting_for_second_click = false;
                self.send(UiEvent::ButtonLongPress);
            }
        }

        // ---- button released edge ----
        if !pressed && self.button_down {
            self.button_down = false;
            self.press_start = None;

            if self.long_press_sent {
                // Already reported while held.
            } else if self.waiting_for_second_click {
                // Second click within window -> double-click
                self.send(UiEvent::ButtonDoubleClick);
                self.waiting_for_second_click = false;
            } else {
                // First short click - start double-click window
                self.waiting_for_second_click = true;
                self.first_click_time = now;
            }
        }

        self.check_double_click_timeout(now);
    }

    /// If the double-click window expires, emit a single-click.
    fn check_double_click_timeout(&mut self, now: u32) {
        if self.waiting_for_second_click
            && now.wrapping_sub(self.first_click_time) > DOUBLE_CLICK_WINDOW_MS
        {
            self.send(UiEvent::ButtonSingleClick);
            self.waiting_for_second_click = false;
        }
    }

    fn send(&self, event: UiEvent) {
        if self.ui_tx.send(event).is_err() {
            log::warn!("UI channel closed - dropping {:?}", event);
        }
    }
}
