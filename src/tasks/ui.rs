// ShakeUp - UI Task
//
// Owns the screen session, OLED display, haptic motor, and button input
// manager. Every state change of the screen happens on this thread: sensor
// samples, button gestures and the inactivity timeout all arrive through one
// channel.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, Input, Output, PinDriver};

use shakeup::config::*;
use shakeup::events::UiEvent;
use shakeup::input::InputManager;
use shakeup::session::ShakeSession;

use crate::drivers::display::OledDisplay;
use crate::drivers::haptic::HapticDriver;
use crate::drivers::SharedBus;
use crate::tasks::sensor::ListenerGate;

#[allow(clippy::too_many_arguments)]
pub fn ui_task(
    bus: SharedBus,
    button_pin: PinDriver<'static, AnyIOPin, Input>,
    haptic_pin: PinDriver<'static, AnyOutputPin, Output>,
    hub: ListenerGate,
    ui_rx: Receiver<UiEvent>,
    ui_tx: Sender<UiEvent>,
    screen_paused: Arc<AtomicBool>,
    last_input_ms: Arc<AtomicU32>,
) {
    log::info!("UI task started");

    let mut display = OledDisplay::new(bus);
    let mut haptic = HapticDriver::new(haptic_pin);
    let mut input = InputManager::new(ui_tx, crate::now_ms());
    let mut session = ShakeSession::new(hub, crate::now_ms());

    let poll_interval = Duration::from_millis(UI_POLL_INTERVAL_MS);

    loop {
        // 1. Poll the button (active LOW with pull-up).
        input.update(button_pin.is_low(), crate::now_ms());

        // 2. Drain all pending UI events (non-blocking).
        while let Ok(event) = ui_rx.try_recv() {
            let now = crate::now_ms();

            if event.is_button() {
                last_input_ms.store(now, Ordering::Relaxed);
                haptic.trigger();

                // First press after a timeout only wakes the screen.
                if session.is_paused() {
                    session.on_resume();
                    screen_paused.store(false, Ordering::SeqCst);
                    if let Err(e) = display.turn_on() {
                        log::error!("Display error: {}", e);
                    }
                    continue;
                }
            }

            match event {
                UiEvent::Sample(sample) => {
                    if session.on_sample(sample, now).is_some() && session.shake_toasts_enabled() {
                        haptic.shake();
                    }
                }

                UiEvent::ButtonSingleClick => session.toggle_sensing(now),

                UiEvent::ButtonDoubleClick => session.reset(now),

                UiEvent::ButtonLongPress => session.toggle_shake_toasts(now),

                UiEvent::ScreenTimeout => {
                    // A gesture may have landed after the power task decided.
                    let idle = now.wrapping_sub(last_input_ms.load(Ordering::Relaxed));
                    if idle <= SCREEN_TIMEOUT_MS {
                        screen_paused.store(false, Ordering::SeqCst);
                        continue;
                    }
                    session.on_pause();
                    if let Err(e) = display.turn_off() {
                        log::error!("Display error: {}", e);
                    }
                }
            }
        }

        // 3. Redraw when the model changed or a toast ran out.
        if !session.is_paused() {
            session.screen_mut().expire_toast(crate::now_ms());
            if session.screen_mut().take_dirty() {
                if let Err(e) = display.show_screen(session.screen()) {
                    log::error!("Display error: {}", e);
                }
            }
        }

        thread::sleep(poll_interval);
    }
}
