// ShakeUp - Power Management Task
//
// Watches for user inactivity and asks the UI task to pause the screen
// (blank the OLED, unregister the sensor listener) once the timeout passes.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use shakeup::config::*;
use shakeup::events::UiEvent;

pub fn power_task(
    ui_tx: Sender<UiEvent>,
    screen_paused: Arc<AtomicBool>,
    last_input_ms: Arc<AtomicU32>,
) {
    log::info!("Power task started");

    let check_interval = Duration::from_millis(POWER_CHECK_INTERVAL_MS);

    loop {
        if !screen_paused.load(Ordering::SeqCst) {
            let idle = crate::now_ms().wrapping_sub(last_input_ms.load(Ordering::Relaxed));
            if idle > SCREEN_TIMEOUT_MS {
                log::info!("Inactivity timeout ({} ms) - pausing screen", SCREEN_TIMEOUT_MS);
                screen_paused.store(true, Ordering::SeqCst);
                if ui_tx.send(UiEvent::ScreenTimeout).is_err() {
                    log::warn!("UI channel closed - exiting power task");
                    return;
                }
            }
        }

        thread::sleep(check_interval);
    }
}
