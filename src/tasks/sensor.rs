// ShakeUp - Sensor Task
//
// Reads the accelerometer at UI rate while a listener is registered and
// pushes samples into the UI channel. Registration is a shared flag: the
// session flips it through `ListenerGate`, this task only reads it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use shakeup::config::*;
use shakeup::events::UiEvent;
use shakeup::hub::SensorHub;

use crate::drivers::imu::Mpu6050;
use crate::drivers::SharedBus;

/// Device-side sensor hub: availability is decided once at boot.
pub struct ListenerGate {
    available: bool,
    listening: Arc<AtomicBool>,
}

impl ListenerGate {
    pub fn new(available: bool, listening: Arc<AtomicBool>) -> Self {
        Self { available, listening }
    }
}

impl SensorHub for ListenerGate {
    fn is_available(&self) -> bool {
        self.available
    }

    fn register(&mut self) {
        self.listening.store(true, Ordering::SeqCst);
    }

    fn unregister(&mut self) {
        self.listening.store(false, Ordering::SeqCst);
    }
}

pub fn sensor_task(bus: SharedBus, listening: Arc<AtomicBool>, ui_tx: Sender<UiEvent>) {
    log::info!("Sensor task started");

    let imu = Mpu6050::new(bus);
    let interval = Duration::from_millis(SENSOR_DELAY_UI_MS);
    let idle = Duration::from_millis(SENSOR_IDLE_POLL_MS);

    loop {
        if !listening.load(Ordering::SeqCst) {
            thread::sleep(idle);
            continue;
        }

        let tick_start = Instant::now();

        match imu.read_accel() {
            Ok(sample) => {
                if ui_tx.send(UiEvent::Sample(sample)).is_err() {
                    // Receiver dropped - UI task has exited. Shut down cleanly.
                    log::warn!("UI channel closed - exiting sensor task");
                    return;
                }
            }
            Err(e) => {
                log::warn!("IMU read error: {}", e);
            }
        }

        // Sleep for the remainder of the sampling interval.
        let elapsed = tick_start.elapsed();
        if elapsed < interval {
            thread::sleep(interval - elapsed);
        }
    }
}
