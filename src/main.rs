// ShakeUp - Firmware Entry Point
//
// Boot sequence:
//   1. Display "ShakeUp" text for 1 second.
//   2. Run component self-test (OLED + MPU6050).
//   3. Enter the sensor screen (axis labels, switch, checkbox).
//   4. Spawn sensor, UI, and power tasks.
//
// Button gestures on the screen:
//   - single click  -> sensing switch on/off
//   - double click  -> reset shake detection
//   - long press    -> shake toasts on/off
//
// On a host build the same binary replays a recorded trace through the
// screen session instead (see `shakeup::replay`).

#[cfg(target_os = "espidf")]
mod drivers;
#[cfg(target_os = "espidf")]
mod tasks;

#[cfg(target_os = "espidf")]
pub use firmware::now_ms;

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    firmware::run()
}

#[cfg(not(target_os = "espidf"))]
fn main() -> anyhow::Result<()> {
    host::run()
}

// ---------------------------------------------------------------------------
// Firmware
// ---------------------------------------------------------------------------
#[cfg(target_os = "espidf")]
mod firmware {
    use std::sync::atomic::{AtomicBool, AtomicU32};
    use std::sync::mpsc;
    use std::sync::{Arc, Mutex};
    use std::thread;
    use std::time::Duration;

    use esp_idf_hal::gpio::{IOPin, OutputPin, PinDriver, Pull};
    use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
    use esp_idf_hal::prelude::*;

    use shakeup::config::*;
    use shakeup::events::UiEvent;

    use crate::drivers::display::OledDisplay;
    use crate::drivers::imu::Mpu6050;
    use crate::drivers::SharedBus;
    use crate::tasks;
    use crate::tasks::sensor::ListenerGate;

    /// Milliseconds since boot (wraps at ~49 days - fine for timeouts).
    /// All debounce and timeout arithmetic uses `wrapping_sub`, so intervals
    /// are measured modulo 2^32 ms; see `ShakeDetector` for the one edge case.
    pub fn now_ms() -> u32 {
        unsafe { (esp_idf_sys::esp_timer_get_time() / 1000) as u32 }
    }

    pub fn run() -> anyhow::Result<()> {
        // Link esp-idf-sys runtime patches and initialise logging.
        esp_idf_svc::sys::link_patches();
        esp_idf_svc::log::EspLogger::initialize_default();
        log::info!("ShakeUp firmware starting");

        // ---- Peripherals --------------------------------------------------
        let peripherals = Peripherals::take()?;

        // ---- I2C bus (shared between OLED and MPU6050) --------------------
        let i2c_config = I2cConfig::new().baudrate(400u32.kHz().into());
        let i2c: I2cDriver<'static> = I2cDriver::new(
            peripherals.i2c0,
            peripherals.pins.gpio6, // SDA
            peripherals.pins.gpio7, // SCL
            &i2c_config,
        )?;
        // The bus lives for the whole programme (embedded firmware never exits).
        let i2c_bus: SharedBus = Box::leak(Box::new(Mutex::new(i2c)));

        // ---- Boot sequence (display) --------------------------------------
        let mut display = OledDisplay::new(i2c_bus);
        display.init()?;
        display.show_centered_text("ShakeUp")?;
        thread::sleep(Duration::from_millis(BOOT_TEXT_DISPLAY_MS));

        // ---- Component self-test ------------------------------------------
        let oled_ok = display.is_connected();
        let imu = Mpu6050::new(i2c_bus);
        let imu_ok = imu.is_connected()
            && match imu.init() {
                Ok(()) => true,
                Err(e) => {
                    log::error!("MPU6050 init failed: {}", e);
                    false
                }
            };

        if !oled_ok || !imu_ok {
            log::error!("Boot check FAILED - OLED:{} IMU:{}", oled_ok, imu_ok);
            // Continue anyway: the screen reports a missing sensor itself.
        }
        log::info!("Boot complete - entering normal operation");

        // ---- Channels & shared state --------------------------------------
        let (ui_tx, ui_rx) = mpsc::channel::<UiEvent>();
        let listening = Arc::new(AtomicBool::new(false));
        let screen_paused = Arc::new(AtomicBool::new(false));
        let last_input_ms = Arc::new(AtomicU32::new(now_ms()));

        // ---- GPIO ---------------------------------------------------------
        // Button on D1 (see PIN_BUTTON), active LOW with internal pull-up.
        let mut button = PinDriver::input(peripherals.pins.gpio3.downgrade())?;
        button.set_pull(Pull::Up)?;

        // Haptic motor on D2 (see PIN_HAPTIC).
        let haptic_pin = PinDriver::output(peripherals.pins.gpio4.downgrade_output())?;

        // ---- Spawn tasks (map to FreeRTOS tasks via std::thread) ----------

        // Sensor task - only when the IMU answered at boot.
        if imu_ok {
            let sensor_listening = Arc::clone(&listening);
            let sensor_tx = ui_tx.clone();
            thread::Builder::new()
                .name("sensor".into())
                .stack_size(STACK_SENSOR)
                .spawn(move || {
                    tasks::sensor::sensor_task(i2c_bus, sensor_listening, sensor_tx);
                })?;
        }

        // UI task (display + button + haptic + screen session)
        let hub = ListenerGate::new(imu_ok, Arc::clone(&listening));
        let ui_paused = Arc::clone(&screen_paused);
        let ui_input = Arc::clone(&last_input_ms);
        let ui_tx_for_input = ui_tx.clone();
        thread::Builder::new()
            .name("ui".into())
            .stack_size(STACK_UI)
            .spawn(move || {
                tasks::ui::ui_task(
                    i2c_bus,
                    button,
                    haptic_pin,
                    hub,
                    ui_rx,
                    ui_tx_for_input,
                    ui_paused,
                    ui_input,
                );
            })?;

        // Power management task
        thread::Builder::new()
            .name("power".into())
            .stack_size(STACK_POWER)
            .spawn(move || {
                tasks::power::power_task(ui_tx, screen_paused, last_input_ms);
            })?;

        // Main thread has nothing left to do - park it forever.
        loop {
            thread::sleep(Duration::from_secs(60));
        }
    }
}

// ---------------------------------------------------------------------------
// Host trace replay
// ---------------------------------------------------------------------------
#[cfg(not(target_os = "espidf"))]
mod host {
    use anyhow::{anyhow, Context};

    use shakeup::replay::{self, ReplayHub};
    use shakeup::session::ShakeSession;

    const USAGE: &str = "usage: shakeup [--no-sensor] <trace-file>";

    pub fn run() -> anyhow::Result<()> {
        let mut available = true;
        let mut path = None;
        for arg in std::env::args().skip(1) {
            match arg.as_str() {
                "--no-sensor" => available = false,
                "-h" | "--help" => {
                    println!("{}", USAGE);
                    return Ok(());
                }
                _ => path = Some(arg),
            }
        }
        let path = path.ok_or_else(|| anyhow!(USAGE))?;

        let text = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
        let steps = replay::parse_trace(&text).with_context(|| format!("parsing {}", path))?;

        let mut session = ShakeSession::new(ReplayHub::new(available), 0);
        let report = replay::run(&mut session, &steps);

        for (at_ms, text) in &report.toasts {
            println!("{:>8} ms  toast  {}", at_ms, text);
        }
        for shake in &report.shakes {
            println!("{:>8} ms  shake  {:.2} g", shake.at_ms, shake.g_force);
        }

        let screen = session.screen();
        println!();
        println!("{}", screen.x_label);
        println!("{}", screen.y_label);
        println!("{}", screen.z_label);
        println!("{}", screen.switch_text());
        println!("{}", screen.checkbox_text());
        Ok(())
    }
}
