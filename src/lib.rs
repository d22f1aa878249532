//! ShakeUp accelerometer demo.
//!
//! Reads a 3-axis accelerometer, shows the live axis values on a single
//! screen and flags "shake" gestures with a debounced gravity-magnitude
//! threshold.
//!
//! Everything in this library is platform free so it can be tested and
//! replayed on a desktop. The firmware binary (`target_os = "espidf"`) adds
//! the MPU6050, OLED and haptic drivers plus the sensor, UI and power tasks
//! around it.
//!
//! # Example
//!
//! ```
//! use shakeup::events::AccelSample;
//! use shakeup::replay::ReplayHub;
//! use shakeup::session::ShakeSession;
//!
//! let mut session = ShakeSession::new(ReplayHub::new(true), 0);
//! session.set_sensing(true, 0);
//! let shake = session.on_sample(AccelSample::new(30.0, 0.0, 0.0), 100);
//! assert!(shake.is_some());
//! ```

pub mod config;
pub mod events;
pub mod hub;
pub mod input;
pub mod replay;
pub mod session;
pub mod shake;
pub mod ui;

pub use events::{AccelSample, ShakeEvent, UiEvent};
pub use hub::SensorHub;
pub use session::ShakeSession;
pub use shake::ShakeDetector;
