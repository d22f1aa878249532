// ShakeUp - Screen Session
//
// Owns all state of the single screen and maps user input to sensor
// subscription changes, label updates and toasts. Everything runs on the UI
// task, so nothing here is shared or locked.

use crate::events::{AccelSample, ShakeEvent};
use crate::hub::SensorHub;
use crate::shake::ShakeDetector;
use crate::ui::screen::{ScreenModel, ToastLength};

pub const MSG_SENSOR_UNAVAILABLE: &str = "Accelerometer not available on this device.";
pub const MSG_SENSOR_ACTIVATED: &str = "Accelerometer Activated";
pub const MSG_SENSOR_DEACTIVATED: &str = "Accelerometer Deactivated";
pub const MSG_RESET: &str = "Reset Button Clicked!";
pub const MSG_TOASTS_ENABLED: &str = "Shake Toasts Enabled";
pub const MSG_TOASTS_DISABLED: &str = "Shake Toasts Disabled";

pub struct ShakeSession<H: SensorHub> {
    hub: H,
    detector: ShakeDetector,
    screen: ScreenModel,
    sensing_active: bool,
    shake_toasts: bool,
    paused: bool,
    last_sample: AccelSample,
}

impl<H: SensorHub> ShakeSession<H> {
    pub fn new(hub: H, now_ms: u32) -> Self {
        let mut screen = ScreenModel::new();

        if !hub.is_available() {
            log::warn!("No accelerometer found - sensing switch disabled");
            screen.show_toast(MSG_SENSOR_UNAVAILABLE, ToastLength::Long, now_ms);
            screen.set_switch_enabled(false);
        }

        Self {
            hub,
            detector: ShakeDetector::new(),
            screen,
            sensing_active: false,
            shake_toasts: false,
            paused: false,
            last_sample: AccelSample::default(),
        }
    }

    // -----------------------------------------------------------------------
    // Sensing switch
    // -----------------------------------------------------------------------

    pub fn set_sensing(&mut self, on: bool, now_ms: u32) {
        if !self.screen.switch_enabled {
            log::warn!("Sensing switch is disabled - ignoring toggle");
            return;
        }

        self.sensing_active = on;
        self.screen.set_switch(on);
        let available = self.hub.is_available();

        if on {
            if available {
                self.hub.register();
                self.screen.show_toast(MSG_SENSOR_ACTIVATED, ToastLength::Short, now_ms);
            }
        } else {
            if available {
                self.hub.unregister();
            }
            self.screen.show_toast(MSG_SENSOR_DEACTIVATED, ToastLength::Short, now_ms);
            self.screen.clear_axes();
        }
        log::info!("Sensing {}", if on { "on" } else { "off" });
    }

    pub fn toggle_sensing(&mut self, now_ms: u32) {
        self.set_sensing(!self.sensing_active, now_ms);
    }

    // -----------------------------------------------------------------------
    // Reset button
    // -----------------------------------------------------------------------

    pub fn reset(&mut self, now_ms: u32) {
        self.screen.show_toast(MSG_RESET, ToastLength::Short, now_ms);
        self.last_sample = AccelSample::default();
        // Avoid a shake firing straight after reset.
        self.detector.reset(now_ms);
        log::info!("Shake detection reset");
    }

    // -----------------------------------------------------------------------
    // Shake-toast checkbox
    // -----------------------------------------------------------------------

    pub fn set_shake_toasts(&mut self, on: bool, now_ms: u32) {
        self.shake_toasts = on;
        self.screen.set_toasts_checked(on);
        let msg = if on { MSG_TOASTS_ENABLED } else { MSG_TOASTS_DISABLED };
        self.screen.show_toast(msg, ToastLength::Short, now_ms);
    }

    pub fn toggle_shake_toasts(&mut self, now_ms: u32) {
        self.set_shake_toasts(!self.shake_toasts, now_ms);
    }

    // -----------------------------------------------------------------------
    // Sensor callback
    // -----------------------------------------------------------------------

    pub fn on_sample(&mut self, sample: AccelSample, now_ms: u32) -> Option<ShakeEvent> {
        if !self.sensing_active || self.paused {
            return None;
        }

        self.screen.show_axes(&sample);
        log::debug!(target: "Accelerometer", "X: {}, Y: {}, Z: {}", sample.x, sample.y, sample.z);

        let shake = self.detector.update(&sample, now_ms);
        if let Some(event) = &shake {
            let msg = format!("Shake detected! Force: {:.2}", event.g_force);
            log::debug!(target: "SensorShake", "{}", msg);
            if self.shake_toasts {
                self.screen.show_toast(msg, ToastLength::Short, now_ms);
            }
        }

        self.last_sample = sample;
        shake
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    pub fn on_pause(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        if self.hub.is_available() {
            self.hub.unregister();
        }
        log::info!("Screen paused");
    }

    pub fn on_resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        if self.sensing_active && self.hub.is_available() {
            self.hub.register();
        }
        self.screen.invalidate();
        log::info!("Screen resumed");
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn screen(&self) -> &ScreenModel {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut ScreenModel {
        &mut self.screen
    }

    pub fn hub(&self) -> &H {
        &self.hub
    }

    pub fn is_sensing(&self) -> bool {
        self.sensing_active
    }

    pub fn shake_toasts_enabled(&self) -> bool {
        self.shake_toasts
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn last_sample(&self) -> AccelSample {
        self.last_sample
    }

    pub fn last_shake_ms(&self) -> Option<u32> {
        self.detector.last_shake_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GRAVITY_EARTH;
    use crate::ui::screen::{X_LABEL_EMPTY, Y_LABEL_EMPTY, Z_LABEL_EMPTY};

    #[derive(Debug, Default)]
    struct FakeHub {
        missing: bool,
        registered: bool,
        register_calls: u32,
        unregister_calls: u32,
    }

    impl SensorHub for FakeHub {
        fn is_available(&self) -> bool {
            !self.missing
        }

        fn register(&mut self) {
            self.registered = true;
            self.register_calls += 1;
        }

        fn unregister(&mut self) {
            self.registered = false;
            self.unregister_calls += 1;
        }
    }

    fn shake_sample() -> AccelSample {
        AccelSample::new(3.0 * GRAVITY_EARTH, 0.0, 0.0)
    }

    fn toast_text<H: SensorHub>(session: &ShakeSession<H>) -> Option<&str> {
        session.screen().toast().map(|t| t.text.as_str())
    }

    #[test]
    fn test_initial_state() {
        let session = ShakeSession::new(FakeHub::default(), 0);
        assert!(!session.is_sensing());
        assert!(!session.shake_toasts_enabled());
        assert!(session.screen().switch_enabled);
        assert!(session.screen().toast().is_none());
        assert!(!session.hub().registered);
        assert_eq!(session.last_sample(), AccelSample::default());
    }

    #[test]
    fn test_unavailable_sensor_disables_switch() {
        let hub = FakeHub { missing: true, ..Default::default() };
        let mut session = ShakeSession::new(hub, 0);

        assert!(!session.screen().switch_enabled);
        let toast = session.screen().toast().expect("notice");
        assert_eq!(toast.text, MSG_SENSOR_UNAVAILABLE);
        assert_eq!(toast.length, ToastLength::Long);

        session.toggle_sensing(10);
        assert!(!session.is_sensing());
        assert_eq!(session.hub().register_calls, 0);
        assert_eq!(toast_text(&session), Some(MSG_SENSOR_UNAVAILABLE));
    }

    #[test]
    fn test_switch_registers_and_unregisters() {
        let mut session = ShakeSession::new(FakeHub::default(), 0);

        session.toggle_sensing(10);
        assert!(session.is_sensing());
        assert!(session.hub().registered);
        assert!(session.screen().switch_on);
        assert_eq!(toast_text(&session), Some(MSG_SENSOR_ACTIVATED));

        session.toggle_sensing(20);
        assert!(!session.is_sensing());
        assert!(!session.hub().registered);
        assert!(!session.screen().switch_on);
        assert_eq!(toast_text(&session), Some(MSG_SENSOR_DEACTIVATED));
    }

    #[test]
    fn test_samples_ignored_while_off() {
        let mut session = ShakeSession::new(FakeHub::default(), 0);
        assert!(session.on_sample(shake_sample(), 1000).is_none());
        assert_eq!(session.screen().x_label, X_LABEL_EMPTY);
        assert_eq!(session.last_sample(), AccelSample::default());
    }

    #[test]
    fn test_sample_updates_labels_and_last_sample() {
        let mut session = ShakeSession::new(FakeHub::default(), 0);
        session.set_sensing(true, 0);

        let sample = AccelSample::new(0.5, -1.25, 9.81);
        assert!(session.on_sample(sample, 100).is_none());
        assert_eq!(session.screen().x_label, "X-Axis: 0.50");
        assert_eq!(session.screen().y_label, "Y-Axis: -1.25");
        assert_eq!(session.screen().z_label, "Z-Axis: 9.81");
        assert_eq!(session.last_sample(), sample);
    }

    #[test]
    fn test_turning_off_clears_axis_labels() {
        let mut session = ShakeSession::new(FakeHub::default(), 0);
        session.set_sensing(true, 0);
        session.on_sample(AccelSample::new(1.0, 2.0, 3.0), 100);

        session.set_sensing(false, 200);
        assert_eq!(session.screen().x_label, X_LABEL_EMPTY);
        assert_eq!(session.screen().y_label, Y_LABEL_EMPTY);
        assert_eq!(session.screen().z_label, Z_LABEL_EMPTY);
    }

    #[test]
    fn test_shake_toast_only_when_checked() {
        let mut session = ShakeSession::new(FakeHub::default(), 0);
        session.set_sensing(true, 0);

        let event = session.on_sample(shake_sample(), 5000).expect("shake");
        assert!((event.g_force - 3.0).abs() < 1e-4);
        assert_eq!(toast_text(&session), Some(MSG_SENSOR_ACTIVATED));

        session.toggle_shake_toasts(5100);
        assert!(session.shake_toasts_enabled());
        assert!(session.screen().toasts_checked);
        assert_eq!(toast_text(&session), Some(MSG_TOASTS_ENABLED));

        assert!(session.on_sample(shake_sample(), 6000).is_some());
        assert_eq!(toast_text(&session), Some("Shake detected! Force: 3.00"));

        session.toggle_shake_toasts(6100);
        assert_eq!(toast_text(&session), Some(MSG_TOASTS_DISABLED));
    }

    #[test]
    fn test_reset_clears_sample_and_suppresses_shake() {
        let mut session = ShakeSession::new(FakeHub::default(), 0);
        session.set_sensing(true, 0);
        session.on_sample(AccelSample::new(1.0, 1.0, 1.0), 100);

        session.reset(1000);
        assert_eq!(session.last_sample(), AccelSample::default());
        assert_eq!(session.last_shake_ms(), Some(1000));
        assert_eq!(toast_text(&session), Some(MSG_RESET));

        assert!(session.on_sample(shake_sample(), 1001).is_none());
        assert!(session.on_sample(shake_sample(), 1500).is_some());
    }

    #[test]
    fn test_pause_and_resume() {
        let mut session = ShakeSession::new(FakeHub::default(), 0);
        session.set_sensing(true, 0);

        session.on_pause();
        assert!(session.is_paused());
        assert!(!session.hub().registered);
        assert!(session.on_sample(shake_sample(), 1000).is_none());

        session.on_resume();
        assert!(!session.is_paused());
        assert!(session.hub().registered);
        assert_eq!(session.hub().register_calls, 2);
    }

    #[test]
    fn test_resume_keeps_listener_off_when_inactive() {
        let mut session = ShakeSession::new(FakeHub::default(), 0);
        session.on_pause();
        session.on_resume();
        assert!(!session.hub().registered);
        assert_eq!(session.hub().register_calls, 0);
        assert_eq!(session.hub().unregister_calls, 1);
    }
}
