// ShakeUp - Screen Model
//
// Widget state for the single screen: three axis labels, the sensing switch,
// the shake-toast checkbox and at most one toast. Rendering reads this model;
// only the session writes it.

use crate::config::*;
use crate::events::AccelSample;

pub const X_LABEL_EMPTY: &str = "X-Axis: ";
pub const Y_LABEL_EMPTY: &str = "Y-Axis: ";
pub const Z_LABEL_EMPTY: &str = "Z-Axis: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLength {
    Short,
    Long,
}

impl ToastLength {
    pub fn duration_ms(&self) -> u32 {
        match self {
            Self::Short => TOAST_SHORT_MS,
            Self::Long => TOAST_LONG_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub text: String,
    pub length: ToastLength,
    pub shown_at_ms: u32,
}

impl Toast {
    pub fn is_expired(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.shown_at_ms) >= self.length.duration_ms()
    }
}

#[derive(Debug, Clone)]
pub struct ScreenModel {
    pub x_label: String,
    pub y_label: String,
    pub z_label: String,
    pub switch_on: bool,
    pub switch_enabled: bool,
    pub toasts_checked: bool,
    toast: Option<Toast>,
    dirty: bool,
}

impl Default for ScreenModel {
    fn default() -> Self {
        Self {
            x_label: X_LABEL_EMPTY.to_string(),
            y_label: Y_LABEL_EMPTY.to_string(),
            z_label: Z_LABEL_EMPTY.to_string(),
            switch_on: false,
            switch_enabled: true,
            toasts_checked: false,
            toast: None,
            dirty: true,
        }
    }
}

impl ScreenModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_axes(&mut self, sample: &AccelSample) {
        self.x_label = format!("X-Axis: {:.2}", sample.x);
        self.y_label = format!("Y-Axis: {:.2}", sample.y);
        self.z_label = format!("Z-Axis: {:.2}", sample.z);
        self.dirty = true;
    }

    pub fn clear_axes(&mut self) {
        self.x_label = X_LABEL_EMPTY.to_string();
        self.y_label = Y_LABEL_EMPTY.to_string();
        self.z_label = Z_LABEL_EMPTY.to_string();
        self.dirty = true;
    }

    pub fn set_switch(&mut self, on: bool) {
        self.switch_on = on;
        self.dirty = true;
    }

    pub fn set_switch_enabled(&mut self, enabled: bool) {
        self.switch_enabled = enabled;
        self.dirty = true;
    }

    pub fn set_toasts_checked(&mut self, checked: bool) {
        self.toasts_checked = checked;
        self.dirty = true;
    }

    /// Show a toast, replacing whichever one is on screen.
    pub fn show_toast(&mut self, text: impl Into<String>, length: ToastLength, now_ms: u32) {
        self.toast = Some(Toast {
            text: text.into(),
            length,
            shown_at_ms: now_ms,
        });
        self.dirty = true;
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    /// Drop the toast once its duration has passed. Returns true if removed.
    pub fn expire_toast(&mut self, now_ms: u32) -> bool {
        match &self.toast {
            Some(toast) if toast.is_expired(now_ms) => {
                self.toast = None;
                self.dirty = true;
                true
            }
            _ => false,
        }
    }

    /// Mark the model as needing a full redraw.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Status text of the sensing switch row.
    pub fn switch_text(&self) -> &'static str {
        match (self.switch_enabled, self.switch_on) {
            (false, _) => "Sensor: N/A",
            (true, true) => "Sensor: ON",
            (true, false) => "Sensor: OFF",
        }
    }

    /// Text of the checkbox row.
    pub fn checkbox_text(&self) -> &'static str {
        if self.toasts_checked {
            "[x] Shake toasts"
        } else {
            "[ ] Shake toasts"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes_formatting() {
        let mut screen = ScreenModel::new();
        screen.show_axes(&AccelSample::new(0.123, -9.81, 12.0));
        assert_eq!(screen.x_label, "X-Axis: 0.12");
        assert_eq!(screen.y_label, "Y-Axis: -9.81");
        assert_eq!(screen.z_label, "Z-Axis: 12.00");

        screen.clear_axes();
        assert_eq!(screen.x_label, X_LABEL_EMPTY);
        assert_eq!(screen.y_label, Y_LABEL_EMPTY);
        assert_eq!(screen.z_label, Z_LABEL_EMPTY);
    }

    #[test]
    fn test_toast_expiry() {
        let mut screen = ScreenModel::new();
        screen.show_toast("hello", ToastLength::Short, 100);
        assert!(!screen.expire_toast(100 + TOAST_SHORT_MS - 1));
        assert!(screen.toast().is_some());
        assert!(screen.expire_toast(100 + TOAST_SHORT_MS));
        assert!(screen.toast().is_none());
        assert!(!screen.expire_toast(100 + TOAST_SHORT_MS + 1));
    }

    #[test]
    fn test_newer_toast_replaces_older() {
        let mut screen = ScreenModel::new();
        screen.show_toast("first", ToastLength::Long, 0);
        screen.show_toast("second", ToastLength::Short, 10);
        let toast = screen.toast().unwrap();
        assert_eq!(toast.text, "second");
        assert_eq!(toast.length, ToastLength::Short);
    }

    #[test]
    fn test_dirty_tracking() {
        let mut screen = ScreenModel::new();
        assert!(screen.take_dirty());
        assert!(!screen.take_dirty());
        screen.set_toasts_checked(true);
        assert!(screen.take_dirty());
        assert!(!screen.expire_toast(0));
        assert!(!screen.take_dirty());
    }

    #[test]
    fn test_row_texts() {
        let mut screen = ScreenModel::new();
        assert_eq!(screen.switch_text(), "Sensor: OFF");
        screen.set_switch(true);
        assert_eq!(screen.switch_text(), "Sensor: ON");
        screen.set_switch_enabled(false);
        assert_eq!(screen.switch_text(), "Sensor: N/A");
        assert_eq!(screen.checkbox_text(), "[ ] Shake toasts");
    }
}
