// ShakeUp - System Events & Data Types

// ---------------------------------------------------------------------------
// Sensor Data (3-axis accelerometer reading, m/s²)
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AccelSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl AccelSample {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

// ---------------------------------------------------------------------------
// Shake Detection Output
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShakeEvent {
    /// Magnitude of the triggering sample, in g.
    pub g_force: f32,
    /// Boot-relative timestamp of the triggering sample.
    pub at_ms: u32,
}

// ---------------------------------------------------------------------------
// UI Events - sent to the UI task via channel
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    /// New accelerometer reading from the sensor task.
    Sample(AccelSample),
    /// Single button click detected (sensing switch).
    ButtonSingleClick,
    /// Double button click detected (reset button).
    ButtonDoubleClick,
    /// Long button press detected (shake-toast checkbox).
    ButtonLongPress,
    /// No input for the screen timeout; pause the screen.
    ScreenTimeout,
}

impl UiEvent {
    /// True for events that originate from the user button.
    pub fn is_button(&self) -> bool {
        matches!(
            self,
            Self::ButtonSingleClick | Self::ButtonDoubleClick | Self::ButtonLongPress
        )
    }
}
