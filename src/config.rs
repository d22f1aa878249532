// ShakeUp - Hardware & System Configuration
// Target: Seeed Studio Xiao ESP32-C3 (RISC-V)

// ---------------------------------------------------------------------------
// GPIO Pin Definitions (Xiao ESP32-C3 pinout)
// ---------------------------------------------------------------------------
pub const PIN_BUTTON: i32 = 3;      // D1/A1 - User button (INPUT_PULLUP, active LOW)
pub const PIN_HAPTIC: i32 = 4;      // D2/A2 - Haptic motor control
pub const PIN_I2C_SDA: i32 = 6;     // D4    - I2C data line
pub const PIN_I2C_SCL: i32 = 7;     // D5    - I2C clock line

// ---------------------------------------------------------------------------
// I2C Bus
// ---------------------------------------------------------------------------
pub const I2C_ADDR_MPU6050: u8 = 0x68;
pub const I2C_ADDR_OLED: u8 = 0x3C;
pub const I2C_TIMEOUT_TICKS: u32 = 1000; // FreeRTOS ticks

// ---------------------------------------------------------------------------
// Display (SSD1306 OLED)
// ---------------------------------------------------------------------------
pub const SCREEN_WIDTH: u32 = 128;
pub const SCREEN_HEIGHT: u32 = 64;
pub const DISPLAY_BUFFER_SIZE: usize = (SCREEN_WIDTH as usize * SCREEN_HEIGHT as usize) / 8; // 1024

// ---------------------------------------------------------------------------
// Task Stack Sizes (bytes)
// ---------------------------------------------------------------------------
pub const STACK_SENSOR: usize = 4096;
pub const STACK_UI: usize = 8192;
pub const STACK_POWER: usize = 4096;

// ---------------------------------------------------------------------------
// Timing (milliseconds)
// ---------------------------------------------------------------------------
pub const SENSOR_DELAY_UI_MS: u64 = 66;                // ~15 Hz, UI-rate sampling
pub const SENSOR_IDLE_POLL_MS: u64 = 100;              // gate check while unregistered
pub const UI_POLL_INTERVAL_MS: u64 = 10;               // 100 Hz input poll / refresh
pub const DEBOUNCE_MS: u32 = 50;
pub const LONG_PRESS_MS: u32 = 1500;
pub const DOUBLE_CLICK_WINDOW_MS: u32 = 400;
pub const SCREEN_TIMEOUT_MS: u32 = 60_000;             // 1 minute without input -> pause
pub const POWER_CHECK_INTERVAL_MS: u64 = 1000;
pub const BOOT_TEXT_DISPLAY_MS: u64 = 1000;

// ---------------------------------------------------------------------------
// Toasts
// ---------------------------------------------------------------------------
pub const TOAST_SHORT_MS: u32 = 2000;
pub const TOAST_LONG_MS: u32 = 3500;

// ---------------------------------------------------------------------------
// Shake Detection
// ---------------------------------------------------------------------------
pub const GRAVITY_EARTH: f32 = 9.806_65;               // m/s²
pub const SHAKE_THRESHOLD_GRAVITY: f32 = 2.7;          // g
pub const SHAKE_SLOP_TIME_MS: u32 = 500;

// ---------------------------------------------------------------------------
// Haptics (milliseconds)
// ---------------------------------------------------------------------------
pub const HAPTIC_CLICK_MS: u64 = 50;
pub const HAPTIC_SHAKE_MS: u64 = 200;

// ---------------------------------------------------------------------------
// MPU6050 Sensor Scale Factors
// ---------------------------------------------------------------------------
pub const ACCEL_SCALE_8G: f32 = 4096.0;   // LSB/g  at ±8 g
