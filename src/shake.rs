// ShakeUp - Shake Detector
//
// Debounced gravity-magnitude threshold. Each sample is normalized by
// standard gravity; a shake fires when the magnitude exceeds
// SHAKE_THRESHOLD_GRAVITY and at least SHAKE_SLOP_TIME_MS have passed since
// the previous shake (or since the last reset).

use crate::config::*;
use crate::events::{AccelSample, ShakeEvent};

#[derive(Debug, Default)]
pub struct ShakeDetector {
    /// Timestamp of the last emitted shake or reset. `None` until either happens.
    last_shake_ms: Option<u32>,
}

impl ShakeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Magnitude of the sample in units of g.
    pub fn g_force(sample: &AccelSample) -> f32 {
        let gx = sample.x / GRAVITY_EARTH;
        let gy = sample.y / GRAVITY_EARTH;
        let gz = sample.z / GRAVITY_EARTH;
        (gx * gx + gy * gy + gz * gz).sqrt()
    }

    /// Feed one sample. Returns the shake event if this sample triggers one.
    pub fn update(&mut self, sample: &AccelSample, now_ms: u32) -> Option<ShakeEvent> {
        if !self.slop_elapsed(now_ms) {
            return None;
        }

        let g_force = Self::g_force(sample);
        if g_force > SHAKE_THRESHOLD_GRAVITY {
            self.last_shake_ms = Some(now_ms);
            Some(ShakeEvent { g_force, at_ms: now_ms })
        } else {
            None
        }
    }

    /// Restart the debounce window at `now_ms`.
    pub fn reset(&mut self, now_ms: u32) {
        self.last_shake_ms = Some(now_ms);
    }

    pub fn last_shake_ms(&self) -> Option<u32> {
        self.last_shake_ms
    }

    // The clock is a wrapping u32, so elapsed time is only exact below
    // 2^32 ms (~49 days). A shake 2^32 + k ms after the previous one, with
    // k < SHAKE_SLOP_TIME_MS, is treated as inside the window.
    fn slop_elapsed(&self, now_ms: u32) -> bool {
        match self.last_shake_ms {
            Some(last) => now_ms.wrapping_sub(last) >= SHAKE_SLOP_TIME_MS,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sample along one axis with the given magnitude in g.
    fn sample_g(g: f32) -> AccelSample {
        AccelSample::new(0.0, 0.0, g * GRAVITY_EARTH)
    }

    #[test]
    fn test_resting_device_reads_one_g() {
        let g = ShakeDetector::g_force(&AccelSample::new(0.0, 0.0, GRAVITY_EARTH));
        assert!((g - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_g_force_uses_all_axes() {
        let a = 2.0 * GRAVITY_EARTH;
        let g = ShakeDetector::g_force(&AccelSample::new(a, a, a));
        assert!((g - 2.0 * 3f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_no_shake_at_or_below_threshold() {
        let mut detector = ShakeDetector::new();
        assert!(detector.update(&sample_g(1.0), 1000).is_none());
        assert!(detector.update(&sample_g(2.5), 2000).is_none());
        assert!(detector.update(&sample_g(2.69), 3000).is_none());
        assert!(detector.update(&sample_g(SHAKE_THRESHOLD_GRAVITY), 4000).is_none());
        assert_eq!(detector.last_shake_ms(), None);
    }

    #[test]
    fn test_just_above_threshold_fires() {
        let mut detector = ShakeDetector::new();
        assert!(detector.update(&sample_g(2.7), 1000).is_none());
        assert!(detector.update(&sample_g(2.71), 1010).is_some());
    }

    #[test]
    fn test_shake_above_threshold() {
        let mut detector = ShakeDetector::new();
        let event = detector.update(&sample_g(3.0), 1000).expect("shake");
        assert_eq!(event.at_ms, 1000);
        assert!((event.g_force - 3.0).abs() < 1e-4);
        assert_eq!(detector.last_shake_ms(), Some(1000));
    }

    #[test]
    fn test_debounce_window() {
        let mut detector = ShakeDetector::new();
        assert!(detector.update(&sample_g(3.0), 1000).is_some());

        // Inside the window nothing fires, and the window is not extended.
        assert!(detector.update(&sample_g(4.0), 1001).is_none());
        assert!(detector.update(&sample_g(4.0), 1499).is_none());
        assert_eq!(detector.last_shake_ms(), Some(1000));

        // Exactly 500 ms later the next shake is accepted.
        assert!(detector.update(&sample_g(4.0), 1500).is_some());
        assert_eq!(detector.last_shake_ms(), Some(1500));
    }

    #[test]
    fn test_quiet_samples_do_not_move_window() {
        let mut detector = ShakeDetector::new();
        assert!(detector.update(&sample_g(3.0), 0).is_some());
        assert!(detector.update(&sample_g(1.0), 600).is_none());
        assert!(detector.update(&sample_g(3.0), 700).is_some());
    }

    #[test]
    fn test_reset_suppresses_immediate_shake() {
        let mut detector = ShakeDetector::new();
        detector.reset(5000);
        assert!(detector.update(&sample_g(5.0), 5000).is_none());
        assert!(detector.update(&sample_g(5.0), 5499).is_none());
        assert!(detector.update(&sample_g(5.0), 5500).is_some());
    }

    #[test]
    fn test_debounce_across_timer_wrap() {
        let mut detector = ShakeDetector::new();
        assert!(detector.update(&sample_g(3.0), u32::MAX - 100).is_some());
        assert!(detector.update(&sample_g(3.0), 200).is_none());
        assert!(detector.update(&sample_g(3.0), 399).is_some());
    }
}
