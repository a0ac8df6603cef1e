//! Robot configuration parameters
//!
//! All tunable thresholds and timing bounds for the autonomous routines.
//! The defaults are the hand-tuned field values; tests override them to
//! drive simulated runs.

use serde::{Deserialize, Serialize};

/// Core robot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotConfig {
    // --- Drive ---
    /// Initial wall-approach drive speed (0-100%), adjustable at runtime
    pub initial_drive_percent: u8,
    /// Increment applied per speed-bump button press (%)
    pub speed_step_percent: u8,

    // --- Sensor thresholds ---
    /// Ball counts as detected when the intake sensor reads below this (mm)
    pub ball_detect_threshold_mm: f64,
    /// Back wall counts as reached when the rear sensor reads below this (mm)
    pub wall_align_threshold_mm: f64,
    /// Shooter gate counts as clear when its sensor reads below this (mm)
    pub shooter_clear_threshold_mm: f64,

    // --- Timing ---
    /// Sleep between sensor polls in every wait loop (milliseconds)
    pub poll_interval_ms: u64,
    /// Upper bound on the back-wall alignment loops (milliseconds).
    /// The only timeout safeguard in the system: a stalled rear sensor
    /// exits here instead of blocking forever.
    pub wall_align_timeout_ms: u64,
    /// Fixed-duration reverse drive back to the start tile in Routine 2
    /// (milliseconds). Dead-reckoned on purpose — there is no sensor
    /// covering this leg, so the value is timing-tuned on the field.
    pub return_drive_ms: u64,
    /// Fixed-duration reverse drive inside Routine 2's repeat block (ms)
    pub cycle_reverse_ms: u64,

    // --- Routine shape ---
    /// Number of reposition-drive-align-fire cycles in Routine 2
    pub fire_cycles: u32,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            // Drive
            initial_drive_percent: 38,
            speed_step_percent: 2,

            // Thresholds
            ball_detect_threshold_mm: 30.0,
            wall_align_threshold_mm: 50.0,
            shooter_clear_threshold_mm: 10.0,

            // Timing
            poll_interval_ms: 50,
            wall_align_timeout_ms: 4000,
            return_drive_ms: 2000,
            cycle_reverse_ms: 3000,

            // Routine shape
            fire_cycles: 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = RobotConfig::default();
        assert!(c.initial_drive_percent > 0 && c.initial_drive_percent <= 100);
        assert!(c.ball_detect_threshold_mm > 0.0);
        assert!(c.wall_align_threshold_mm > 0.0);
        assert!(c.shooter_clear_threshold_mm > 0.0);
        assert!(c.poll_interval_ms > 0);
        assert!(c.fire_cycles > 0);
    }

    #[test]
    fn poll_interval_below_align_timeout() {
        let c = RobotConfig::default();
        assert!(
            c.poll_interval_ms < c.wall_align_timeout_ms,
            "the alignment cap must span many polls or the loop exits on its first check"
        );
    }

    #[test]
    fn gate_threshold_below_detection_thresholds() {
        let c = RobotConfig::default();
        assert!(
            c.shooter_clear_threshold_mm < c.ball_detect_threshold_mm,
            "a seated ball must not read as a clear gate"
        );
    }

    #[test]
    fn serde_roundtrip() {
        let c = RobotConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: RobotConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.initial_drive_percent, c2.initial_drive_percent);
        assert_eq!(c.wall_align_timeout_ms, c2.wall_align_timeout_ms);
        assert!((c.ball_detect_threshold_mm - c2.ball_detect_threshold_mm).abs() < 0.001);
    }
}
