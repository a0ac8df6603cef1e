//! Shared robot state.
//!
//! One explicit struct owned by the application service and passed by
//! reference into routine bodies and command handlers; no ambient
//! globals. All
//! mutation happens on the single control thread — button handling only
//! pushes events into the queue in [`crate::events`] and never touches
//! state directly.

use crate::config::RobotConfig;

/// Balls credited per completed fire-and-settle cycle.
pub const BALLS_PER_FIRE: u32 = 2;

/// Mutable process-wide robot state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobotState {
    /// Routine-selector press counter (see [`crate::selector`]).
    pub press_count: u8,
    /// Running estimate of balls scored across all routines this power-up.
    pub balls_scored: u32,
    /// Wall-approach drive speed (%), bumped at runtime by the speed button.
    pub drive_percent: u8,
}

impl RobotState {
    /// Fresh state at power-up.
    pub fn new(config: &RobotConfig) -> Self {
        Self {
            press_count: 0,
            balls_scored: 0,
            drive_percent: config.initial_drive_percent,
        }
    }

    /// Credit one completed fire cycle.
    pub fn record_fire(&mut self) {
        self.balls_scored += BALLS_PER_FIRE;
    }
}
