//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) and routine bodies emit
//! these through the [`EventSink`](super::ports::EventSink) port. The
//! stock adapter logs them to the serial console; a telemetry radio would
//! implement the same trait.

use crate::auton::RoutineId;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// A routine body has started executing.
    RoutineStarted(RoutineId),

    /// One fire-and-settle cycle completed. `elapsed_ms` is stopwatch
    /// time at the moment of scoring, `total_balls` the running estimate.
    CycleScored {
        routine: RoutineId,
        elapsed_ms: u64,
        total_balls: u32,
    },

    /// A routine ran to completion.
    RoutineFinished {
        routine: RoutineId,
        elapsed_ms: u64,
        total_balls: u32,
    },

    /// The shooter was re-homed outside of a routine.
    ShooterReset,

    /// The wall-approach drive speed changed (new value, %).
    DriveSpeedChanged(u8),

    /// The press counter changed without selecting a routine.
    PressCounted(u8),
}
