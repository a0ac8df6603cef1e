//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (serial console when attached to the brain). A telemetry
//! radio adapter would implement the same trait.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::RoutineStarted(id) => {
                info!("ROUTINE | {:?} started", id);
            }
            AppEvent::CycleScored {
                routine,
                elapsed_ms,
                total_balls,
            } => {
                info!(
                    "SCORE | {:?} | time: {} ms | balls scored: {}",
                    routine, elapsed_ms, total_balls
                );
            }
            AppEvent::RoutineFinished {
                routine,
                elapsed_ms,
                total_balls,
            } => {
                info!(
                    "ROUTINE | {:?} finished | time: {} ms | balls scored: {}",
                    routine, elapsed_ms, total_balls
                );
            }
            AppEvent::ShooterReset => {
                info!("SHOOTER | re-homed");
            }
            AppEvent::DriveSpeedChanged(percent) => {
                info!("DRIVE | wall-approach speed now {}%", percent);
            }
            AppEvent::PressCounted(count) => {
                info!("SELECT | press counter at {}", count);
            }
        }
    }
}
