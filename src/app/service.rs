//! Application service — command dispatch over the routine core.
//!
//! [`AppService`] owns the [`RobotState`] and configuration. It exposes a
//! clean, hardware-agnostic API: callers hand it a command plus the port
//! implementations, and it runs the selector and routines synchronously.
//!
//! ```text
//!  button events ──▶ ┌──────────────────────┐ ──▶ EventSink
//!                    │      AppService       │
//!      RobotHal ◀────│  selector · routines  │
//!                    └──────────────────────┘
//! ```
//!
//! Routines are expected to run to completion before the next command is
//! processed; the single-consumer loop in the binary makes that an
//! invariant rather than a hope — see [`crate::events`].

use log::info;

use crate::auton::{self, RoutineId, SHOOTER_RESET_DEGREES};
use crate::config::RobotConfig;
use crate::selector;
use crate::state::RobotState;

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{Direction, EventSink, MotorId, RobotHal};

/// The application service orchestrates selector and routine execution.
pub struct AppService {
    state: RobotState,
    config: RobotConfig,
}

impl AppService {
    /// Construct the service from configuration.
    pub fn new(config: RobotConfig) -> Self {
        let state = RobotState::new(&config);
        Self { state, config }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process one external command. Blocks for the full duration of a
    /// routine when the selector picks one.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        hw: &mut impl RobotHal,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            AppCommand::CyclePress => match selector::advance(&mut self.state) {
                Some(id) => self.run_routine(id, hw, sink),
                None => {
                    info!("routine selector reset");
                    sink.emit(&AppEvent::PressCounted(self.state.press_count));
                }
            },
            AppCommand::ResetShooter => {
                hw.spin_for(MotorId::Shooter, Direction::Reverse, SHOOTER_RESET_DEGREES, false);
                sink.emit(&AppEvent::ShooterReset);
            }
            AppCommand::BumpDriveSpeed => {
                self.state.drive_percent = self
                    .state
                    .drive_percent
                    .saturating_add(self.config.speed_step_percent);
                sink.emit(&AppEvent::DriveSpeedChanged(self.state.drive_percent));
            }
            AppCommand::ProbePressCount => {
                self.state.press_count = self.state.press_count.wrapping_add(1);
                info!("press counter: {}", self.state.press_count);
                sink.emit(&AppEvent::PressCounted(self.state.press_count));
            }
        }
    }

    /// Run a routine directly, bypassing the selector.
    pub fn run_routine(
        &mut self,
        id: RoutineId,
        hw: &mut impl RobotHal,
        sink: &mut impl EventSink,
    ) {
        info!("running routine {id:?}");
        auton::run_routine(id, hw, &mut self.state, &self.config, sink);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current shared state snapshot.
    pub fn state(&self) -> &RobotState {
        &self.state
    }

    /// Running ball-score estimate.
    pub fn balls_scored(&self) -> u32 {
        self.state.balls_scored
    }

    /// Current selector press count.
    pub fn press_count(&self) -> u8 {
        self.state.press_count
    }

    /// Current wall-approach drive speed (%).
    pub fn drive_percent(&self) -> u8 {
        self.state.drive_percent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_service_state() {
        let app = AppService::new(RobotConfig::default());
        assert_eq!(app.balls_scored(), 0);
        assert_eq!(app.press_count(), 0);
        assert_eq!(app.drive_percent(), 38);
    }
}
