//! Autonomous sequencer.
//!
//! Two hand-tuned routines, each a strictly ordered list of steps:
//! unconditional timed motor commands, and polling waits gated by a
//! sensor threshold or an elapsed-time cap. A routine runs to completion
//! on the calling thread (tens of seconds); the only suspension points
//! are the 50 ms poll sleeps inside the wait loops.
//!
//! There is no mid-routine cancellation. The only bounded waits are the
//! back-wall alignment loops (capped by
//! [`RobotConfig::wall_align_timeout_ms`](crate::config::RobotConfig));
//! the ball-detection and shooter-clear loops block until their sensor
//! crosses its threshold. That liveness risk is documented at each wait
//! site rather than papered over with extra timeouts, because changing
//! timing changes on-field behaviour.

pub mod waits;

mod routine_one;
mod routine_two;

use crate::app::events::AppEvent;
use crate::app::ports::{Direction, EventSink, MotorId, RobotHal};
use crate::config::RobotConfig;
use crate::state::RobotState;

use waits::WaitBound;

/// Reverse wind that re-homes the shooter after a firing pass.
pub const SHOOTER_RESET_DEGREES: f64 = 2350.0;

/// The two fixed autonomous routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutineId {
    /// Collection plus a single fire cycle.
    One,
    /// Extended collection plus repeated firing.
    Two,
}

/// Execute a routine synchronously, mutating `state` and emitting
/// [`AppEvent`]s as it goes. Returns only on completion.
pub fn run_routine(
    id: RoutineId,
    hw: &mut impl RobotHal,
    state: &mut RobotState,
    config: &RobotConfig,
    sink: &mut impl EventSink,
) {
    match id {
        RoutineId::One => routine_one::run(hw, state, config, sink),
        RoutineId::Two => routine_two::run(hw, state, config, sink),
    }
}

// ── Shared steps ──────────────────────────────────────────────

/// Back up until the rear sensor sees the wall, or the alignment cap
/// expires. The one timeout safeguard in the system: a blocked or faulty
/// rear sensor exits here after `wall_align_timeout_ms` instead of
/// pinning the robot against nothing forever.
fn align_to_back_wall(
    hw: &mut impl RobotHal,
    config: &RobotConfig,
    left_percent: f64,
    right_percent: f64,
) {
    let wall = config.wall_align_threshold_mm;
    let poll = config.poll_interval_ms;
    waits::poll_while(
        hw,
        WaitBound::Capped(config.wall_align_timeout_ms),
        |h| h.object_distance_mm(crate::app::ports::SensorId::Rear) > wall,
        |h| {
            h.spin(MotorId::LeftDrive, Direction::Reverse, left_percent);
            h.spin(MotorId::RightDrive, Direction::Forward, right_percent);
            h.sleep_ms(poll);
        },
    );
}

/// Wait until the shooter-gate sensor reads clear (ball has left).
/// Unbounded: a ball jammed in the gate stalls the routine here.
fn wait_shooter_gate_clear(hw: &mut impl RobotHal, config: &RobotConfig) {
    let clear = config.shooter_clear_threshold_mm;
    let poll = config.poll_interval_ms;
    waits::poll_while(
        hw,
        WaitBound::Unbounded,
        |h| h.object_distance_mm(crate::app::ports::SensorId::ShooterGate) >= clear,
        |h| h.sleep_ms(poll),
    );
}

/// Credit one fire cycle and report it.
fn score_fire(
    hw: &mut impl RobotHal,
    state: &mut RobotState,
    routine: RoutineId,
    sink: &mut impl EventSink,
) {
    state.record_fire();
    sink.emit(&AppEvent::CycleScored {
        routine,
        elapsed_ms: hw.stopwatch_ms(),
        total_balls: state.balls_scored,
    });
}
