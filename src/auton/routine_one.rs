//! Routine 1 — collection plus a single fire cycle.
//!
//! Swing off the start tile, arc into the ball line with the intake
//! running, back-align on the rear wall, fire once, re-home the shooter
//! and park ready for driver control.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::{
    BrakeMode, Direction, EventSink, LedColor, LedId, MotorId, RobotHal, SensorId,
};
use crate::config::RobotConfig;
use crate::state::RobotState;

use super::waits::{self, WaitBound};
use super::{RoutineId, SHOOTER_RESET_DEGREES, align_to_back_wall, score_fire, wait_shooter_gate_clear};

/// Opening counter-rotation off the start tile.
const OPEN_REPOSITION_DEGREES: f64 = 250.0;
/// Counter-rotation toward the next phase after firing.
const EXIT_REPOSITION_DEGREES: f64 = 100.0;
/// Reverse wind that pre-tensions the shooter before a shot.
const WIND_UP_DEGREES: f64 = 200.0;
/// Forward rotation that releases the shot.
const FIRE_DEGREES: f64 = 750.0;
/// Left-wheel speed during the intake arc (right runs at 100 % reverse).
const INTAKE_ARC_LEFT_PERCENT: f64 = 35.0;

const SETTLE_AFTER_ALIGN_MS: u64 = 250;
const SETTLE_AFTER_FIRE_MS: u64 = 300;

pub fn run(
    hw: &mut impl RobotHal,
    state: &mut RobotState,
    config: &RobotConfig,
    sink: &mut impl EventSink,
) {
    sink.emit(&AppEvent::RoutineStarted(RoutineId::One));
    hw.stopwatch_reset();

    hw.set_color(LedId::Left, LedColor::Yellow);
    hw.set_color(LedId::Right, LedColor::Yellow);

    hw.set_stopping(MotorId::LeftDrive, BrakeMode::Hold);
    hw.set_stopping(MotorId::RightDrive, BrakeMode::Hold);

    // Slow left side for the arcing moves later in the routine.
    hw.set_velocity(MotorId::LeftDrive, INTAKE_ARC_LEFT_PERCENT);

    // Swing off the start tile.
    hw.spin_for(MotorId::LeftDrive, Direction::Reverse, OPEN_REPOSITION_DEGREES, false);
    hw.spin_for(MotorId::RightDrive, Direction::Forward, OPEN_REPOSITION_DEGREES, true);

    // Intake on.
    hw.spin(MotorId::TopAccumulator, Direction::Reverse, 100.0);
    hw.spin(MotorId::BottomAccumulator, Direction::Forward, 100.0);

    // Arc toward the ball line until a ball shows up at the intake.
    // Unbounded: field geometry puts a ball on this arc.
    let ball_threshold = config.ball_detect_threshold_mm;
    let poll = config.poll_interval_ms;
    waits::poll_while(
        hw,
        WaitBound::Unbounded,
        |h| h.object_distance_mm(SensorId::Ball) > ball_threshold,
        |h| {
            h.sleep_ms(poll);
            h.spin(MotorId::LeftDrive, Direction::Forward, INTAKE_ARC_LEFT_PERCENT);
            h.spin(MotorId::RightDrive, Direction::Reverse, 100.0);
        },
    );

    // Ball collected.
    hw.stop(MotorId::TopAccumulator);
    hw.stop(MotorId::BottomAccumulator);
    hw.stop(MotorId::LeftDrive);
    hw.stop(MotorId::RightDrive);

    info!("routine 1: ball collected, aligning to back wall");
    align_to_back_wall(hw, config, f64::from(state.drive_percent), 100.0);

    hw.stop(MotorId::LeftDrive);
    hw.stop(MotorId::RightDrive);
    waits::settle(hw, SETTLE_AFTER_ALIGN_MS);

    // Wind up, feed, fire.
    hw.spin_for(MotorId::Shooter, Direction::Reverse, WIND_UP_DEGREES, true);
    hw.spin(MotorId::MiniAccumulator, Direction::Forward, 100.0);
    hw.spin(MotorId::TopAccumulator, Direction::Reverse, 100.0);
    hw.spin(MotorId::BottomAccumulator, Direction::Forward, 100.0);
    hw.spin_for(MotorId::Shooter, Direction::Forward, FIRE_DEGREES, true);

    wait_shooter_gate_clear(hw, config);
    waits::settle(hw, SETTLE_AFTER_FIRE_MS);

    hw.stop(MotorId::MiniAccumulator);
    hw.stop(MotorId::TopAccumulator);
    hw.stop(MotorId::BottomAccumulator);

    score_fire(hw, state, RoutineId::One, sink);

    // Re-home the shooter in the background while repositioning.
    hw.spin_for(MotorId::Shooter, Direction::Reverse, SHOOTER_RESET_DEGREES, false);
    hw.spin_for(MotorId::LeftDrive, Direction::Forward, EXIT_REPOSITION_DEGREES, false);
    hw.spin_for(MotorId::RightDrive, Direction::Reverse, EXIT_REPOSITION_DEGREES, true);

    // Done: green lights, drives released to coast.
    hw.set_color(LedId::Left, LedColor::Green);
    hw.set_color(LedId::Right, LedColor::Green);
    hw.set_stopping(MotorId::LeftDrive, BrakeMode::Coast);
    hw.set_stopping(MotorId::RightDrive, BrakeMode::Coast);
    hw.stop(MotorId::LeftDrive);
    hw.stop(MotorId::RightDrive);

    sink.emit(&AppEvent::RoutineFinished {
        routine: RoutineId::One,
        elapsed_ms: hw.stopwatch_ms(),
        total_balls: state.balls_scored,
    });
}
