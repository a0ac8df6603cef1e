//! Routine 2 — extended collection plus repeated firing.
//!
//! Same opening shape as Routine 1, then a ball-detection handshake,
//! a dead-reckoned return to the start tile, and one fire followed by a
//! fixed six-cycle reposition-drive-align-fire block.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::{
    BrakeMode, Direction, EventSink, LedColor, LedId, MotorId, RobotHal, SensorId,
};
use crate::config::RobotConfig;
use crate::state::RobotState;

use super::waits::{self, WaitBound};
use super::{RoutineId, align_to_back_wall, score_fire, wait_shooter_gate_clear};

/// Opening counter-rotation off the start tile.
const OPEN_REPOSITION_DEGREES: f64 = 300.0;
/// Counter-rotation that squares the intake onto the ball line.
const BALL_ALIGN_DEGREES: f64 = 150.0;
/// Per-cycle counter-rotation back toward the ball line.
const CYCLE_REPOSITION_DEGREES: f64 = 850.0;
/// Right wheel runs slower than the left on the cycle reposition to
/// compensate for the robot's drift; 75 % right vs 100 % left.
const CYCLE_RIGHT_VELOCITY_PERCENT: f64 = 75.0;
const CYCLE_LEFT_VELOCITY_PERCENT: f64 = 100.0;
/// Reverse-drive speed inside the repeat block.
const CYCLE_REVERSE_PERCENT: f64 = 75.0;
/// Both wheels on the first wall alignment, before any cycle.
const FIRST_ALIGN_PERCENT: f64 = 50.0;
/// Reverse wind that pre-tensions the shooter before the first shot.
const WIND_UP_DEGREES: f64 = 200.0;
/// Forward rotation that releases the first shot.
const FIRE_DEGREES: f64 = 750.0;

const SETTLE_AFTER_INTAKE_MS: u64 = 400;
const SETTLE_AFTER_ALIGN_MS: u64 = 500;
const SETTLE_FIRST_FIRE_MS: u64 = 2000;
const SETTLE_BETWEEN_GATE_POLLS_MS: u64 = 500;

pub fn run(
    hw: &mut impl RobotHal,
    state: &mut RobotState,
    config: &RobotConfig,
    sink: &mut impl EventSink,
) {
    sink.emit(&AppEvent::RoutineStarted(RoutineId::Two));
    hw.stopwatch_reset();

    hw.set_color(LedId::Left, LedColor::Yellow);
    hw.set_color(LedId::Right, LedColor::Yellow);

    hw.set_stopping(MotorId::LeftDrive, BrakeMode::Hold);
    hw.set_stopping(MotorId::RightDrive, BrakeMode::Hold);

    // Swing off the start tile.
    hw.spin_for(MotorId::LeftDrive, Direction::Reverse, OPEN_REPOSITION_DEGREES, false);
    hw.spin_for(MotorId::RightDrive, Direction::Forward, OPEN_REPOSITION_DEGREES, true);

    // Intake on.
    hw.spin(MotorId::TopAccumulator, Direction::Reverse, 100.0);
    hw.spin(MotorId::BottomAccumulator, Direction::Forward, 100.0);

    // Square the intake onto the ball line.
    hw.spin_for(MotorId::LeftDrive, Direction::Forward, BALL_ALIGN_DEGREES, false);
    hw.spin_for(MotorId::RightDrive, Direction::Reverse, BALL_ALIGN_DEGREES, true);

    // Ball handshake: wait for a ball to appear at the intake, let it
    // seat, then crawl forward until it disappears inside the robot.
    // Neither wait is time-bounded; a missing ball stalls the routine
    // here (inherited limitation — see DESIGN.md).
    let ball_threshold = config.ball_detect_threshold_mm;
    let poll = config.poll_interval_ms;
    waits::poll_while(
        hw,
        WaitBound::Unbounded,
        |h| h.object_distance_mm(SensorId::Ball) >= ball_threshold,
        |h| h.sleep_ms(poll),
    );
    waits::settle(hw, SETTLE_AFTER_INTAKE_MS);
    waits::poll_while(
        hw,
        WaitBound::Unbounded,
        |h| h.object_distance_mm(SensorId::Ball) <= ball_threshold,
        |h| {
            h.sleep_ms(poll);
            h.spin(MotorId::LeftDrive, Direction::Forward, 100.0);
            h.spin(MotorId::RightDrive, Direction::Reverse, 100.0);
        },
    );

    hw.stop(MotorId::LeftDrive);
    hw.stop(MotorId::RightDrive);
    hw.stop(MotorId::TopAccumulator);
    hw.stop(MotorId::BottomAccumulator);

    // Dead-reckoned return to the start tile. No sensor covers this leg;
    // the duration is field-tuned (see DESIGN.md on positional drift).
    hw.spin(MotorId::LeftDrive, Direction::Reverse, 100.0);
    hw.spin(MotorId::RightDrive, Direction::Forward, 100.0);
    hw.sleep_ms(config.return_drive_ms);
    hw.stop(MotorId::LeftDrive);
    hw.stop(MotorId::RightDrive);

    info!("routine 2: returned to start, aligning to back wall");
    align_to_back_wall(hw, config, FIRST_ALIGN_PERCENT, FIRST_ALIGN_PERCENT);
    hw.stop(MotorId::LeftDrive);
    hw.stop(MotorId::RightDrive);
    waits::settle(hw, SETTLE_AFTER_ALIGN_MS);

    // First fire: wind up and release, then feed until the gate clears.
    hw.spin_for(MotorId::Shooter, Direction::Reverse, WIND_UP_DEGREES, true);
    hw.spin_for(MotorId::Shooter, Direction::Forward, FIRE_DEGREES, true);

    hw.spin(MotorId::MiniAccumulator, Direction::Forward, 100.0);
    hw.spin(MotorId::TopAccumulator, Direction::Reverse, 100.0);
    hw.spin(MotorId::BottomAccumulator, Direction::Forward, 100.0);

    wait_shooter_gate_clear(hw, config);
    waits::settle(hw, SETTLE_FIRST_FIRE_MS);

    hw.stop(MotorId::MiniAccumulator);
    score_fire(hw, state, RoutineId::Two, sink);

    // Repeat block: reposition, drive back, re-align, fire.
    for cycle in 1..=config.fire_cycles {
        hw.set_velocity(MotorId::RightDrive, CYCLE_RIGHT_VELOCITY_PERCENT);
        hw.set_velocity(MotorId::LeftDrive, CYCLE_LEFT_VELOCITY_PERCENT);
        hw.spin_for(MotorId::LeftDrive, Direction::Forward, CYCLE_REPOSITION_DEGREES, false);
        hw.spin_for(MotorId::RightDrive, Direction::Reverse, CYCLE_REPOSITION_DEGREES, true);

        hw.spin(MotorId::LeftDrive, Direction::Reverse, CYCLE_REVERSE_PERCENT);
        hw.spin(MotorId::RightDrive, Direction::Forward, CYCLE_REVERSE_PERCENT);
        hw.sleep_ms(config.cycle_reverse_ms);
        hw.stop(MotorId::LeftDrive);
        hw.stop(MotorId::RightDrive);

        align_to_back_wall(hw, config, 100.0, 100.0);

        // Drive stays pressed into the wall while the shot goes off.
        hw.spin(MotorId::MiniAccumulator, Direction::Forward, 100.0);
        hw.spin(MotorId::TopAccumulator, Direction::Reverse, 100.0);
        hw.spin(MotorId::BottomAccumulator, Direction::Forward, 100.0);

        wait_shooter_gate_clear(hw, config);
        waits::settle(hw, SETTLE_BETWEEN_GATE_POLLS_MS);
        wait_shooter_gate_clear(hw, config);
        waits::settle(hw, SETTLE_BETWEEN_GATE_POLLS_MS);

        hw.stop(MotorId::MiniAccumulator);
        score_fire(hw, state, RoutineId::Two, sink);
        info!("routine 2: cycle {cycle}/{} complete", config.fire_cycles);
    }

    // Safe end state: everything stopped, drives coasting, lights green.
    hw.stop(MotorId::TopAccumulator);
    hw.stop(MotorId::BottomAccumulator);
    hw.set_stopping(MotorId::LeftDrive, BrakeMode::Coast);
    hw.set_stopping(MotorId::RightDrive, BrakeMode::Coast);
    hw.stop(MotorId::LeftDrive);
    hw.stop(MotorId::RightDrive);
    hw.set_color(LedId::Left, LedColor::Green);
    hw.set_color(LedId::Right, LedColor::Green);

    sink.emit(&AppEvent::RoutineFinished {
        routine: RoutineId::Two,
        elapsed_ms: hw.stopwatch_ms(),
        total_balls: state.balls_scored,
    });
}
