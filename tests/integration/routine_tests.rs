//! Full-routine runs against the scripted simulator.
//!
//! The default [`SimRobot`] scripts describe a field where every sensor
//! condition is satisfied on its first read, so a routine's baseline run
//! takes only its settle time. Individual tests re-script one sensor to
//! hold a wait loop open for a known number of polls.

use relaybot::adapters::sim::{HwCall, RecordingSink, SensorScript, SimRobot};
use relaybot::app::commands::AppCommand;
use relaybot::app::events::AppEvent;
use relaybot::app::ports::{Direction, LedColor, LedId, MotorId};
use relaybot::app::service::AppService;
use relaybot::auton::RoutineId;
use relaybot::config::RobotConfig;

fn service() -> AppService {
    AppService::new(RobotConfig::default())
}

#[test]
fn routine_one_scores_one_fire_cycle() {
    let mut sim = SimRobot::new();
    let mut sink = RecordingSink::new();
    let mut app = service();

    app.run_routine(RoutineId::One, &mut sim, &mut sink);

    assert_eq!(app.balls_scored(), 2);
    assert_eq!(sink.scored_totals(), vec![2]);
    assert!(sink.events.contains(&AppEvent::RoutineStarted(RoutineId::One)));
    assert!(matches!(
        sink.events.last(),
        Some(AppEvent::RoutineFinished {
            routine: RoutineId::One,
            total_balls: 2,
            ..
        })
    ));
}

#[test]
fn routine_one_parks_safe() {
    let mut sim = SimRobot::new();
    let mut sink = RecordingSink::new();
    let mut app = service();

    app.run_routine(RoutineId::One, &mut sim, &mut sink);

    assert!(sim.is_stopped(MotorId::LeftDrive));
    assert!(sim.is_stopped(MotorId::RightDrive));
    assert!(sim.is_stopped(MotorId::TopAccumulator));
    assert!(sim.is_stopped(MotorId::BottomAccumulator));
    assert!(sim.is_stopped(MotorId::MiniAccumulator));
    assert_eq!(sim.led_color(LedId::Left), Some(LedColor::Green));
    assert_eq!(sim.led_color(LedId::Right), Some(LedColor::Green));
}

#[test]
fn intake_arc_drives_once_per_poll_until_ball_detected() {
    let mut sim = SimRobot::new();
    // Hold the intake wait open for exactly 7 polls, then hand it a ball.
    sim.script_ball(SensorScript::steps([40.0; 7], 20.0));
    let mut sink = RecordingSink::new();
    let mut app = service();

    app.run_routine(RoutineId::One, &mut sim, &mut sink);

    assert_eq!(sim.count_spins(MotorId::LeftDrive, Direction::Forward, 35.0), 7);
    assert_eq!(sim.count_spins(MotorId::RightDrive, Direction::Reverse, 100.0), 7);
    assert_eq!(app.balls_scored(), 2);
}

#[test]
fn wall_align_cap_lets_routine_one_finish_with_a_dead_rear_sensor() {
    let mut sim = SimRobot::new();
    // Rear sensor never sees the wall; only the alignment cap ends the loop.
    sim.script_rear(SensorScript::constant(1000.0));
    let mut sink = RecordingSink::new();
    let mut app = service();

    app.run_routine(RoutineId::One, &mut sim, &mut sink);

    // Cap is 4000 ms with a 50 ms poll: the loop body runs for every
    // stopwatch reading in 0..=4000, i.e. 81 times, then the cap bites.
    assert_eq!(sim.count_spins(MotorId::LeftDrive, Direction::Reverse, 38.0), 81);
    let elapsed = sim.now_ms();
    assert!(
        (4050..=5000).contains(&elapsed),
        "capped align dominates the run, got {elapsed} ms"
    );
    // The routine still completes and scores.
    assert_eq!(app.balls_scored(), 2);
    assert!(matches!(
        sink.events.last(),
        Some(AppEvent::RoutineFinished { .. })
    ));
}

#[test]
fn routine_two_scores_seven_fire_cycles() {
    let mut sim = SimRobot::new();
    let mut sink = RecordingSink::new();
    let mut app = service();

    app.run_routine(RoutineId::Two, &mut sim, &mut sink);

    assert_eq!(app.balls_scored(), 14);
    assert_eq!(sink.scored_totals(), vec![2, 4, 6, 8, 10, 12, 14]);
    assert!(matches!(
        sink.events.last(),
        Some(AppEvent::RoutineFinished {
            routine: RoutineId::Two,
            total_balls: 14,
            ..
        })
    ));
}

#[test]
fn routine_two_repositions_once_per_repeat_cycle() {
    let mut sim = SimRobot::new();
    let mut sink = RecordingSink::new();
    let mut app = service();

    app.run_routine(RoutineId::Two, &mut sim, &mut sink);

    // One 850-degree reposition pair per repeat cycle, and only there.
    let repositions = sim
        .calls
        .iter()
        .filter(|c| {
            matches!(c, HwCall::SpinFor {
                motor: MotorId::LeftDrive,
                direction: Direction::Forward,
                degrees,
                ..
            } if (*degrees - 850.0).abs() < f64::EPSILON)
        })
        .count();
    assert_eq!(repositions, 6);
}

#[test]
fn routine_two_parks_safe() {
    let mut sim = SimRobot::new();
    let mut sink = RecordingSink::new();
    let mut app = service();

    app.run_routine(RoutineId::Two, &mut sim, &mut sink);

    assert!(sim.is_stopped(MotorId::LeftDrive));
    assert!(sim.is_stopped(MotorId::RightDrive));
    assert!(sim.is_stopped(MotorId::TopAccumulator));
    assert!(sim.is_stopped(MotorId::BottomAccumulator));
    assert!(sim.is_stopped(MotorId::MiniAccumulator));
    assert_eq!(sim.led_color(LedId::Left), Some(LedColor::Green));
    assert_eq!(sim.led_color(LedId::Right), Some(LedColor::Green));
}

#[test]
fn press_sequence_runs_one_then_two_then_resets() {
    let mut sim = SimRobot::new();
    // One queued near reading per routine that reads the ball sensor with
    // the "wait for a ball" polarity, then far forever.
    sim.script_ball(SensorScript::steps([20.0, 20.0], 40.0));
    let mut sink = RecordingSink::new();
    let mut app = service();

    app.handle_command(AppCommand::CyclePress, &mut sim, &mut sink);
    assert_eq!(app.balls_scored(), 2);
    assert_eq!(app.press_count(), 1);

    app.handle_command(AppCommand::CyclePress, &mut sim, &mut sink);
    assert_eq!(app.balls_scored(), 16);
    assert_eq!(app.press_count(), 2);

    app.handle_command(AppCommand::CyclePress, &mut sim, &mut sink);
    assert_eq!(app.balls_scored(), 16, "third press must not run a routine");
    assert_eq!(app.press_count(), 0, "third press resets the selector");

    let started = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::RoutineStarted(_)))
        .count();
    assert_eq!(started, 2);
    assert_eq!(sink.events.last(), Some(&AppEvent::PressCounted(0)));
}

#[test]
fn shooter_reset_rewinds_without_blocking_or_scoring() {
    let mut sim = SimRobot::new();
    let mut sink = RecordingSink::new();
    let mut app = service();

    app.handle_command(AppCommand::ResetShooter, &mut sim, &mut sink);

    assert_eq!(
        sim.calls,
        vec![HwCall::SpinFor {
            motor: MotorId::Shooter,
            direction: Direction::Reverse,
            degrees: 2350.0,
            wait: false,
        }]
    );
    assert_eq!(app.balls_scored(), 0);
    assert!(sink.events.contains(&AppEvent::ShooterReset));
}
