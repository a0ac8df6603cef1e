//! Command dispatch through [`AppService`] outside of routine runs.

use relaybot::adapters::sim::{RecordingSink, SensorScript, SimRobot};
use relaybot::app::commands::AppCommand;
use relaybot::app::events::AppEvent;
use relaybot::app::ports::{Direction, MotorId};
use relaybot::app::service::AppService;
use relaybot::auton::RoutineId;
use relaybot::config::RobotConfig;

fn service() -> AppService {
    AppService::new(RobotConfig::default())
}

#[test]
fn speed_bump_steps_by_two_percent() {
    let mut sim = SimRobot::new();
    let mut sink = RecordingSink::new();
    let mut app = service();
    assert_eq!(app.drive_percent(), 38);

    app.handle_command(AppCommand::BumpDriveSpeed, &mut sim, &mut sink);
    app.handle_command(AppCommand::BumpDriveSpeed, &mut sim, &mut sink);

    assert_eq!(app.drive_percent(), 42);
    assert!(sink.events.contains(&AppEvent::DriveSpeedChanged(40)));
    assert!(sink.events.contains(&AppEvent::DriveSpeedChanged(42)));
    assert!(sim.calls.is_empty(), "speed bump is state-only");
}

#[test]
fn bumped_speed_reaches_the_wall_approach() {
    let mut sim = SimRobot::new();
    // Hold the alignment loop open for three polls so the approach speed
    // shows up in the recorded drive commands.
    sim.script_rear(SensorScript::steps([100.0; 3], 10.0));
    let mut sink = RecordingSink::new();
    let mut app = service();

    app.handle_command(AppCommand::BumpDriveSpeed, &mut sim, &mut sink);
    app.handle_command(AppCommand::BumpDriveSpeed, &mut sim, &mut sink);
    app.run_routine(RoutineId::One, &mut sim, &mut sink);

    assert_eq!(sim.count_spins(MotorId::LeftDrive, Direction::Reverse, 42.0), 3);
    assert_eq!(sim.count_spins(MotorId::LeftDrive, Direction::Reverse, 38.0), 0);
}

#[test]
fn press_probe_counts_without_running_routines() {
    let mut sim = SimRobot::new();
    let mut sink = RecordingSink::new();
    let mut app = service();

    app.handle_command(AppCommand::ProbePressCount, &mut sim, &mut sink);
    app.handle_command(AppCommand::ProbePressCount, &mut sim, &mut sink);

    assert_eq!(app.press_count(), 2);
    assert_eq!(app.balls_scored(), 0);
    assert!(sink.events.contains(&AppEvent::PressCounted(1)));
    assert!(sink.events.contains(&AppEvent::PressCounted(2)));
    assert!(sim.calls.is_empty(), "probing must not touch hardware");

    // A probe-advanced counter feeds the same selector: the next cycle
    // press lands on the reset arm instead of a routine.
    app.handle_command(AppCommand::CyclePress, &mut sim, &mut sink);
    assert_eq!(app.press_count(), 0);
    assert_eq!(app.balls_scored(), 0);
    assert!(sim.calls.is_empty());
}
