//! Relaybot firmware — main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │   BrainRobot                LogEventSink                 │
//! │   (Motor+Distance+Led+Clock ports, button sampling)      │
//! │                                                          │
//! │  ────────────── Port Trait Boundary ──────────────       │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │         AppService (pure logic)                │      │
//! │  │   selector · routine sequencer · RobotState    │      │
//! │  └────────────────────────────────────────────────┘      │
//! │                                                          │
//! │   button sampler ──▶ events::BUTTON_EVENTS (SPSC queue)  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The loop below is the single consumer of the button-event queue.
//! Routines run synchronously inside `handle_command`, so presses that
//! arrive mid-routine wait in the queue — re-entrant routine execution
//! is impossible by construction.

use anyhow::{Context, Result};
use log::info;

use relaybot::adapters::brain::BrainRobot;
use relaybot::adapters::log_sink::LogEventSink;
use relaybot::app::commands::AppCommand;
use relaybot::app::ports::ClockPort;
use relaybot::app::service::AppService;
use relaybot::config::RobotConfig;
use relaybot::events::{BUTTON_EVENTS, Event};

/// Idle cadence of the outer input loop (ms).
const INPUT_POLL_MS: u64 = 10;

fn command_for(event: Event) -> AppCommand {
    match event {
        Event::TouchLedPressed => AppCommand::CyclePress,
        Event::CheckPressed => AppCommand::ProbePressCount,
        Event::ShooterResetPressed => AppCommand::ResetShooter,
        Event::SpeedUpPressed => AppCommand::BumpDriveSpeed,
    }
}

fn main() -> Result<()> {
    relaybot::adapters::brain::init_logging();
    info!("relaybot v{}", env!("CARGO_PKG_VERSION"));

    let mut robot = BrainRobot::open().context("device resolution failed")?;
    robot.init_devices();

    let config = RobotConfig::default();
    let mut service = AppService::new(config);
    let mut sink = LogEventSink::new();

    loop {
        robot.poll_buttons();
        while let Some(event) = BUTTON_EVENTS.pop() {
            service.handle_command(command_for(event), &mut robot, &mut sink);
        }
        robot.sleep_ms(INPUT_POLL_MS);
    }
}
