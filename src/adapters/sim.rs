//! Simulated robot for host-side tests.
//!
//! [`SimRobot`] implements every port trait: sensors replay scripted
//! readings, the clock advances instantly on `sleep_ms` (so a routine
//! that takes tens of seconds on the field runs in microseconds), and
//! every actuator call is recorded so tests can assert on the full
//! command history.

use std::collections::VecDeque;

use crate::app::events::AppEvent;
use crate::app::ports::{
    BrakeMode, ClockPort, Direction, DistancePort, EventSink, FadeMode, LedColor, LedId, LedPort,
    MotorId, MotorPort, SensorId,
};

// ── Actuator call record ──────────────────────────────────────

/// One recorded hardware call.
#[derive(Debug, Clone, PartialEq)]
pub enum HwCall {
    Spin {
        motor: MotorId,
        direction: Direction,
        speed_percent: f64,
    },
    SpinFor {
        motor: MotorId,
        direction: Direction,
        degrees: f64,
        wait: bool,
    },
    Stop(MotorId),
    SetVelocity {
        motor: MotorId,
        percent: f64,
    },
    SetMaxTorque {
        motor: MotorId,
        percent: f64,
    },
    SetStopping {
        motor: MotorId,
        mode: BrakeMode,
    },
    ResetPosition(MotorId),
    SetColor {
        led: LedId,
        color: LedColor,
    },
    SetFade {
        led: LedId,
        mode: FadeMode,
    },
}

// ── Scripted sensor ───────────────────────────────────────────

/// A scripted reading sequence: each read consumes the next queued value,
/// then the script settles on `rest` forever.
#[derive(Debug, Clone)]
pub struct SensorScript {
    queue: VecDeque<f64>,
    rest: f64,
}

impl SensorScript {
    /// Always read `value`.
    pub fn constant(value: f64) -> Self {
        Self {
            queue: VecDeque::new(),
            rest: value,
        }
    }

    /// Read each of `readings` once, in order, then `rest` forever.
    pub fn steps(readings: impl IntoIterator<Item = f64>, rest: f64) -> Self {
        Self {
            queue: readings.into_iter().collect(),
            rest,
        }
    }

    fn next(&mut self) -> f64 {
        self.queue.pop_front().unwrap_or(self.rest)
    }
}

// ── SimRobot ──────────────────────────────────────────────────

/// Scripted, recording robot.
///
/// The default scripts describe an "instantly satisfied field": the ball
/// appears at the intake on the first read and is swallowed on the next,
/// the back wall is already in range, and the shooter gate is clear —
/// so every wait loop exits on its first check and full routines
/// complete without any scripting. Tests override individual scripts to
/// hold a loop open for a chosen number of polls.
pub struct SimRobot {
    pub calls: Vec<HwCall>,
    ball: SensorScript,
    rear: SensorScript,
    gate: SensorScript,
    now_ms: u64,
    stopwatch_zero: u64,
}

impl SimRobot {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            ball: SensorScript::steps([20.0], 40.0),
            rear: SensorScript::constant(10.0),
            gate: SensorScript::constant(0.0),
            now_ms: 0,
            stopwatch_zero: 0,
        }
    }

    pub fn script_ball(&mut self, script: SensorScript) {
        self.ball = script;
    }

    pub fn script_rear(&mut self, script: SensorScript) {
        self.rear = script;
    }

    pub fn script_gate(&mut self, script: SensorScript) {
        self.gate = script;
    }

    /// Simulated time since power-up.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    // ── Call-history queries ──────────────────────────────────

    /// Count `spin` commands matching the given motor/direction/speed.
    pub fn count_spins(&self, motor: MotorId, direction: Direction, speed_percent: f64) -> usize {
        self.calls
            .iter()
            .filter(|c| {
                matches!(c, HwCall::Spin {
                    motor: m,
                    direction: d,
                    speed_percent: s,
                } if *m == motor && *d == direction && (*s - speed_percent).abs() < f64::EPSILON)
            })
            .count()
    }

    /// Count `spin_for` commands on a motor in a direction.
    pub fn count_spin_fors(&self, motor: MotorId, direction: Direction) -> usize {
        self.calls
            .iter()
            .filter(|c| {
                matches!(c, HwCall::SpinFor {
                    motor: m,
                    direction: d,
                    ..
                } if *m == motor && *d == direction)
            })
            .count()
    }

    /// Last colour commanded on a status LED.
    pub fn led_color(&self, led: LedId) -> Option<LedColor> {
        self.calls.iter().rev().find_map(|c| match c {
            HwCall::SetColor { led: l, color } if *l == led => Some(*color),
            _ => None,
        })
    }

    /// `true` if the last motion-affecting command on the motor stopped it.
    pub fn is_stopped(&self, motor: MotorId) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                HwCall::Stop(m) if *m == motor => Some(true),
                HwCall::Spin { motor: m, .. } | HwCall::SpinFor { motor: m, .. } if *m == motor => {
                    Some(false)
                }
                _ => None,
            })
            .unwrap_or(true)
    }
}

impl Default for SimRobot {
    fn default() -> Self {
        Self::new()
    }
}

impl MotorPort for SimRobot {
    fn spin(&mut self, motor: MotorId, direction: Direction, speed_percent: f64) {
        self.calls.push(HwCall::Spin {
            motor,
            direction,
            speed_percent,
        });
    }

    fn spin_for(&mut self, motor: MotorId, direction: Direction, degrees: f64, wait: bool) {
        self.calls.push(HwCall::SpinFor {
            motor,
            direction,
            degrees,
            wait,
        });
    }

    fn stop(&mut self, motor: MotorId) {
        self.calls.push(HwCall::Stop(motor));
    }

    fn set_velocity(&mut self, motor: MotorId, percent: f64) {
        self.calls.push(HwCall::SetVelocity { motor, percent });
    }

    fn set_max_torque(&mut self, motor: MotorId, percent: f64) {
        self.calls.push(HwCall::SetMaxTorque { motor, percent });
    }

    fn set_stopping(&mut self, motor: MotorId, mode: BrakeMode) {
        self.calls.push(HwCall::SetStopping { motor, mode });
    }

    fn reset_position(&mut self, motor: MotorId) {
        self.calls.push(HwCall::ResetPosition(motor));
    }
}

impl DistancePort for SimRobot {
    fn object_distance_mm(&mut self, sensor: SensorId) -> f64 {
        match sensor {
            SensorId::Ball => self.ball.next(),
            SensorId::Rear => self.rear.next(),
            SensorId::ShooterGate => self.gate.next(),
        }
    }
}

impl LedPort for SimRobot {
    fn set_color(&mut self, led: LedId, color: LedColor) {
        self.calls.push(HwCall::SetColor { led, color });
    }

    fn set_fade(&mut self, led: LedId, mode: FadeMode) {
        self.calls.push(HwCall::SetFade { led, mode });
    }
}

impl ClockPort for SimRobot {
    fn sleep_ms(&mut self, ms: u64) {
        self.now_ms += ms;
    }

    fn stopwatch_reset(&mut self) {
        self.stopwatch_zero = self.now_ms;
    }

    fn stopwatch_ms(&self) -> u64 {
        self.now_ms - self.stopwatch_zero
    }
}

// ── Recording event sink ──────────────────────────────────────

/// Event sink that stores everything for later assertions.
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Running ball totals from every `CycleScored`, in emit order.
    pub fn scored_totals(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::CycleScored { total_balls, .. } => Some(*total_balls),
                _ => None,
            })
            .collect()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_sensor_steps_then_rests() {
        let mut s = SensorScript::steps([40.0, 40.0], 20.0);
        assert!((s.next() - 40.0).abs() < f64::EPSILON);
        assert!((s.next() - 40.0).abs() < f64::EPSILON);
        assert!((s.next() - 20.0).abs() < f64::EPSILON);
        assert!((s.next() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sleep_advances_sim_time_instantly() {
        let mut sim = SimRobot::new();
        sim.sleep_ms(4000);
        assert_eq!(sim.now_ms(), 4000);
        sim.stopwatch_reset();
        sim.sleep_ms(123);
        assert_eq!(sim.stopwatch_ms(), 123);
    }

    #[test]
    fn stop_tracking_follows_last_command() {
        let mut sim = SimRobot::new();
        assert!(sim.is_stopped(MotorId::LeftDrive), "no commands yet");
        sim.spin(MotorId::LeftDrive, Direction::Forward, 50.0);
        assert!(!sim.is_stopped(MotorId::LeftDrive));
        sim.stop(MotorId::LeftDrive);
        assert!(sim.is_stopped(MotorId::LeftDrive));
    }
}
