//! Port traits — the boundary between routine logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService / routine bodies
//! ```
//!
//! Driven adapters (the VEX brain, or the host-side simulator) implement
//! these traits. Routine bodies consume them via generics, so the
//! sequencer never touches hardware directly and tests can script every
//! sensor reading.

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Device identities
// ───────────────────────────────────────────────────────────────

/// Every motor on the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotorId {
    LeftDrive,
    RightDrive,
    /// Upper intake roller — runs in reverse to pull balls in.
    TopAccumulator,
    /// Lower intake roller.
    BottomAccumulator,
    /// Final feed stage that pushes a ball into the shooter.
    MiniAccumulator,
    Shooter,
}

/// Every distance sensor on the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorId {
    /// Faces the intake; a ball in range reads below the detect threshold.
    Ball,
    /// Faces backwards; used for back-wall alignment.
    Rear,
    /// Watches the shooter exit; a seated ball blocks it.
    ShooterGate,
}

/// The two illuminated touch buttons used for status feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedId {
    Left,
    Right,
}

/// Motor spin direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

/// What a stopped motor does with external torque.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrakeMode {
    /// Actively hold position (drift resistance during choreography).
    Hold,
    /// Freewheel (safe end-of-routine state).
    Coast,
}

/// Status colours: red = idle, yellow = routine running, green = done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedColor {
    Red,
    Yellow,
    Green,
}

/// Touch LED fade behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeMode {
    /// Solid colour, no fading.
    Off,
    Slow,
}

// ───────────────────────────────────────────────────────────────
// Motor port (driven adapter: domain → motor firmware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for motor control channels.
///
/// `spin` and the non-waiting form of `spin_for` are non-blocking start
/// commands; the motion itself runs in the motor firmware. The sequencer
/// only blocks in `spin_for(.., wait = true)` and in its own poll loops.
pub trait MotorPort {
    /// Spin continuously at `speed_percent` (0-100) of the configured velocity.
    fn spin(&mut self, motor: MotorId, direction: Direction, speed_percent: f64);

    /// Rotate by `degrees`, optionally blocking until the motion completes.
    fn spin_for(&mut self, motor: MotorId, direction: Direction, degrees: f64, wait: bool);

    /// Stop, engaging the configured stopping mode.
    fn stop(&mut self, motor: MotorId);

    /// Set the velocity (%) used by subsequent `spin_for` motions.
    fn set_velocity(&mut self, motor: MotorId, percent: f64);

    /// Torque limit (%).
    fn set_max_torque(&mut self, motor: MotorId, percent: f64);

    /// Behaviour when stopped.
    fn set_stopping(&mut self, motor: MotorId, mode: BrakeMode);

    /// Zero the encoder.
    fn reset_position(&mut self, motor: MotorId);
}

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the distance sensors.
pub trait DistancePort {
    /// Distance to the nearest object in millimetres.
    ///
    /// There is no error channel on purpose: the routines treat every
    /// numeric reading as valid and feed it straight into a threshold
    /// comparison, matching the field-tuned behaviour.
    fn object_distance_mm(&mut self, sensor: SensorId) -> f64;
}

// ───────────────────────────────────────────────────────────────
// Status light port
// ───────────────────────────────────────────────────────────────

pub trait LedPort {
    fn set_color(&mut self, led: LedId, color: LedColor);
    fn set_fade(&mut self, led: LedId, mode: FadeMode);
}

// ───────────────────────────────────────────────────────────────
// Clock port (sleep + stopwatch)
// ───────────────────────────────────────────────────────────────

/// Time source for the sequencer: the poll-loop sleep and the single
/// stopwatch used for elapsed-time caps and log timestamps.
///
/// The simulator advances time instantly on `sleep_ms`, which is what
/// lets the test suite fast-forward through tens of seconds of routine.
pub trait ClockPort {
    /// Block the control thread for `ms` milliseconds.
    fn sleep_ms(&mut self, ms: u64);

    /// Restart the stopwatch from zero.
    fn stopwatch_reset(&mut self);

    /// Milliseconds since the last `stopwatch_reset`.
    fn stopwatch_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port. Adapters
/// decide where they go — the stock one writes them to the serial log.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Combined HAL bound
// ───────────────────────────────────────────────────────────────

/// Everything a routine body needs from the hardware, as one bound.
pub trait RobotHal: MotorPort + DistancePort + LedPort + ClockPort {}

impl<T: MotorPort + DistancePort + LedPort + ClockPort> RobotHal for T {}
