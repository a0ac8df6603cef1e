//! VEX brain adapter — bridges real devices to the port traits.
//!
//! The only module in the system that touches the SDK. Motors, distance
//! sensors and the illuminated touch buttons are resolved to raw device
//! handles at startup; everything after that is thin FFI plumbing.
//!
//! Only compiled with the `brain` cargo feature.

use vex_sdk::{
    V5MotorBrakeMode, V5_DeviceT, vexDeviceAdiValueGet, vexDeviceAdiValueSet,
    vexDeviceDistanceDistanceGet, vexDeviceGetByIndex, vexDeviceMotorAbsoluteTargetSet,
    vexDeviceMotorBrakeModeSet, vexDeviceMotorCurrentLimitSet, vexDeviceMotorPositionGet,
    vexDeviceMotorPositionReset, vexDeviceMotorVelocitySet, vexSerialWriteBuffer,
    vexSystemPowerupTimeGet, vexTasksRun,
};

use crate::app::ports::{
    BrakeMode, ClockPort, Direction, DistancePort, FadeMode, LedColor, LedId, LedPort, MotorId,
    MotorPort, SensorId,
};
use crate::error::{Error, Result};
use crate::events::{BUTTON_EVENTS, Event};
use crate::pins;

/// Full-speed cartridge velocity (rpm at 100 %).
const MAX_RPM: f64 = 200.0;
/// Encoder ticks per output-shaft degree for the stock cartridge.
const TICKS_PER_DEGREE: f64 = 900.0 / 360.0;
/// Current limit at 100 % torque (mA).
const MAX_CURRENT_MA: f64 = 2500.0;
/// Position window that counts as "motion complete" (ticks).
const TARGET_WINDOW_TICKS: f64 = 5.0;

/// The onboard three-wire ports present as one internal device.
const ADI_DEVICE_INDEX: u32 = 21;

// ADI channel map for the button/LED breakout.
const ADI_LEFT_LED: u32 = 0;
const ADI_RIGHT_LED: u32 = 1;
const ADI_LEFT_BUTTON: u32 = 4;
const ADI_RIGHT_BUTTON: u32 = 5;
const ADI_CHECK_BUTTON: u32 = 6;
const ADI_RESET_BUTTON: u32 = 7;
// Speed-bump shares the reset breakout but on its own line.
const ADI_SPEED_BUTTON: u32 = 3;

// ── Serial logger ─────────────────────────────────────────────

const STDIO_CHANNEL: u32 = 1;

struct SerialLogger;

static SERIAL_LOGGER: SerialLogger = SerialLogger;

impl log::Log for SerialLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Info
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}\n", record.level(), record.args());
        unsafe {
            vexSerialWriteBuffer(STDIO_CHANNEL, line.as_ptr(), line.len() as u32);
        }
    }

    fn flush(&self) {}
}

/// Route `log` macros to the USB serial console. Call once at startup.
pub fn init_logging() {
    if log::set_logger(&SERIAL_LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }
}

fn device_on_port(port: u8) -> Result<V5_DeviceT> {
    let handle = unsafe { vexDeviceGetByIndex(u32::from(port - 1)) };
    if handle.is_null() {
        return Err(Error::PortVacant(port));
    }
    Ok(handle)
}

fn signed_rpm(direction: Direction, percent: f64) -> i32 {
    let rpm = percent / 100.0 * MAX_RPM;
    match direction {
        Direction::Forward => rpm as i32,
        Direction::Reverse => -rpm as i32,
    }
}

/// Concrete adapter over the real robot.
pub struct BrainRobot {
    motors: [V5_DeviceT; 6],
    /// Velocity (%) applied to `spin_for` motions, per motor.
    velocities: [f64; 6],
    sensors: [V5_DeviceT; 3],
    adi: V5_DeviceT,
    /// Last sampled level per button line, for edge detection.
    button_levels: [bool; 5],
    stopwatch_zero_us: u64,
}

impl BrainRobot {
    /// Resolve every device handle. Fails fast on an unplugged port so
    /// a mis-wired robot is caught at power-up, not mid-routine.
    pub fn open() -> Result<Self> {
        let motors = [
            device_on_port(pins::PORT_LEFT_DRIVE)?,
            device_on_port(pins::PORT_RIGHT_DRIVE)?,
            device_on_port(pins::PORT_TOP_ACCUMULATOR)?,
            device_on_port(pins::PORT_BOTTOM_ACCUMULATOR)?,
            device_on_port(pins::PORT_MINI_ACCUMULATOR)?,
            device_on_port(pins::PORT_SHOOTER)?,
        ];
        let sensors = [
            device_on_port(pins::PORT_BALL_SENSOR)?,
            device_on_port(pins::PORT_REAR_SENSOR)?,
            device_on_port(pins::PORT_SHOOTER_GATE_SENSOR)?,
        ];
        let adi = unsafe { vexDeviceGetByIndex(ADI_DEVICE_INDEX) };
        if adi.is_null() {
            return Err(Error::Init("ADI device unavailable"));
        }
        Ok(Self {
            motors,
            velocities: [100.0; 6],
            sensors,
            adi,
            button_levels: [false; 5],
            stopwatch_zero_us: unsafe { vexSystemPowerupTimeGet() },
        })
    }

    /// Power-up device setup: ball-handling motors hold position with
    /// full torque and a zeroed encoder, drives get full torque, both
    /// touch LEDs go solid red (idle).
    pub fn init_devices(&mut self) {
        for motor in [
            MotorId::TopAccumulator,
            MotorId::BottomAccumulator,
            MotorId::MiniAccumulator,
            MotorId::Shooter,
        ] {
            self.set_stopping(motor, BrakeMode::Hold);
            self.set_max_torque(motor, 100.0);
            self.set_velocity(motor, 100.0);
            self.reset_position(motor);
        }
        for motor in [MotorId::LeftDrive, MotorId::RightDrive] {
            self.set_max_torque(motor, 100.0);
            self.set_velocity(motor, 100.0);
        }
        for led in [LedId::Left, LedId::Right] {
            self.set_fade(led, FadeMode::Off);
            self.set_color(led, LedColor::Red);
        }
    }

    /// Sample the button lines and push an event per rising edge.
    /// Call from the main loop between command dispatches.
    pub fn poll_buttons(&mut self) {
        const LINES: [(u32, Event); 5] = [
            (ADI_LEFT_BUTTON, Event::TouchLedPressed),
            (ADI_RIGHT_BUTTON, Event::TouchLedPressed),
            (ADI_CHECK_BUTTON, Event::CheckPressed),
            (ADI_RESET_BUTTON, Event::ShooterResetPressed),
            (ADI_SPEED_BUTTON, Event::SpeedUpPressed),
        ];
        for (i, (channel, event)) in LINES.iter().enumerate() {
            let level = unsafe { vexDeviceAdiValueGet(self.adi, *channel) } != 0;
            if level && !self.button_levels[i] {
                let _ = BUTTON_EVENTS.push(*event);
            }
            self.button_levels[i] = level;
        }
    }

    fn motor(&self, motor: MotorId) -> V5_DeviceT {
        self.motors[Self::motor_index(motor)]
    }

    const fn motor_index(motor: MotorId) -> usize {
        match motor {
            MotorId::LeftDrive => 0,
            MotorId::RightDrive => 1,
            MotorId::TopAccumulator => 2,
            MotorId::BottomAccumulator => 3,
            MotorId::MiniAccumulator => 4,
            MotorId::Shooter => 5,
        }
    }

    fn now_us(&self) -> u64 {
        unsafe { vexSystemPowerupTimeGet() }
    }
}

impl MotorPort for BrainRobot {
    fn spin(&mut self, motor: MotorId, direction: Direction, speed_percent: f64) {
        let device = self.motor(motor);
        unsafe {
            vexDeviceMotorVelocitySet(device, signed_rpm(direction, speed_percent));
        }
    }

    fn spin_for(&mut self, motor: MotorId, direction: Direction, degrees: f64, wait: bool) {
        let device = self.motor(motor);
        let delta_ticks = degrees * TICKS_PER_DEGREE;
        let target = unsafe { vexDeviceMotorPositionGet(device) }
            + match direction {
                Direction::Forward => delta_ticks,
                Direction::Reverse => -delta_ticks,
            };
        let velocity_rpm =
            (self.velocities[Self::motor_index(motor)] / 100.0 * MAX_RPM) as i32;
        unsafe {
            vexDeviceMotorAbsoluteTargetSet(device, target, velocity_rpm);
        }
        if wait {
            // The motion runs in the motor firmware; block until the
            // encoder lands in the target window.
            while (unsafe { vexDeviceMotorPositionGet(device) } - target).abs()
                > TARGET_WINDOW_TICKS
            {
                unsafe { vexTasksRun() };
            }
        }
    }

    fn stop(&mut self, motor: MotorId) {
        let device = self.motor(motor);
        unsafe {
            vexDeviceMotorVelocitySet(device, 0);
        }
    }

    fn set_velocity(&mut self, motor: MotorId, percent: f64) {
        self.velocities[Self::motor_index(motor)] = percent;
    }

    fn set_max_torque(&mut self, motor: MotorId, percent: f64) {
        let device = self.motor(motor);
        unsafe {
            vexDeviceMotorCurrentLimitSet(device, (percent / 100.0 * MAX_CURRENT_MA) as i32);
        }
    }

    fn set_stopping(&mut self, motor: MotorId, mode: BrakeMode) {
        let device = self.motor(motor);
        let sdk_mode = match mode {
            BrakeMode::Hold => V5MotorBrakeMode::kV5MotorBrakeModeHold,
            BrakeMode::Coast => V5MotorBrakeMode::kV5MotorBrakeModeCoast,
        };
        unsafe {
            vexDeviceMotorBrakeModeSet(device, sdk_mode);
        }
    }

    fn reset_position(&mut self, motor: MotorId) {
        let device = self.motor(motor);
        unsafe {
            vexDeviceMotorPositionReset(device);
        }
    }
}

impl DistancePort for BrainRobot {
    fn object_distance_mm(&mut self, sensor: SensorId) -> f64 {
        let device = self.sensors[match sensor {
            SensorId::Ball => 0,
            SensorId::Rear => 1,
            SensorId::ShooterGate => 2,
        }];
        // 9999 is the sensor's out-of-range sentinel; pass it through as
        // a plain reading — it fails every "near" threshold on its own.
        f64::from(unsafe { vexDeviceDistanceDistanceGet(device) })
    }
}

impl LedPort for BrainRobot {
    fn set_color(&mut self, led: LedId, color: LedColor) {
        let channel = match led {
            LedId::Left => ADI_LEFT_LED,
            LedId::Right => ADI_RIGHT_LED,
        };
        // The button breakout decodes a small colour index on its LED line.
        let code = match color {
            LedColor::Red => 1,
            LedColor::Yellow => 2,
            LedColor::Green => 3,
        };
        unsafe {
            vexDeviceAdiValueSet(self.adi, channel, code);
        }
    }

    fn set_fade(&mut self, led: LedId, mode: FadeMode) {
        let channel = match led {
            LedId::Left => ADI_LEFT_LED,
            LedId::Right => ADI_RIGHT_LED,
        };
        let code = match mode {
            FadeMode::Off => 0,
            FadeMode::Slow => 4,
        };
        unsafe {
            vexDeviceAdiValueSet(self.adi, channel, code);
        }
    }
}

impl ClockPort for BrainRobot {
    fn sleep_ms(&mut self, ms: u64) {
        let deadline = self.now_us() + ms * 1000;
        while self.now_us() < deadline {
            // Keep the SDK housekeeping (serial, device refresh) alive
            // while we block.
            unsafe { vexTasksRun() };
        }
    }

    fn stopwatch_reset(&mut self) {
        self.stopwatch_zero_us = self.now_us();
    }

    fn stopwatch_ms(&self) -> u64 {
        (self.now_us() - self.stopwatch_zero_us) / 1000
    }
}
