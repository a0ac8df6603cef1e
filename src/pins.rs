//! Smart-port assignments.
//!
//! Single source of truth for which device lives on which port of the
//! brain. Matches the competition robot's wiring loom.

// ── Drivetrain ────────────────────────────────────────────────
pub const PORT_LEFT_DRIVE: u8 = 6;
pub const PORT_RIGHT_DRIVE: u8 = 1;

// ── Ball handling ─────────────────────────────────────────────
pub const PORT_TOP_ACCUMULATOR: u8 = 2;
pub const PORT_BOTTOM_ACCUMULATOR: u8 = 12;
pub const PORT_MINI_ACCUMULATOR: u8 = 11;
pub const PORT_SHOOTER: u8 = 7;

// ── Distance sensors ──────────────────────────────────────────
pub const PORT_BALL_SENSOR: u8 = 4;
pub const PORT_REAR_SENSOR: u8 = 9;
pub const PORT_SHOOTER_GATE_SENSOR: u8 = 8;

// ── Status / input touch LEDs ─────────────────────────────────
pub const PORT_LEFT_TOUCH_LED: u8 = 5;
pub const PORT_RIGHT_TOUCH_LED: u8 = 3;
