//! Unified error types for the relaybot firmware.
//!
//! The routine core itself is infallible: any numeric sensor reading is
//! fed straight into its threshold comparison, and motor commands are
//! fire-and-forget. Errors only arise while opening and
//! initialising devices, so the taxonomy stays small. All variants are
//! `Copy` so they can be passed around without allocation.

use core::fmt;

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// No device answered on the given smart port.
    PortVacant(u8),
    /// The device on the given smart port is not the expected kind.
    DeviceMismatch(u8),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PortVacant(port) => write!(f, "no device on port {port}"),
            Self::DeviceMismatch(port) => write!(f, "unexpected device kind on port {port}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
