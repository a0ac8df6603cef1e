//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the robot: routine
//! selection, command dispatch, and the shared state they mutate. All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without a real brain.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
