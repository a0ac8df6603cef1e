//! Relaybot firmware library.
//!
//! Autonomous-routine firmware for a two-motor-drive ball-shooter
//! competition robot: two hand-tuned routines (collect-and-fire, and an
//! extended multi-cycle variant) selected by physical button presses.
//!
//! Exposes the pure-logic modules for host-side testing and simulation.
//! All VEX-brain-specific code is guarded by the `brain` cargo feature
//! within [`adapters`] and the binary entry point.

#![deny(unused_must_use)]

pub mod app;
pub mod auton;
pub mod config;
pub mod events;
pub mod selector;
pub mod state;

pub mod error;
pub mod pins;

pub mod adapters;
