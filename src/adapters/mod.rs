//! Adapters — port-trait implementations for the outside world.
//!
//! [`sim`] and [`log_sink`] always compile and back the host-side test
//! suite; [`brain`] wraps the VEX SDK and only exists with the `brain`
//! cargo feature.

#[cfg(feature = "brain")]
pub mod brain;

pub mod log_sink;
pub mod sim;
