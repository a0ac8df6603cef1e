//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a subsystem against
//! the scripted simulator. All tests run on the host with no hardware.

mod routine_tests;
mod service_tests;
