//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (button events,
//! or a test harness) that the [`AppService`](super::service::AppService)
//! interprets and acts upon.

/// Commands that external inputs can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// A routine-selector press: advance the press counter and run the
    /// selected routine, if any.
    CyclePress,

    /// Re-home the shooter mechanism (one reverse wind, non-blocking).
    ResetShooter,

    /// Bump the wall-approach drive speed by the configured step.
    BumpDriveSpeed,

    /// Bump and report the press counter without running anything
    /// (diagnostic button on the brain panel).
    ProbePressCount,
}
