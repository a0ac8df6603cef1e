//! Routine selector — the 3-state press-count cycle.
//!
//! Press 1 selects Routine 1, press 2 selects Routine 2, any further
//! press resets the counter to zero without selecting anything:
//!
//! ```text
//!   idle ──press──▶ routine-1 ──press──▶ routine-2 ──press──▶ idle
//! ```
//!
//! The same counter is also bumped by the diagnostic check button (see
//! [`AppCommand::ProbePressCount`](crate::app::commands::AppCommand)), so
//! a probed counter feeds straight into the next selector press.

use crate::auton::RoutineId;
use crate::state::RobotState;

/// Advance the press counter and return the routine it now selects.
pub fn advance(state: &mut RobotState) -> Option<RoutineId> {
    state.press_count = state.press_count.wrapping_add(1);
    match state.press_count {
        1 => Some(RoutineId::One),
        2 => Some(RoutineId::Two),
        _ => {
            state.press_count = 0;
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RobotConfig;

    fn fresh() -> RobotState {
        RobotState::new(&RobotConfig::default())
    }

    #[test]
    fn press_sequence_cycles_one_two_reset() {
        let mut s = fresh();
        assert_eq!(advance(&mut s), Some(RoutineId::One));
        assert_eq!(advance(&mut s), Some(RoutineId::Two));
        assert_eq!(advance(&mut s), None);
        assert_eq!(s.press_count, 0, "third press must reset the counter");
    }

    #[test]
    fn cycle_repeats_after_reset() {
        let mut s = fresh();
        for _ in 0..3 {
            advance(&mut s);
        }
        assert_eq!(advance(&mut s), Some(RoutineId::One));
    }

    #[test]
    fn probed_counter_skips_routines() {
        let mut s = fresh();
        // Two diagnostic bumps leave the counter at 2; the next selector
        // press lands on 3 and resets.
        s.press_count = 2;
        assert_eq!(advance(&mut s), None);
        assert_eq!(s.press_count, 0);
    }
}
