//! Polling wait primitives.
//!
//! Every sensor-gated wait in the routines is a sleep-then-recheck loop
//! with a fixed cadence. This module gives the two shapes a name — a
//! bounded wait with an elapsed-time cap, and a deliberately unbounded
//! one — so the bound (or its absence) is visible at each call site and
//! test harnesses can drive the loops with scripted sensors.

use log::warn;

use crate::app::ports::ClockPort;

/// Upper bound on a polling wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitBound {
    /// Exit after this many stopwatch milliseconds even if the condition
    /// still holds. The stopwatch is reset when the wait begins.
    Capped(u64),
    /// No bound — the wait blocks until the condition clears. Callers
    /// own the liveness argument (usually field geometry).
    Unbounded,
}

/// Poll `holding` and run `body` each time it still holds.
///
/// The check runs first, so a condition that is already clear executes
/// `body` zero times. `body` performs the per-poll work: the cadence
/// sleep, plus any drive commands the wait is supposed to keep issuing.
/// With [`WaitBound::Capped`] the stopwatch is reset on entry and the
/// cap is checked between the condition and the body, giving the
/// `while distance > t && elapsed <= cap` shape.
pub fn poll_while<H, C, B>(hw: &mut H, bound: WaitBound, mut holding: C, mut body: B)
where
    H: ClockPort,
    C: FnMut(&mut H) -> bool,
    B: FnMut(&mut H),
{
    if let WaitBound::Capped(_) = bound {
        hw.stopwatch_reset();
    }
    loop {
        if !holding(hw) {
            break;
        }
        if let WaitBound::Capped(cap_ms) = bound {
            if hw.stopwatch_ms() > cap_ms {
                warn!("bounded wait expired after {cap_ms} ms");
                break;
            }
        }
        body(hw);
    }
}

/// Fixed sleep inserted after a motion so mechanical oscillation damps
/// before the next sensor read.
pub fn settle<H: ClockPort>(hw: &mut H, ms: u64) {
    hw.sleep_ms(ms);
}
