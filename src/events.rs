//! Button event queue.
//!
//! Events are produced by the button sampler (touch-LED presses, brain
//! panel buttons) and consumed by the main control loop, which dispatches
//! them one at a time. Because routines run synchronously on the consumer
//! side, a press that arrives mid-routine simply stays queued until the
//! routine returns — re-entrant routine execution cannot happen.
//!
//! The queue is lock-free so the producer side is also safe to call from
//! interrupt context if button wiring ever moves off the polled sampler.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Button lines │────▶│  Event Queue │────▶│  Main Loop   │
//! │ (producers)  │     │  (lock-free) │     │  (consumer)  │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```

use core::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

/// Maximum number of pending button events.
/// Power of 2 for efficient ring buffer modulo.
const EVENT_QUEUE_CAP: usize = 8;

/// Button events, one per physical input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Event {
    /// Either touch LED was pressed — advance the routine selector.
    TouchLedPressed = 0,
    /// Brain check button — bump and report the press counter.
    CheckPressed = 1,
    /// Brain left button — re-home the shooter.
    ShooterResetPressed = 2,
    /// Brain right button — bump the wall-approach drive speed.
    SpeedUpPressed = 3,
}

fn event_from_raw(raw: u8) -> Option<Event> {
    match raw {
        0 => Some(Event::TouchLedPressed),
        1 => Some(Event::CheckPressed),
        2 => Some(Event::ShooterResetPressed),
        3 => Some(Event::SpeedUpPressed),
        _ => None,
    }
}

// ── Lock-free SPSC ring buffer ────────────────────────────────
//
// Button sampler writes (produces), main loop reads (consumes). Atomic
// indices enforce the SPSC discipline; slots are atomics so the queue
// can live in a static without unsafe buffer access.

/// A fixed-capacity single-producer single-consumer event queue.
pub struct EventQueue {
    head: AtomicUsize,
    tail: AtomicUsize,
    slots: [AtomicU8; EVENT_QUEUE_CAP],
}

/// The global queue fed by the button sampler.
pub static BUTTON_EVENTS: EventQueue = EventQueue::new();

impl EventQueue {
    pub const fn new() -> Self {
        Self {
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
            slots: [const { AtomicU8::new(0) }; EVENT_QUEUE_CAP],
        }
    }

    /// Push an event. Lock-free, safe to call from interrupt context.
    /// Returns `false` if the queue is full (event dropped).
    pub fn push(&self, event: Event) -> bool {
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Acquire);
        let next_head = (head + 1) % EVENT_QUEUE_CAP;

        if next_head == tail {
            return false; // Queue full — drop event.
        }

        self.slots[head].store(event as u8, Ordering::Relaxed);
        self.head.store(next_head, Ordering::Release);
        true
    }

    /// Pop the next event. Called from the main loop (single consumer).
    pub fn pop(&self) -> Option<Event> {
        let tail = self.tail.load(Ordering::Relaxed);
        let head = self.head.load(Ordering::Acquire);

        if tail == head {
            return None; // Empty.
        }

        let raw = self.slots[tail].load(Ordering::Relaxed);
        self.tail.store((tail + 1) % EVENT_QUEUE_CAP, Ordering::Release);

        event_from_raw(raw)
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Relaxed);
        (head + EVENT_QUEUE_CAP - tail) % EVENT_QUEUE_CAP
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_fifo_order() {
        let q = EventQueue::new();
        assert!(q.push(Event::TouchLedPressed));
        assert!(q.push(Event::ShooterResetPressed));
        assert!(q.push(Event::SpeedUpPressed));
        assert_eq!(q.len(), 3);

        assert_eq!(q.pop(), Some(Event::TouchLedPressed));
        assert_eq!(q.pop(), Some(Event::ShooterResetPressed));
        assert_eq!(q.pop(), Some(Event::SpeedUpPressed));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn full_queue_drops_events() {
        let q = EventQueue::new();
        // Ring of CAP slots holds CAP - 1 events.
        for _ in 0..EVENT_QUEUE_CAP - 1 {
            assert!(q.push(Event::CheckPressed));
        }
        assert!(!q.push(Event::CheckPressed), "overflow push must report a drop");
        assert_eq!(q.len(), EVENT_QUEUE_CAP - 1);
    }

    #[test]
    fn wraps_around_the_ring() {
        let q = EventQueue::new();
        for _ in 0..3 * EVENT_QUEUE_CAP {
            assert!(q.push(Event::TouchLedPressed));
            assert_eq!(q.pop(), Some(Event::TouchLedPressed));
        }
        assert!(q.is_empty());
    }
}
