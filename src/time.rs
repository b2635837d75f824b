//! Monotonic time sources.
//!
//! Gesture timing works on nanosecond timestamps. Hosts normally use
//! [`MonotonicClock`]; deterministic hosts (replays, tests) drive a
//! [`ManualClock`] by hand.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

pub const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// Converts a duration in seconds to nanoseconds, clamping negatives to zero.
pub fn seconds_to_nanos(seconds: f32) -> u64 {
    if seconds <= 0.0 {
        0
    } else {
        (seconds as f64 * NANOS_PER_SECOND) as u64
    }
}

/// Source of monotonic nanosecond timestamps.
pub trait Clock: Send {
    fn now_nanos(&self) -> u64;
}

/// Wall-clock backed monotonic time, measured from construction.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_nanos(&self) -> u64 {
        // Offset by one so that a timestamp of zero never means "now".
        self.origin.elapsed().as_nanos() as u64 + 1
    }
}

/// Clock advanced explicitly by the host.
///
/// Clones share the same underlying time, so a test can keep a handle while
/// the recognizer owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(nanos: u64) -> Self {
        Self {
            nanos: Arc::new(AtomicU64::new(nanos)),
        }
    }

    pub fn advance_nanos(&self, nanos: u64) {
        self.nanos.fetch_add(nanos, Ordering::SeqCst);
    }

    pub fn advance_secs(&self, seconds: f32) {
        self.advance_nanos(seconds_to_nanos(seconds));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now_nanos(&self) -> u64 {
        self.nanos.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new();
        let other = clock.clone();
        clock.advance_secs(0.5);
        assert_eq!(other.now_nanos(), 1 + 500_000_000);
    }

    #[test]
    fn test_seconds_to_nanos_clamps_negative() {
        assert_eq!(seconds_to_nanos(-1.0), 0);
        assert_eq!(seconds_to_nanos(0.25), 250_000_000);
    }
}
