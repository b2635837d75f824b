//! Cancellable one-shot timer backing the long-press gesture.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// One-shot deadline with an atomically claimed "fired" flag.
///
/// The deadline itself is owned by whoever schedules the timer. The fired
/// flag is shared through [`LongPressHandle`] so a separate timer context can
/// claim it with a compare-and-set. A claim made while the deadline is
/// pending is delivered by the next [`poll`](LongPressTimer::poll); a claim
/// with nothing pending only suppresses the session.
#[derive(Debug)]
pub struct LongPressTimer {
    deadline: Option<u64>,
    fired: Arc<AtomicBool>,
}

/// Cloneable view of the fired flag for other threads.
#[derive(Debug, Clone)]
pub struct LongPressHandle {
    fired: Arc<AtomicBool>,
}

impl LongPressHandle {
    /// Claims the long press. Returns false if it was already claimed.
    pub fn try_fire(&self) -> bool {
        self.fired
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}

impl LongPressTimer {
    pub fn new() -> Self {
        Self {
            deadline: None,
            fired: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn handle(&self) -> LongPressHandle {
        LongPressHandle {
            fired: self.fired.clone(),
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Schedules the timer unless it is already pending.
    pub fn schedule(&mut self, deadline: u64) {
        if self.deadline.is_none() {
            self.deadline = Some(deadline);
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    pub fn set_fired(&self, fired: bool) {
        self.fired.store(fired, Ordering::Release);
    }

    /// Returns true once per scheduled deadline: when it has passed, or when
    /// a [`LongPressHandle`] claimed the long press while it was pending.
    /// Either way the fired flag is set afterwards.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline || self.has_fired() => {
                self.deadline = None;
                self.fired.store(true, Ordering::Release);
                true
            }
            _ => false,
        }
    }
}

impl Default for LongPressTimer {
    fn default() -> Self {
        Self::new()
    }
}
