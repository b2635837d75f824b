//! Bounded FIFO between the recognizer (producer) and the host (consumer).

use super::events::InputEvent;
use std::collections::VecDeque;

pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Ordered event queue with a drop-oldest overflow policy.
///
/// When full, pushing discards the oldest pending event and counts the drop.
/// Delivery order always matches insertion order.
#[derive(Debug, Clone)]
pub struct EventQueue {
    events: VecDeque<InputEvent>,
    capacity: usize,
    dropped: u64,
}

impl EventQueue {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        if self.events.len() >= self.capacity {
            if let Some(oldest) = self.events.pop_front() {
                self.dropped += 1;
                log::warn!(
                    "INPUT: Event queue full ({}), dropping {:?}",
                    self.capacity,
                    oldest.kind()
                );
            }
        }
        self.events.push_back(event);
    }

    pub fn pop(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }

    /// Removes and returns every pending event in delivery order.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        self.events.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of events discarded because the host did not drain in time.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}
