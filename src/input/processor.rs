use super::events::{InputEvent, RawInput};
use super::gesture::GestureRecognizer;
use super::queue::EventQueue;
use crate::config::{GestureConfig, InputConfig};
use crate::time::{Clock, MonotonicClock};

/// Routes raw samples into the event queue and the gesture recognizer.
///
/// Raw events are queued ahead of the gestures they produce, so a consumer
/// always sees `TouchUp` before the matching `Tap`.
pub struct InputProcessor<C: Clock = MonotonicClock> {
    recognizer: GestureRecognizer<C>,
    forward_raw: bool,
}

impl InputProcessor<MonotonicClock> {
    pub fn new(gesture: GestureConfig, input: InputConfig) -> Self {
        Self::with_clock(gesture, input, MonotonicClock::new())
    }
}

impl<C: Clock> InputProcessor<C> {
    pub fn with_clock(gesture: GestureConfig, input: InputConfig, clock: C) -> Self {
        let recognizer = GestureRecognizer::with_clock(gesture, clock)
            .with_queue(EventQueue::new(input.queue_capacity));
        Self {
            recognizer,
            forward_raw: input.forward_raw,
        }
    }

    pub fn recognizer(&self) -> &GestureRecognizer<C> {
        &self.recognizer
    }

    pub fn recognizer_mut(&mut self) -> &mut GestureRecognizer<C> {
        &mut self.recognizer
    }

    pub fn set_forward_raw(&mut self, forward_raw: bool) {
        self.forward_raw = forward_raw;
    }

    /// Handles one raw sample. Returns true if a gesture consumed it.
    pub fn process(&mut self, raw: RawInput) -> bool {
        if self.forward_raw {
            self.recognizer.events_mut().push(InputEvent::from(raw));
        }

        match raw {
            RawInput::TouchDown {
                x,
                y,
                pointer,
                button,
            } => self.recognizer.touch_down(x, y, pointer, button),
            RawInput::TouchUp {
                x,
                y,
                pointer,
                button,
            } => self.recognizer.touch_up(x, y, pointer, button),
            RawInput::TouchDragged { x, y, pointer } => self.recognizer.touch_dragged(x, y, pointer),
            _ => false,
        }
    }

    /// Fires pending timers; call regularly even without new input.
    pub fn poll(&mut self) -> bool {
        self.recognizer.poll()
    }

    pub fn cancel(&mut self) {
        self.recognizer.cancel();
    }

    pub fn reset(&mut self) {
        self.recognizer.reset();
    }

    pub fn pop_event(&mut self) -> Option<InputEvent> {
        self.recognizer.pop_event()
    }

    pub fn drain_events(&mut self) -> Vec<InputEvent> {
        self.recognizer.drain_events()
    }
}
