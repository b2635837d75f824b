//! Gesture recognition state machine.
//!
//! Turns raw touch samples into taps, long presses, pans, flings, pinches
//! and swipes. One recognizer is created per input source; all of its state
//! lives in the instance.
//!
//! ```text
//!   Idle ──down──► TapSquare ──up──────────────► Tap
//!                     │  └─ timer ─► LongPress (suppresses the session)
//!                     ├──drag out──► Panning ──up──► PanStop (+ Fling)
//!                     └──2nd down──► Pinching ──up──► Panning
//! ```

use super::events::{InputEvent, PRIMARY_POINTER, SECONDARY_POINTER};
use super::queue::EventQueue;
use super::swipe::SwipeTracker;
use super::timer::{LongPressHandle, LongPressTimer};
use super::velocity::VelocityTracker;
use crate::config::GestureConfig;
use crate::time::{Clock, MonotonicClock, seconds_to_nanos};

type Point = (f32, f32);

fn distance(a: Point, b: Point) -> f32 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

pub struct GestureRecognizer<C: Clock = MonotonicClock> {
    clock: C,
    config: GestureConfig,
    tap_square_size: f32,
    long_press_nanos: u64,
    tap_count_interval: u64,
    max_fling_delay: u64,

    pointer1: Point,
    pointer2: Point,
    initial_pointer1: Point,
    initial_pointer2: Point,
    touched: [bool; 2],

    in_tap_square: bool,
    tap_square_center: Point,
    tap_count: u32,
    last_tap_time: u64,
    last_tap: Point,
    last_tap_button: Option<u32>,
    last_tap_pointer: Option<usize>,

    long_press: LongPressTimer,
    panning: bool,
    pinching: bool,
    gesture_start_time: Option<u64>,

    tracker: VelocityTracker,
    swipe: SwipeTracker,
    events: EventQueue,
}

impl GestureRecognizer<MonotonicClock> {
    pub fn new(config: GestureConfig) -> Self {
        Self::with_clock(config, MonotonicClock::new())
    }
}

impl<C: Clock> GestureRecognizer<C> {
    pub fn with_clock(config: GestureConfig, clock: C) -> Self {
        let mut recognizer = Self {
            clock,
            config,
            tap_square_size: 0.0,
            long_press_nanos: 0,
            tap_count_interval: 0,
            max_fling_delay: 0,
            pointer1: (0.0, 0.0),
            pointer2: (0.0, 0.0),
            initial_pointer1: (0.0, 0.0),
            initial_pointer2: (0.0, 0.0),
            touched: [false; 2],
            in_tap_square: false,
            tap_square_center: (0.0, 0.0),
            tap_count: 0,
            last_tap_time: 0,
            last_tap: (0.0, 0.0),
            last_tap_button: None,
            last_tap_pointer: None,
            long_press: LongPressTimer::new(),
            panning: false,
            pinching: false,
            gesture_start_time: None,
            tracker: VelocityTracker::new(),
            swipe: SwipeTracker::new(config.swipe_drag_interval),
            events: EventQueue::default(),
        };
        recognizer.apply_config(config);
        recognizer
    }

    /// Replaces the event queue, e.g. to change its capacity.
    pub fn with_queue(mut self, events: EventQueue) -> Self {
        self.events = events;
        self
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn apply_config(&mut self, config: GestureConfig) {
        self.config = config;
        self.tap_square_size = config.tap_square_size;
        self.long_press_nanos = seconds_to_nanos(config.long_press_seconds);
        self.tap_count_interval = seconds_to_nanos(config.tap_count_interval);
        self.max_fling_delay = seconds_to_nanos(config.max_fling_delay);
        self.swipe.set_drag_interval(config.swipe_drag_interval);
    }

    pub fn set_tap_square_size(&mut self, size: f32) {
        self.config.tap_square_size = size;
        self.tap_square_size = size;
    }

    pub fn set_long_press_seconds(&mut self, seconds: f32) {
        self.config.long_press_seconds = seconds;
        self.long_press_nanos = seconds_to_nanos(seconds);
    }

    pub fn set_tap_count_interval(&mut self, seconds: f32) {
        self.config.tap_count_interval = seconds;
        self.tap_count_interval = seconds_to_nanos(seconds);
    }

    pub fn set_max_fling_delay(&mut self, seconds: f32) {
        self.config.max_fling_delay = seconds;
        self.max_fling_delay = seconds_to_nanos(seconds);
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    pub fn pop_event(&mut self) -> Option<InputEvent> {
        self.events.pop()
    }

    pub fn drain_events(&mut self) -> Vec<InputEvent> {
        self.events.drain()
    }

    /// Lets a separate timer context fire the long press. The event is queued
    /// by the next [`poll`](Self::poll) or touch entry point.
    pub fn long_press_handle(&self) -> LongPressHandle {
        self.long_press.handle()
    }

    pub fn is_panning(&self) -> bool {
        self.panning
    }

    pub fn is_pinching(&self) -> bool {
        self.pinching
    }

    pub fn in_tap_square(&self) -> bool {
        self.in_tap_square
    }

    pub fn long_press_fired(&self) -> bool {
        self.long_press.has_fired()
    }

    pub fn tap_count(&self) -> u32 {
        self.tap_count
    }

    pub fn velocity_tracker(&self) -> &VelocityTracker {
        &self.tracker
    }

    /// Fires the long-press timer if it is due, or if a
    /// [`LongPressHandle`] claimed it. Returns true if `LongPress` was queued.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now_nanos();
        if !self.long_press.poll(now) {
            return false;
        }
        log::debug!("INPUT: Long press at {:?}", self.pointer1);
        self.events.push(InputEvent::LongPress {
            x: self.pointer1.0,
            y: self.pointer1.1,
        });
        true
    }

    pub fn touch_down(&mut self, x: f32, y: f32, pointer: usize, button: u32) -> bool {
        if pointer > SECONDARY_POINTER {
            return false;
        }
        self.poll();
        let now = self.clock.now_nanos();
        self.touched[pointer] = true;

        if pointer == PRIMARY_POINTER {
            self.pointer1 = (x, y);
            self.gesture_start_time = Some(now);
            self.tracker.start(x, y, now);
            self.swipe.begin(x, y);
            if self.touched[SECONDARY_POINTER] {
                self.start_pinch();
            } else {
                self.in_tap_square = true;
                self.panning = false;
                self.pinching = false;
                self.long_press.set_fired(false);
                self.tap_square_center = (x, y);
                self.long_press.schedule(now + self.long_press_nanos);
            }
        } else {
            self.pointer2 = (x, y);
            self.start_pinch();
        }
        log::trace!("INPUT: Touch down {} at ({}, {}) button {}", pointer, x, y, button);
        false
    }

    fn start_pinch(&mut self) {
        self.in_tap_square = false;
        self.pinching = true;
        self.initial_pointer1 = self.pointer1;
        self.initial_pointer2 = self.pointer2;
        self.long_press.cancel();
    }

    pub fn touch_dragged(&mut self, x: f32, y: f32, pointer: usize) -> bool {
        if pointer > SECONDARY_POINTER {
            return false;
        }
        self.poll();
        if self.long_press.has_fired() {
            return false;
        }

        if pointer == PRIMARY_POINTER {
            self.pointer1 = (x, y);
        } else {
            self.pointer2 = (x, y);
        }

        if self.pinching {
            self.events.push(InputEvent::Zoom {
                initial_distance: distance(self.initial_pointer1, self.initial_pointer2),
                distance: distance(self.pointer1, self.pointer2),
            });
            self.events.push(InputEvent::Pinch {
                initial_pointer1: self.initial_pointer1,
                initial_pointer2: self.initial_pointer2,
                pointer1: self.pointer1,
                pointer2: self.pointer2,
            });
            return true;
        }

        let now = self.clock.now_nanos();
        self.tracker.update(x, y, now);

        if pointer == PRIMARY_POINTER {
            if let Some(direction) = self.swipe.update(x, y) {
                log::debug!("INPUT: Swipe {}", direction);
                self.events.push(InputEvent::Swipe { direction, x, y });
            }
        }

        if self.in_tap_square && !self.is_within_tap_square(x, y, self.tap_square_center) {
            self.long_press.cancel();
            self.in_tap_square = false;
        }

        if !self.in_tap_square {
            self.panning = true;
            let (delta_x, delta_y) = self.tracker.delta();
            self.events.push(InputEvent::Pan {
                x,
                y,
                delta_x,
                delta_y,
            });
            return true;
        }
        false
    }

    pub fn touch_up(&mut self, x: f32, y: f32, pointer: usize, button: u32) -> bool {
        if pointer > SECONDARY_POINTER {
            return false;
        }
        self.poll();
        self.touched[pointer] = false;
        let handled = self.classify_release(x, y, pointer, button);
        self.swipe.reset();
        handled
    }

    fn classify_release(&mut self, x: f32, y: f32, pointer: usize, button: u32) -> bool {
        if self.long_press.has_fired() {
            // Suppressed session: nothing is classified, but it still ends.
            self.long_press.cancel();
            self.in_tap_square = false;
            self.panning = false;
            self.pinching = false;
            self.gesture_start_time = None;
            return false;
        }

        let was_panning = self.panning;
        self.panning = false;
        self.long_press.cancel();
        let now = self.clock.now_nanos();

        if self.in_tap_square {
            let consecutive = self.last_tap_button == Some(button)
                && self.last_tap_pointer == Some(pointer)
                && now.saturating_sub(self.last_tap_time) <= self.tap_count_interval
                && self.is_within_tap_square(x, y, self.last_tap);
            if !consecutive {
                self.tap_count = 0;
            }
            self.tap_count += 1;
            self.last_tap_time = now;
            self.last_tap = (x, y);
            self.last_tap_button = Some(button);
            self.last_tap_pointer = Some(pointer);
            self.in_tap_square = false;
            self.gesture_start_time = None;
            log::debug!("INPUT: Tap x{} at ({}, {})", self.tap_count, x, y);
            self.events.push(InputEvent::Tap {
                x,
                y,
                count: self.tap_count,
                pointer,
                button,
            });
            return true;
        }

        if self.pinching {
            // Keep panning with whichever finger is still down.
            self.pinching = false;
            self.panning = true;
            let (rx, ry) = if pointer == PRIMARY_POINTER {
                self.pointer2
            } else {
                self.pointer1
            };
            self.tracker.start(rx, ry, now);
            return false;
        }

        let mut handled = false;
        if was_panning && !self.panning {
            self.events.push(InputEvent::PanStop {
                x,
                y,
                pointer,
                button,
            });
            handled = true;
        }
        self.gesture_start_time = None;

        if now.saturating_sub(self.tracker.last_time()) < self.max_fling_delay {
            self.tracker.update(x, y, now);
            let velocity_x = self.tracker.velocity_x();
            let velocity_y = self.tracker.velocity_y();
            log::debug!("INPUT: Fling ({}, {})", velocity_x, velocity_y);
            self.events.push(InputEvent::Fling {
                velocity_x,
                velocity_y,
                button,
            });
            handled = true;
        }
        handled
    }

    /// Stops the long-press timer and suppresses the rest of the session.
    pub fn cancel(&mut self) {
        self.long_press.cancel();
        self.long_press.set_fired(true);
    }

    /// True while a gesture is in progress and has lasted longer than
    /// `duration` seconds.
    pub fn is_long_pressed(&self, duration: f32) -> bool {
        match self.gesture_start_time {
            Some(start) => {
                self.clock.now_nanos().saturating_sub(start) > seconds_to_nanos(duration)
            }
            None => false,
        }
    }

    /// Default-duration variant of [`is_long_pressed`](Self::is_long_pressed).
    pub fn is_long_pressed_default(&self) -> bool {
        self.is_long_pressed(self.config.long_press_seconds)
    }

    /// Returns the recognizer to idle, keeping configuration and queued events.
    pub fn reset(&mut self) {
        self.long_press.cancel();
        self.long_press.set_fired(false);
        self.gesture_start_time = None;
        self.panning = false;
        self.pinching = false;
        self.in_tap_square = false;
        self.touched = [false; 2];
        self.swipe.reset();
        self.tracker = VelocityTracker::new();
    }

    fn is_within_tap_square(&self, x: f32, y: f32, center: Point) -> bool {
        (x - center.0).abs() < self.tap_square_size && (y - center.1).abs() < self.tap_square_size
    }
}
