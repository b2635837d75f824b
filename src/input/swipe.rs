//! Directional swipe classification from cumulative displacement.

use super::events::SwipeDirection;

pub const DEFAULT_DRAG_INTERVAL: f32 = 200.0;

/// Tracks displacement from an anchor point and reports a swipe once one
/// axis travels further than the drag interval.
///
/// If the displacement shrinks on both axes between two samples the finger
/// is heading back, so the anchor moves to the current point instead of
/// classifying the return trip.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    drag_interval: f32,
    anchor: Option<(f32, f32)>,
    last_displacement: (f32, f32),
}

impl SwipeTracker {
    pub fn new(drag_interval: f32) -> Self {
        Self {
            drag_interval,
            anchor: None,
            last_displacement: (0.0, 0.0),
        }
    }

    pub fn drag_interval(&self) -> f32 {
        self.drag_interval
    }

    pub fn set_drag_interval(&mut self, drag_interval: f32) {
        self.drag_interval = drag_interval;
    }

    pub fn anchor(&self) -> Option<(f32, f32)> {
        self.anchor
    }

    pub fn begin(&mut self, x: f32, y: f32) {
        self.anchor = Some((x, y));
        self.last_displacement = (0.0, 0.0);
    }

    pub fn reset(&mut self) {
        self.anchor = None;
        self.last_displacement = (0.0, 0.0);
    }

    pub fn update(&mut self, x: f32, y: f32) -> Option<SwipeDirection> {
        let Some((anchor_x, anchor_y)) = self.anchor else {
            self.begin(x, y);
            return None;
        };

        let dx = x - anchor_x;
        let dy = y - anchor_y;
        let (abs_x, abs_y) = (dx.abs(), dy.abs());
        let (last_x, last_y) = self.last_displacement;

        if abs_x < last_x && abs_y < last_y {
            self.begin(x, y);
            return None;
        }
        self.last_displacement = (abs_x, abs_y);

        if abs_x.max(abs_y) <= self.drag_interval || abs_x == abs_y {
            return None;
        }

        let direction = if abs_x > abs_y {
            if dx > 0.0 {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            }
        } else if dy > 0.0 {
            SwipeDirection::Down
        } else {
            SwipeDirection::Up
        };
        self.begin(x, y);
        Some(direction)
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_INTERVAL)
    }
}
