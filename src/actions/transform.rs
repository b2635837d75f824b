//! Stock tweens over actor position, scale, rotation and size.
//!
//! The `*To` tweens capture the start value on their first tick and lerp
//! towards the end value. The `*By` tweens are meant for relative
//! [`TemporalAction`](super::TemporalAction)s and add their amount scaled by
//! each percent step, so the total applied is exactly the amount.

use super::Tween;
use crate::scene::Actor;

fn lerp(start: f32, end: f32, percent: f32) -> f32 {
    start + (end - start) * percent
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveTo {
    start: (f32, f32),
    pub end: (f32, f32),
}

impl MoveTo {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            start: (0.0, 0.0),
            end: (x, y),
        }
    }
}

impl Tween for MoveTo {
    fn begin(&mut self, target: &Actor) {
        self.start = (target.x, target.y);
    }

    fn update(&mut self, target: &mut Actor, percent: f32) {
        target.set_position(
            lerp(self.start.0, self.end.0, percent),
            lerp(self.start.1, self.end.1, percent),
        );
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveBy {
    pub amount: (f32, f32),
}

impl MoveBy {
    pub fn new(amount_x: f32, amount_y: f32) -> Self {
        Self {
            amount: (amount_x, amount_y),
        }
    }
}

impl Tween for MoveBy {
    fn update(&mut self, target: &mut Actor, step: f32) {
        target.move_by(self.amount.0 * step, self.amount.1 * step);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleTo {
    start: (f32, f32),
    pub end: (f32, f32),
}

impl ScaleTo {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            start: (1.0, 1.0),
            end: (x, y),
        }
    }
}

impl Default for ScaleTo {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl Tween for ScaleTo {
    fn begin(&mut self, target: &Actor) {
        self.start = (target.scale_x, target.scale_y);
    }

    fn update(&mut self, target: &mut Actor, percent: f32) {
        target.set_scale(
            lerp(self.start.0, self.end.0, percent),
            lerp(self.start.1, self.end.1, percent),
        );
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScaleBy {
    pub amount: (f32, f32),
}

impl ScaleBy {
    pub fn new(amount_x: f32, amount_y: f32) -> Self {
        Self {
            amount: (amount_x, amount_y),
        }
    }
}

impl Tween for ScaleBy {
    fn update(&mut self, target: &mut Actor, step: f32) {
        target.scale_by(self.amount.0 * step, self.amount.1 * step);
    }
}

/// Rotates to an absolute angle in degrees, without wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotateTo {
    start: f32,
    pub end: f32,
}

impl RotateTo {
    pub fn new(degrees: f32) -> Self {
        Self {
            start: 0.0,
            end: degrees,
        }
    }
}

impl Tween for RotateTo {
    fn begin(&mut self, target: &Actor) {
        self.start = target.rotation;
    }

    fn update(&mut self, target: &mut Actor, percent: f32) {
        target.rotation = lerp(self.start, self.end, percent);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotateBy {
    pub amount: f32,
}

impl RotateBy {
    pub fn new(degrees: f32) -> Self {
        Self { amount: degrees }
    }
}

impl Tween for RotateBy {
    fn update(&mut self, target: &mut Actor, step: f32) {
        target.rotate_by(self.amount * step);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SizeTo {
    start: (f32, f32),
    pub end: (f32, f32),
}

impl SizeTo {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            start: (0.0, 0.0),
            end: (width, height),
        }
    }
}

impl Tween for SizeTo {
    fn begin(&mut self, target: &Actor) {
        self.start = (target.width, target.height);
    }

    fn update(&mut self, target: &mut Actor, percent: f32) {
        target.set_size(
            lerp(self.start.0, self.end.0, percent),
            lerp(self.start.1, self.end.1, percent),
        );
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SizeBy {
    pub amount: (f32, f32),
}

impl SizeBy {
    pub fn new(amount_width: f32, amount_height: f32) -> Self {
        Self {
            amount: (amount_width, amount_height),
        }
    }
}

impl Tween for SizeBy {
    fn update(&mut self, target: &mut Actor, step: f32) {
        target.size_by(self.amount.0 * step, self.amount.1 * step);
    }
}
