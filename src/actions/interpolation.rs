//! Easing curves mapping [0, 1] onto [0, 1].

use std::f32::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interpolation {
    #[default]
    Linear,
    /// Smoothstep: `a² (3 - 2a)`.
    Smooth,
    /// Smootherstep: `a³ (a (6a - 15) + 10)`.
    Smoother,
    /// Ease in and out with the given power.
    Pow(i32),
    PowIn(i32),
    PowOut(i32),
    Sine,
    SineIn,
    SineOut,
    Circle,
    CircleIn,
    CircleOut,
    Custom(fn(f32) -> f32),
}

impl Interpolation {
    pub fn apply(&self, a: f32) -> f32 {
        match *self {
            Interpolation::Linear => a,
            Interpolation::Smooth => a * a * (3.0 - 2.0 * a),
            Interpolation::Smoother => a * a * a * (a * (a * 6.0 - 15.0) + 10.0),
            Interpolation::Pow(power) => {
                if a <= 0.5 {
                    (a * 2.0).powi(power) / 2.0
                } else {
                    let sign = if power % 2 == 0 { -1.0 } else { 1.0 };
                    ((a - 1.0) * 2.0).powi(power) / (sign * 2.0) + 1.0
                }
            }
            Interpolation::PowIn(power) => a.powi(power),
            Interpolation::PowOut(power) => {
                let sign = if power % 2 == 0 { -1.0 } else { 1.0 };
                (a - 1.0).powi(power) * sign + 1.0
            }
            Interpolation::Sine => (1.0 - (a * PI).cos()) / 2.0,
            Interpolation::SineIn => 1.0 - (a * PI / 2.0).cos(),
            Interpolation::SineOut => (a * PI / 2.0).sin(),
            Interpolation::Circle => {
                if a <= 0.5 {
                    let a = a * 2.0;
                    (1.0 - (1.0 - a * a).sqrt()) / 2.0
                } else {
                    let a = (a - 1.0) * 2.0;
                    ((1.0 - a * a).sqrt() + 1.0) / 2.0
                }
            }
            Interpolation::CircleIn => 1.0 - (1.0 - a * a).sqrt(),
            Interpolation::CircleOut => {
                let a = a - 1.0;
                (1.0 - a * a).sqrt()
            }
            Interpolation::Custom(f) => f(a),
        }
    }

    /// Interpolates between `start` and `end` at `a`.
    pub fn between(&self, start: f32, end: f32, a: f32) -> f32 {
        start + (end - start) * self.apply(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Interpolation; 12] = [
        Interpolation::Linear,
        Interpolation::Smooth,
        Interpolation::Smoother,
        Interpolation::Pow(2),
        Interpolation::Pow(3),
        Interpolation::PowIn(2),
        Interpolation::PowOut(3),
        Interpolation::Sine,
        Interpolation::SineIn,
        Interpolation::SineOut,
        Interpolation::CircleIn,
        Interpolation::CircleOut,
    ];

    #[test]
    fn test_endpoints() {
        for curve in ALL {
            assert!(curve.apply(0.0).abs() < 1e-5, "{:?} at 0", curve);
            assert!((curve.apply(1.0) - 1.0).abs() < 1e-5, "{:?} at 1", curve);
        }
    }

    #[test]
    fn test_monotonic() {
        for curve in ALL {
            let mut last = curve.apply(0.0);
            for step in 1..=100 {
                let value = curve.apply(step as f32 / 100.0);
                assert!(value >= last - 1e-5, "{:?} decreases at {}", curve, step);
                last = value;
            }
        }
    }

    #[test]
    fn test_midpoints() {
        assert_eq!(Interpolation::Smooth.apply(0.5), 0.5);
        assert_eq!(Interpolation::Pow(2).apply(0.5), 0.5);
        assert_eq!(Interpolation::PowIn(2).apply(0.5), 0.25);
        assert_eq!(Interpolation::Custom(|a| a * a).between(10.0, 20.0, 0.5), 12.5);
    }
}
