//! Smoothed pointer velocity for fling detection.

use crate::time::NANOS_PER_SECOND;

/// Number of recent samples averaged.
pub const SAMPLE_SIZE: usize = 10;

/// Circular buffer of the last [`SAMPLE_SIZE`] pointer deltas.
#[derive(Debug, Clone)]
pub struct VelocityTracker {
    last_x: f32,
    last_y: f32,
    delta_x: f32,
    delta_y: f32,
    last_time: u64,
    num_samples: usize,
    mean_x: [f32; SAMPLE_SIZE],
    mean_y: [f32; SAMPLE_SIZE],
    mean_time: [u64; SAMPLE_SIZE],
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self {
            last_x: 0.0,
            last_y: 0.0,
            delta_x: 0.0,
            delta_y: 0.0,
            last_time: 0,
            num_samples: 0,
            mean_x: [0.0; SAMPLE_SIZE],
            mean_y: [0.0; SAMPLE_SIZE],
            mean_time: [0; SAMPLE_SIZE],
        }
    }

    /// Clears all samples and anchors tracking at `(x, y)` at `time` (ns).
    pub fn start(&mut self, x: f32, y: f32, time: u64) {
        *self = Self::new();
        self.last_x = x;
        self.last_y = y;
        self.last_time = time;
    }

    /// Records the movement since the previous sample.
    pub fn update(&mut self, x: f32, y: f32, time: u64) {
        self.delta_x = x - self.last_x;
        self.delta_y = y - self.last_y;
        self.last_x = x;
        self.last_y = y;
        let delta_time = time.saturating_sub(self.last_time);
        self.last_time = time;

        let index = self.num_samples % SAMPLE_SIZE;
        self.mean_x[index] = self.delta_x;
        self.mean_y[index] = self.delta_y;
        self.mean_time[index] = delta_time;
        self.num_samples += 1;
    }

    /// Frame-to-frame movement of the last sample.
    pub fn delta(&self) -> (f32, f32) {
        (self.delta_x, self.delta_y)
    }

    pub fn last_time(&self) -> u64 {
        self.last_time
    }

    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn velocity_x(&self) -> f32 {
        self.velocity(&self.mean_x)
    }

    pub fn velocity_y(&self) -> f32 {
        self.velocity(&self.mean_y)
    }

    fn velocity(&self, deltas: &[f32; SAMPLE_SIZE]) -> f32 {
        let count = self.num_samples.min(SAMPLE_SIZE);
        if count == 0 {
            return 0.0;
        }
        let mean_distance = deltas[..count].iter().sum::<f32>() / count as f32;
        let mean_nanos = self.mean_time[..count].iter().sum::<u64>() as f64 / count as f64;
        let mean_seconds = mean_nanos / NANOS_PER_SECOND;
        if mean_seconds == 0.0 {
            return 0.0;
        }
        (mean_distance as f64 / mean_seconds) as f32
    }
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: u64 = 1_000_000;

    #[test]
    fn test_fresh_tracker_has_zero_velocity() {
        let tracker = VelocityTracker::new();
        assert_eq!(tracker.velocity_x(), 0.0);
        assert_eq!(tracker.velocity_y(), 0.0);
    }

    #[test]
    fn test_zero_elapsed_time_yields_zero() {
        let mut tracker = VelocityTracker::new();
        tracker.start(0.0, 0.0, 100);
        tracker.update(50.0, 10.0, 100);
        assert_eq!(tracker.velocity_x(), 0.0);
        assert!(!tracker.velocity_y().is_nan());
    }

    #[test]
    fn test_constant_motion() {
        let mut tracker = VelocityTracker::new();
        tracker.start(0.0, 0.0, 0);
        for i in 1..=4 {
            // 10px right, 5px up every 10ms.
            tracker.update(10.0 * i as f32, -5.0 * i as f32, 10 * MS * i);
        }
        assert!((tracker.velocity_x() - 1000.0).abs() < 0.01);
        assert!((tracker.velocity_y() + 500.0).abs() < 0.01);
        assert_eq!(tracker.delta(), (10.0, -5.0));
    }

    #[test]
    fn test_only_last_ten_samples_count() {
        let mut tracker = VelocityTracker::new();
        tracker.start(0.0, 0.0, 0);
        let mut x = 0.0;
        let mut t = 0;
        // Slow samples first, then ten fast ones that evict them.
        for _ in 0..5 {
            x += 1.0;
            t += 10 * MS;
            tracker.update(x, 0.0, t);
        }
        for _ in 0..SAMPLE_SIZE {
            x += 20.0;
            t += 10 * MS;
            tracker.update(x, 0.0, t);
        }
        assert_eq!(tracker.num_samples(), 15);
        assert!((tracker.velocity_x() - 2000.0).abs() < 0.01);
    }

    #[test]
    fn test_start_clears_history() {
        let mut tracker = VelocityTracker::new();
        tracker.start(0.0, 0.0, 0);
        tracker.update(100.0, 0.0, 10 * MS);
        tracker.start(5.0, 5.0, 20 * MS);
        assert_eq!(tracker.num_samples(), 0);
        assert_eq!(tracker.velocity_x(), 0.0);
        assert_eq!(tracker.last_time(), 20 * MS);
    }
}
