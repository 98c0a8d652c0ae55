//! Device-tilt gravity smoothing
//!
//! Raw accelerometer samples arrive on whatever thread the platform delivers
//! them on, at an unpredictable rate, asynchronously with the tick loop. The
//! smoother low-passes them into a stable direction and publishes it through
//! a shared cell that the physics step reads whole - no reader can observe a
//! half-written vector.

use std::sync::{Arc, Mutex};

use glam::{Vec2, Vec3};

use crate::consts::ONE_G;

/// One raw accelerometer reading in device axes (m/s^2), or `None` when the
/// platform has no motion sensor. A missing sensor is an expected environment
/// state, not an error.
pub type MotionSample = Option<Vec3>;

/// Gravity vector shared between the sample handler and the physics step.
/// Units are px/s^2; written and read as a whole under the lock.
#[derive(Clone)]
pub struct SharedGravity(Arc<Mutex<Vec2>>);

impl SharedGravity {
    pub fn new(initial: Vec2) -> Self {
        Self(Arc::new(Mutex::new(initial)))
    }

    pub fn get(&self) -> Vec2 {
        match self.0.lock() {
            Ok(g) => *g,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn set(&self, v: Vec2) {
        match self.0.lock() {
            Ok(mut g) => *g = v,
            Err(poisoned) => *poisoned.into_inner() = v,
        }
    }
}

/// Exponential low-pass filter from raw tilt samples to world gravity.
///
/// The filter is time-implicit: it advances once per sample, not per
/// wall-clock interval, matching how motion events drive it.
pub struct GravitySmoother {
    target: Vec2,
    smoothed: Vec2,
    alpha: f32,
    strength: f32,
    out: SharedGravity,
}

impl GravitySmoother {
    /// `alpha` trades responsiveness for jitter; `strength` scales the unit
    /// direction into px/s^2 written to `out`.
    pub fn new(alpha: f32, strength: f32, out: SharedGravity) -> Self {
        Self {
            // Straight down until the first sample says otherwise.
            target: Vec2::new(0.0, 1.0),
            smoothed: Vec2::new(0.0, 1.0),
            alpha,
            strength,
            out,
        }
    }

    /// Feed one raw sample. Absent acceleration leaves the previous gravity
    /// in effect and is silently ignored.
    pub fn on_sample(&mut self, sample: MotionSample) {
        let Some(acc) = sample else {
            return;
        };

        // Device axes to screen axes: tilting right pulls right (+x), tilting
        // toward the user pulls down (+y).
        let tx = -acc.x;
        let ty = -acc.y;

        self.target = Vec2::new(
            (tx / ONE_G).clamp(-1.0, 1.0),
            (ty / ONE_G).clamp(-1.0, 1.0),
        );
        self.smoothed += (self.target - self.smoothed) * self.alpha;
        self.out.set(self.smoothed * self.strength);
    }

    /// Current filtered direction, each axis in `[-1, 1]`.
    pub fn smoothed(&self) -> Vec2 {
        self.smoothed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smoother(alpha: f32) -> GravitySmoother {
        GravitySmoother::new(alpha, 900.0, SharedGravity::new(Vec2::new(0.0, 900.0)))
    }

    #[test]
    fn converges_to_a_constant_sample() {
        let mut s = smoother(0.12);
        // Device tilted left and slightly up.
        let sample = Some(Vec3::new(4.9, 2.45, 0.0));
        for _ in 0..200 {
            s.on_sample(sample);
        }
        let v = s.smoothed();
        assert!((v.x - -0.5).abs() < 1e-3, "x: {}", v.x);
        assert!((v.y - -0.25).abs() < 1e-3, "y: {}", v.y);
    }

    #[test]
    fn extreme_input_clamps_to_unit_axes() {
        let mut s = smoother(0.5);
        for _ in 0..100 {
            s.on_sample(Some(Vec3::new(-50.0, 50.0, 9.8)));
            let v = s.smoothed();
            assert!(v.x <= 1.0 && v.x >= -1.0);
            assert!(v.y <= 1.0 && v.y >= -1.0);
        }
        let v = s.smoothed();
        assert!((v.x - 1.0).abs() < 1e-3);
        assert!((v.y - -1.0).abs() < 1e-3);
    }

    #[test]
    fn missing_sensor_is_a_no_op() {
        let cell = SharedGravity::new(Vec2::new(0.0, 900.0));
        let mut s = GravitySmoother::new(0.12, 900.0, cell.clone());
        let before = cell.get();
        for _ in 0..10 {
            s.on_sample(None);
        }
        assert_eq!(cell.get(), before);
        assert_eq!(s.smoothed(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn publishes_scaled_vector_to_the_cell() {
        let cell = SharedGravity::new(Vec2::ZERO);
        let mut s = GravitySmoother::new(1.0, 900.0, cell.clone());
        // Upright portrait hold: device y reads -1 g, mapping to +y on screen.
        s.on_sample(Some(Vec3::new(0.0, -9.8, 0.0)));
        let g = cell.get();
        assert!((g.x).abs() < 1e-3);
        assert!((g.y - 900.0).abs() < 1e-3);
    }
}
