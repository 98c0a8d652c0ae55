//! Gravity Clock - a physical wall clock
//!
//! A ring of static colliders surrounds the clock center. The minute and hour
//! hands sweep continuously, and the minor arc between them is an open "gate":
//! segments on that arc drop out of the physics world so balls can escape.
//! Balls rain in from above, bounce inside the ring, and are retired either by
//! the population controller (shrink-to-nothing) or wholesale on each minute
//! boundary. Device-tilt samples, when present, steer gravity.
//!
//! Core modules:
//! - `sim`: clock driver, ring gate, ball lifecycle, gravity smoothing
//! - `physics`: narrow facade over the rigid-body engine
//! - `render`: retained draw list for a display layer
//! - `tuning`: data-driven constants

pub mod physics;
pub mod render;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Fixed timing and frame constants
pub mod consts {
    /// Application tick rate (60 Hz, matching the display cadence)
    pub const TICK_DT: f32 = 1.0 / 60.0;

    /// Rotational offset mapping clock-face angles (zero at 12 o'clock) into
    /// the segment frame (zero at 3 o'clock)
    pub const TOP_OFFSET: f32 = -std::f32::consts::FRAC_PI_2;

    /// 1 g reference used to normalize accelerometer samples (m/s^2)
    pub const ONE_G: f32 = 9.8;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Unit direction of a clock-face angle: zero points at 12 o'clock and the
/// angle sweeps clockwise on a y-down screen.
#[inline]
pub fn clock_dir(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), -angle.cos())
}
