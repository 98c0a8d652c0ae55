//! Clock simulation module
//!
//! All gate and lifecycle logic lives here. The module is deterministic:
//! - Fixed tick cadence only
//! - Seeded RNG only
//! - Stable iteration order (list order, reverse-index removal)
//! - Physics access only through the `physics` facade

pub mod angle;
pub mod balls;
pub mod clock;
pub mod gravity;
pub mod ring;

pub use balls::{Ball, BallSystem};
pub use clock::{ClockDriver, ClockTime, Hand};
pub use gravity::{GravitySmoother, MotionSample, SharedGravity};
pub use ring::{RingGate, RingSegment, SegmentState};
