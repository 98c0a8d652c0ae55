//! Clock driver: wall time in, gate and ball motion out
//!
//! Once per tick the driver derives the two hand angles from wall-clock time,
//! rotates the hand bodies about the ring center, recomputes the gate, and
//! runs the ball lifecycle. A minute-value change triggers a full ball reset
//! so the ring empties and refills with a fresh cohort each minute.

use std::f32::consts::TAU;
use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;

use crate::consts::TOP_OFFSET;
use crate::physics::{BodyHandle, PhysicsWorld};
use crate::sim::balls::BallSystem;
use crate::sim::ring::RingGate;
use crate::tuning::Tuning;

/// A moment on the clock face. Seconds carry the sub-second fraction so the
/// minute hand sweeps smoothly.
#[derive(Debug, Clone, Copy)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
    pub second: f32,
}

impl ClockTime {
    /// Fold epoch seconds into hour/minute/second of day, shifted by a whole
    /// number of hours from UTC.
    pub fn from_epoch_secs(epoch_secs: f64, utc_offset_hours: i32) -> Self {
        let day = (epoch_secs + f64::from(utc_offset_hours) * 3600.0).rem_euclid(86_400.0);
        let hour = (day / 3600.0) as u32;
        let minute = (day.rem_euclid(3600.0) / 60.0) as u32;
        let second = day.rem_euclid(60.0) as f32;
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Current wall-clock time. Pre-epoch system clocks read as midnight.
    pub fn now(utc_offset_hours: i32) -> Self {
        let epoch_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        Self::from_epoch_secs(epoch_secs, utc_offset_hours)
    }

    /// Minute hand angle, zero at 12 o'clock, sweeping with the seconds.
    pub fn minute_angle(&self) -> f32 {
        (self.minute as f32 + self.second / 60.0) / 60.0 * TAU
    }

    /// Hour hand angle, zero at 12 o'clock, sweeping with the minutes.
    pub fn hour_angle(&self) -> f32 {
        ((self.hour % 12) as f32 + self.minute as f32 / 60.0) / 12.0 * TAU
    }
}

/// A clock hand: a kinematic body rotated in place, never translated away
/// from the ring center.
pub struct Hand {
    pub body: BodyHandle,
    pub length: f32,
    pub thickness: f32,
}

/// Owns the ring gate, the ball system, and the two hands, and sequences them
/// once per application tick.
pub struct ClockDriver {
    center: Vec2,
    ring: RingGate,
    balls: BallSystem,
    hand_minute: Hand,
    hand_hour: Hand,
    prev_minute: Option<u32>,
    tick: u64,
    spawn_interval: u64,
}

impl ClockDriver {
    /// Build the ring, hands, and arena bounds in `world`.
    pub fn new(world: &mut PhysicsWorld, tuning: Tuning, seed: u64) -> Self {
        let center = Vec2::new(tuning.canvas_width / 2.0, tuning.canvas_height / 2.0);

        world.add_bounds(
            tuning.canvas_width,
            tuning.canvas_height,
            tuning.wall_thickness,
            tuning.wall_restitution,
        );

        let ring = RingGate::new(world, center, &tuning);
        // Hand thickness matches one ring segment so the gate edges line up.
        let thickness = ring.collider_radius() * 2.0;

        let minute_len = tuning.minute_hand_length();
        let hand_minute = Hand {
            body: world.add_hand(center, minute_len, thickness),
            length: minute_len,
            thickness,
        };
        let hand_hour = Hand {
            body: world.add_hand(center, tuning.hour_hand_length, thickness),
            length: tuning.hour_hand_length,
            thickness,
        };

        let spawn_interval = tuning.spawn_interval_ticks.max(1);
        let balls = BallSystem::new(tuning, seed);

        Self {
            center,
            ring,
            balls,
            hand_minute,
            hand_hour,
            prev_minute: None,
            tick: 0,
            spawn_interval,
        }
    }

    /// Advance one application tick at the given wall-clock time. The caller
    /// steps the physics world separately (before reading positions).
    pub fn tick(&mut self, world: &mut PhysicsWorld, now: &ClockTime) {
        if self.prev_minute != Some(now.minute) {
            if self.prev_minute.is_some() {
                log::debug!("minute changed to {}, resetting balls", now.minute);
                self.balls.reset_all(world);
            }
            self.prev_minute = Some(now.minute);
        }

        let minute_angle = now.minute_angle();
        let hour_angle = now.hour_angle();

        world.set_hand_pose(
            self.hand_minute.body,
            self.center,
            minute_angle,
            self.hand_minute.length / 2.0,
        );
        world.set_hand_pose(
            self.hand_hour.body,
            self.center,
            hour_angle,
            self.hand_hour.length / 2.0,
        );

        self.ring
            .update(world, minute_angle, hour_angle, TOP_OFFSET);

        if self.tick % self.spawn_interval == 0 {
            self.balls.spawn(world);
        }
        self.balls.control_population();
        self.balls.step(world);

        self.tick += 1;
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn ring(&self) -> &RingGate {
        &self.ring
    }

    pub fn balls(&self) -> &BallSystem {
        &self.balls
    }

    pub fn hands(&self) -> [&Hand; 2] {
        [&self.hand_minute, &self.hand_hour]
    }
}
