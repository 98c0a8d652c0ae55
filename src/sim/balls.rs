//! Ball lifecycle and population control
//!
//! Balls spawn above the canvas on a timer, fall into the ring, and leave
//! through the gate. The population controller keeps the live count near a
//! soft cap by marking a couple of balls per tick as dying - they shrink
//! each tick until they vanish, which reads as a gentle die-off instead of a
//! population cliff. A hard ceiling on total balls backs it up by refusing
//! spawns outright.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::physics::{BallMaterial, BodyHandle, PhysicsWorld};
use crate::tuning::Tuning;

/// One falling ball. Position and velocity live in the physics body; the
/// system tracks lifecycle state and the render trail.
pub struct Ball {
    pub body: BodyHandle,
    /// Display/collision radius; shrinks once dying. Always >= 1 while the
    /// ball is in the active list.
    pub radius: f32,
    pub dying: bool,
    pub spawn_tick: u64,
    /// Recent positions, oldest first, bounded to the tuned trail length.
    pub trail: VecDeque<Vec2>,
    pub color: [u8; 3],
}

/// Owns every active ball and its physics body.
pub struct BallSystem {
    balls: Vec<Ball>,
    rng: Pcg32,
    tick: u64,
    cfg: Tuning,
}

impl BallSystem {
    pub fn new(cfg: Tuning, seed: u64) -> Self {
        Self {
            balls: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            tick: 0,
            cfg,
        }
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    /// Balls not yet marked dying.
    pub fn live_count(&self) -> usize {
        self.balls.iter().filter(|b| !b.dying).count()
    }

    /// Spawn one ball just above the visible area with a small randomized
    /// drift. Refused past the hard ceiling (dying balls included) - an
    /// expected steady-state control, not an error.
    pub fn spawn(&mut self, world: &mut PhysicsWorld) {
        if self.balls.len() >= self.cfg.hard_ceiling {
            log::trace!(
                "spawn refused: {} balls at hard ceiling {}",
                self.balls.len(),
                self.cfg.hard_ceiling
            );
            return;
        }

        let x = self
            .rng
            .random_range(self.cfg.canvas_width * 0.2..=self.cfg.canvas_width * 0.8);
        let pos = Vec2::new(x, self.cfg.spawn_height);
        let radius = self
            .rng
            .random_range(self.cfg.ball_radius_min..=self.cfg.ball_radius_max);
        let velocity = Vec2::new(
            self.rng
                .random_range(-self.cfg.spawn_speed_x..=self.cfg.spawn_speed_x),
            self.rng.random_range(0.0..=self.cfg.spawn_speed_y),
        );
        let color = self.cfg.palette[self.rng.random_range(0..self.cfg.palette.len())];

        let body = world.spawn_ball(
            pos,
            radius,
            velocity,
            BallMaterial {
                restitution: self.cfg.ball_restitution,
                friction: self.cfg.ball_friction,
                linear_damping: self.cfg.ball_damping,
                density: self.cfg.ball_density,
            },
        );

        let mut trail = VecDeque::with_capacity(self.cfg.trail_length + 1);
        trail.push_back(pos);

        self.balls.push(Ball {
            body,
            radius,
            dying: false,
            spawn_tick: self.tick,
            trail,
            color,
        });
    }

    /// Mark live balls (in list order, oldest first) as dying while the live
    /// count exceeds the soft cap, at most `cull_per_tick` per call and never
    /// more than the excess. Spreading the cull over several ticks makes the
    /// die-off gradual.
    pub fn control_population(&mut self) {
        let live = self.live_count();
        if live <= self.cfg.soft_cap {
            return;
        }
        let quota = self.cfg.cull_per_tick.min(live - self.cfg.soft_cap);

        let mut marked = 0;
        for ball in &mut self.balls {
            if marked >= quota {
                break;
            }
            if !ball.dying {
                ball.dying = true;
                marked += 1;
            }
        }
        log::debug!(
            "population {live} over soft cap {}, marked {marked} dying",
            self.cfg.soft_cap
        );
    }

    /// Advance every ball one tick: clamp velocity, record trails, shrink the
    /// dying, and drop the fully shrunk from both the list and the world.
    /// Iterates by index downward so in-place removal is safe.
    pub fn step(&mut self, world: &mut PhysicsWorld) {
        self.tick += 1;
        let record_trail = self.tick % 2 == 0;
        let max = self.cfg.max_axis_speed;

        for i in (0..self.balls.len()).rev() {
            let body = self.balls[i].body;

            // Per-axis speed clamp bounds displacement per step and keeps
            // fast balls from tunneling through the thin ring colliders.
            if let Some(v) = world.body_velocity(body) {
                let clamped = v.clamp(Vec2::splat(-max), Vec2::splat(max));
                if clamped != v {
                    world.set_body_velocity(body, clamped);
                }
            }

            if record_trail {
                if let Some(pos) = world.body_position(body) {
                    let ball = &mut self.balls[i];
                    ball.trail.push_back(pos);
                    if ball.trail.len() > self.cfg.trail_length {
                        ball.trail.pop_front();
                    }
                }
            }

            if self.balls[i].dying {
                self.balls[i].radius *= self.cfg.shrink_factor;
                if self.balls[i].radius < 1.0 {
                    // Terminal: body and list entry go together, same tick.
                    if !world.remove_body(body) {
                        log::debug!("shrunk ball body was already gone");
                    }
                    self.balls.remove(i);
                }
            }
        }
    }

    /// Remove every ball and its body; the ring refills with a fresh cohort.
    /// Called on each minute boundary.
    pub fn reset_all(&mut self, world: &mut PhysicsWorld) {
        let n = self.balls.len();
        for ball in self.balls.drain(..) {
            if !world.remove_body(ball.body) {
                log::debug!("reset found ball body already gone");
            }
        }
        log::debug!("reset removed {n} balls");
    }
}
