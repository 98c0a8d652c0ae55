//! Narrow facade over the rapier2d rigid-body engine
//!
//! The rest of the crate never touches rapier types directly: it creates and
//! removes bodies/colliders, reads and writes poses and velocities, and steps
//! the world through this module. Removal and insertion are best-effort by
//! design - asking to remove something already absent is not a failure, it
//! just returns `false` so the caller can log it.
//!
//! Coordinates are screen pixels with y pointing down; gravity therefore
//! points in +y. The world gravity is read from a [`SharedGravity`] cell at
//! every step, so the tilt smoother can update it from any thread.

use glam::Vec2;
use rapier2d::prelude::*;

use crate::sim::gravity::SharedGravity;

/// Opaque reference to a rigid body (balls, hands).
pub type BodyHandle = RigidBodyHandle;
/// Opaque reference to a standalone static collider (ring segments, walls).
pub type SegmentHandle = ColliderHandle;

/// Material constants for spawned balls.
#[derive(Debug, Clone, Copy)]
pub struct BallMaterial {
    pub restitution: f32,
    pub friction: f32,
    /// Air-drag stand-in (rapier linear damping).
    pub linear_damping: f32,
    pub density: f32,
}

/// The simulated world and all engine plumbing needed to step it.
pub struct PhysicsWorld {
    gravity: SharedGravity,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
}

impl PhysicsWorld {
    /// Create an empty world stepping at `dt` seconds per step.
    pub fn new(gravity: SharedGravity, dt: f32) -> Self {
        let mut params = IntegrationParameters::default();
        params.dt = dt;

        Self {
            gravity,
            params,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
        }
    }

    /// Advance the simulation one step under the current shared gravity.
    pub fn step(&mut self) {
        let g = self.gravity.get();
        let gravity = vector![g.x, g.y];

        self.pipeline.step(
            &gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            None,
            &(),
            &(),
        );
    }

    /// Shared gravity cell this world reads each step.
    pub fn gravity(&self) -> &SharedGravity {
        &self.gravity
    }

    // --- static colliders (ring segments, walls) ---

    /// Insert a static disk collider with no rigid body attached.
    pub fn insert_segment(
        &mut self,
        pos: Vec2,
        radius: f32,
        restitution: f32,
        friction: f32,
    ) -> SegmentHandle {
        let collider = ColliderBuilder::ball(radius)
            .translation(vector![pos.x, pos.y])
            .restitution(restitution)
            .friction(friction)
            .build();
        self.colliders.insert(collider)
    }

    /// Remove a static collider. Returns `false` if it was already absent.
    pub fn remove_segment(&mut self, handle: SegmentHandle) -> bool {
        self.colliders
            .remove(handle, &mut self.islands, &mut self.bodies, false)
            .is_some()
    }

    /// Whether a static collider is currently present in the world.
    pub fn contains_segment(&self, handle: SegmentHandle) -> bool {
        self.colliders.get(handle).is_some()
    }

    /// Four static walls just outside the visible canvas so escaped balls
    /// keep bouncing within the play area.
    pub fn add_bounds(&mut self, width: f32, height: f32, thickness: f32, restitution: f32) {
        let walls = [
            // ground, ceiling, left, right
            (width / 2.0, height + thickness / 2.0, width, thickness),
            (width / 2.0, -thickness / 2.0, width, thickness),
            (-thickness / 2.0, height / 2.0, thickness, height),
            (width + thickness / 2.0, height / 2.0, thickness, height),
        ];
        for (x, y, w, h) in walls {
            let collider = ColliderBuilder::cuboid(w / 2.0, h / 2.0)
                .translation(vector![x, y])
                .restitution(restitution)
                .build();
            self.colliders.insert(collider);
        }
    }

    // --- dynamic bodies (balls) ---

    /// Spawn a dynamic ball body with the given material.
    pub fn spawn_ball(
        &mut self,
        pos: Vec2,
        radius: f32,
        velocity: Vec2,
        material: BallMaterial,
    ) -> BodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![pos.x, pos.y])
            .linvel(vector![velocity.x, velocity.y])
            .linear_damping(material.linear_damping)
            .ccd_enabled(true)
            .build();
        let handle = self.bodies.insert(body);

        let collider = ColliderBuilder::ball(radius)
            .restitution(material.restitution)
            .friction(material.friction)
            .density(material.density)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    /// Remove a body and its colliders. Returns `false` if already absent.
    pub fn remove_body(&mut self, handle: BodyHandle) -> bool {
        self.bodies
            .remove(
                handle,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    /// Whether a body is currently present in the world.
    pub fn contains_body(&self, handle: BodyHandle) -> bool {
        self.bodies.get(handle).is_some()
    }

    pub fn body_position(&self, handle: BodyHandle) -> Option<Vec2> {
        let t = self.bodies.get(handle)?.translation();
        Some(Vec2::new(t.x, t.y))
    }

    pub fn body_velocity(&self, handle: BodyHandle) -> Option<Vec2> {
        let v = self.bodies.get(handle)?.linvel();
        Some(Vec2::new(v.x, v.y))
    }

    pub fn body_rotation(&self, handle: BodyHandle) -> Option<f32> {
        Some(self.bodies.get(handle)?.rotation().angle())
    }

    pub fn set_body_velocity(&mut self, handle: BodyHandle, velocity: Vec2) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_linvel(vector![velocity.x, velocity.y], true);
        }
    }

    // --- kinematic bodies (hands) ---

    /// Insert a hand: a kinematic rectangle rotated in place about the ring
    /// center every tick.
    pub fn add_hand(&mut self, center: Vec2, length: f32, thickness: f32) -> BodyHandle {
        // Long axis along local -y so angle zero points at 12 o'clock.
        let body = RigidBodyBuilder::kinematic_position_based()
            .position(Isometry::new(
                vector![center.x, center.y - length / 2.0],
                0.0,
            ))
            .build();
        let handle = self.bodies.insert(body);

        let collider = ColliderBuilder::cuboid(thickness / 2.0, length / 2.0).build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    /// Rotate a hand about `center` to `angle` (clock-face convention, zero at
    /// 12 o'clock). Applied on the next step.
    pub fn set_hand_pose(&mut self, handle: BodyHandle, center: Vec2, angle: f32, half_len: f32) {
        if let Some(body) = self.bodies.get_mut(handle) {
            let pos = center + crate::clock_dir(angle) * half_len;
            body.set_next_kinematic_position(Isometry::new(vector![pos.x, pos.y], angle));
        }
    }

    /// Body count, for diagnostics.
    pub fn num_bodies(&self) -> usize {
        self.bodies.len()
    }

    /// Collider count (standalone and attached), for diagnostics.
    pub fn num_colliders(&self) -> usize {
        self.colliders.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_world() -> PhysicsWorld {
        PhysicsWorld::new(SharedGravity::new(Vec2::new(0.0, 900.0)), 1.0 / 60.0)
    }

    #[test]
    fn segment_remove_is_best_effort() {
        let mut world = test_world();
        let h = world.insert_segment(Vec2::new(10.0, 10.0), 5.0, 0.25, 0.3);
        assert!(world.contains_segment(h));
        assert!(world.remove_segment(h));
        // Second removal finds the world already in the requested state.
        assert!(!world.remove_segment(h));
        assert!(!world.contains_segment(h));
    }

    #[test]
    fn ball_falls_under_shared_gravity() {
        let mut world = test_world();
        let h = world.spawn_ball(
            Vec2::new(100.0, 0.0),
            10.0,
            Vec2::ZERO,
            BallMaterial {
                restitution: 0.9,
                friction: 0.01,
                linear_damping: 0.3,
                density: 0.0008,
            },
        );
        for _ in 0..30 {
            world.step();
        }
        let pos = world.body_position(h).unwrap();
        assert!(pos.y > 0.0, "gravity should pull the ball down, got {pos}");
    }

    #[test]
    fn gravity_cell_redirects_the_world() {
        let mut world = test_world();
        let h = world.spawn_ball(
            Vec2::new(100.0, 100.0),
            10.0,
            Vec2::ZERO,
            BallMaterial {
                restitution: 0.9,
                friction: 0.01,
                linear_damping: 0.0,
                density: 0.0008,
            },
        );
        world.gravity().set(Vec2::new(-900.0, 0.0));
        for _ in 0..30 {
            world.step();
        }
        let vel = world.body_velocity(h).unwrap();
        assert!(vel.x < 0.0, "expected leftward drift, got {vel}");
    }

    #[test]
    fn hand_rotates_in_place() {
        let mut world = test_world();
        let center = Vec2::new(480.0, 480.0);
        let h = world.add_hand(center, 200.0, 20.0);
        world.set_hand_pose(h, center, std::f32::consts::FRAC_PI_2, 100.0);
        world.step();
        let rot = world.body_rotation(h).unwrap();
        assert!((rot - std::f32::consts::FRAC_PI_2).abs() < 1e-3);
        let pos = world.body_position(h).unwrap();
        // Quarter past: hand points at 3 o'clock, so the body center moved +x.
        assert!((pos.x - (center.x + 100.0)).abs() < 1e-2);
        assert!((pos.y - center.y).abs() < 1e-2);
    }
}
