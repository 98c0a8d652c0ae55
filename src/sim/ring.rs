//! The collider ring and its gate
//!
//! The ring is a circle of overlapping static disk colliders. Each segment is
//! a tiny state machine: `Closed` (collider present in the world) or `Open`
//! (collider removed, ball-permeable). Every tick the gate arc is recomputed
//! from the two hand angles and each segment transitions at most once.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

use crate::physics::{PhysicsWorld, SegmentHandle};
use crate::polar_to_cartesian;
use crate::sim::angle;
use crate::tuning::Tuning;

/// Gate state of a single ring slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentState {
    /// Collider present; balls bounce off.
    Closed,
    /// Collider removed; balls pass through.
    Open,
}

/// One static collider slot on the ring. Geometry is fixed at creation; only
/// the gate state and collider membership change.
pub struct RingSegment {
    /// Slot angle in the segment frame (zero at 3 o'clock).
    pub angle: f32,
    pub pos: Vec2,
    pub radius: f32,
    state: SegmentState,
    collider: Option<SegmentHandle>,
}

impl RingSegment {
    pub fn state(&self) -> SegmentState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SegmentState::Open
    }

    /// Collider handle while closed, `None` while open.
    pub fn collider(&self) -> Option<SegmentHandle> {
        self.collider
    }
}

/// Owns every ring segment and keeps segment state consistent with physics
/// world membership: a segment's collider is in the world iff it is `Closed`.
pub struct RingGate {
    center: Vec2,
    segments: Vec<RingSegment>,
    collider_radius: f32,
    restitution: f32,
    friction: f32,
}

impl RingGate {
    /// Build the full ring around `center`, all segments closed.
    pub fn new(world: &mut PhysicsWorld, center: Vec2, tuning: &Tuning) -> Self {
        let n = tuning.ring_segments;
        let circumference = TAU * tuning.ring_radius;
        let arc_len = circumference / n as f32;
        let collider_radius = tuning.ring_thickness.max(arc_len) * tuning.ring_overlap;

        let mut segments = Vec::with_capacity(n);
        for i in 0..n {
            let slot_angle = i as f32 / n as f32 * TAU;
            let pos = center + polar_to_cartesian(tuning.ring_radius, slot_angle);
            let collider = world.insert_segment(
                pos,
                collider_radius,
                tuning.ring_restitution,
                tuning.ring_friction,
            );
            segments.push(RingSegment {
                angle: slot_angle,
                pos,
                radius: collider_radius,
                state: SegmentState::Closed,
                collider: Some(collider),
            });
        }
        log::info!(
            "ring built: {} segments, collider radius {:.1}",
            n,
            collider_radius
        );

        Self {
            center,
            segments,
            collider_radius,
            restitution: tuning.ring_restitution,
            friction: tuning.ring_friction,
        }
    }

    /// The gate arc for the given hand angles: both are shifted by
    /// `top_offset` into the segment frame, and if the sweep from the first to
    /// the second exceeds half a turn the boundaries swap, so the gate is
    /// always the minor arc between the hands.
    pub fn gate_arc(hand_a: f32, hand_b: f32, top_offset: f32) -> (f32, f32) {
        let mut start = hand_a + top_offset;
        let mut end = hand_b + top_offset;
        let arc_len = (end - start).rem_euclid(TAU);
        if arc_len > PI {
            std::mem::swap(&mut start, &mut end);
        }
        (start, end)
    }

    /// Recompute the open arc and transition every segment that changed side.
    /// Segments already in the right state are untouched, so the world sees
    /// at most one add/remove per segment per transition.
    pub fn update(&mut self, world: &mut PhysicsWorld, hand_a: f32, hand_b: f32, top_offset: f32) {
        let (start, end) = Self::gate_arc(hand_a, hand_b, top_offset);

        for seg in &mut self.segments {
            let should_open = angle::in_arc(seg.angle, start, end);
            match (seg.state, should_open) {
                (SegmentState::Closed, true) => {
                    if let Some(handle) = seg.collider.take() {
                        if !world.remove_segment(handle) {
                            // Already gone; the flag is what matters.
                            log::debug!("segment at {:.3} had no collider to remove", seg.angle);
                        }
                    }
                    seg.state = SegmentState::Open;
                }
                (SegmentState::Open, false) => {
                    let handle =
                        world.insert_segment(seg.pos, seg.radius, self.restitution, self.friction);
                    seg.collider = Some(handle);
                    seg.state = SegmentState::Closed;
                }
                _ => {}
            }
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn segments(&self) -> &[RingSegment] {
        &self.segments
    }

    /// Radius of one segment collider; also sizes the hands and center cap.
    pub fn collider_radius(&self) -> f32 {
        self.collider_radius
    }

    /// Number of currently open segments.
    pub fn open_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_open()).count()
    }
}
