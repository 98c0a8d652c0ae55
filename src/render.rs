//! Renderer-agnostic scene description
//!
//! The sim never draws. Each frame it is flattened into a `Scene` of plain
//! shapes in canvas pixels; any backend (or a test) can consume that. Trails
//! are expanded here into interpolated fading disks so backends stay dumb.

use glam::Vec2;

use crate::physics::PhysicsWorld;
use crate::sim::clock::ClockDriver;

/// Extra interpolated disks between consecutive trail samples.
const TRAIL_STEPS: usize = 4;
/// Alpha of the oldest trail disk; the newest is fully opaque.
const TRAIL_ALPHA_MIN: f32 = 40.0;
/// Center cap radius relative to the hand cap diameter.
const CAP_SCALE: f32 = 1.2;

/// A filled circle in canvas pixels.
#[derive(Debug, Clone, Copy)]
pub struct Disk {
    pub pos: Vec2,
    pub radius: f32,
    pub color: [u8; 3],
    pub alpha: u8,
}

/// A rounded rectangle rotated about its center. `angle` follows the clock
/// convention (zero at 12, clockwise).
#[derive(Debug, Clone, Copy)]
pub struct RotatedRect {
    pub center: Vec2,
    pub size: Vec2,
    pub angle: f32,
    pub corner_radius: f32,
    pub color: [u8; 3],
}

/// Everything a backend needs to draw one frame, in draw order.
#[derive(Debug, Default)]
pub struct Scene {
    pub segments: Vec<Disk>,
    pub trails: Vec<Disk>,
    pub balls: Vec<Disk>,
    pub hands: Vec<RotatedRect>,
    pub center_cap: Option<Disk>,
}

const SEGMENT_COLOR: [u8; 3] = [0xff, 0xff, 0xff];
const HAND_COLOR: [u8; 3] = [0xff, 0xcc, 0x66];

/// Flatten the current sim state. Call after the physics step so body
/// positions are fresh.
pub fn build_scene(world: &PhysicsWorld, driver: &ClockDriver) -> Scene {
    let mut scene = Scene::default();

    // Closed segments only; an open slot draws nothing.
    for seg in driver.ring().segments() {
        if !seg.is_open() {
            scene.segments.push(Disk {
                pos: seg.pos,
                radius: seg.radius,
                color: SEGMENT_COLOR,
                alpha: 255,
            });
        }
    }

    for ball in driver.balls().balls() {
        push_trail(&mut scene.trails, ball.trail.iter().copied(), ball.radius, ball.color);
        if let Some(pos) = world.body_position(ball.body) {
            scene.balls.push(Disk {
                pos,
                radius: ball.radius,
                color: ball.color,
                alpha: 255,
            });
        }
    }

    for hand in driver.hands() {
        if let (Some(pos), Some(rot)) = (
            world.body_position(hand.body),
            world.body_rotation(hand.body),
        ) {
            scene.hands.push(RotatedRect {
                center: pos,
                size: Vec2::new(hand.thickness, hand.length),
                angle: rot,
                corner_radius: hand.thickness / 2.0,
                color: HAND_COLOR,
            });
        }
    }

    let cap_diameter = driver.ring().collider_radius() * 2.0;
    scene.center_cap = Some(Disk {
        pos: driver.center(),
        radius: cap_diameter / 2.0 * CAP_SCALE,
        color: HAND_COLOR,
        alpha: 255,
    });

    scene
}

/// Expand one trail into interpolated disks fading from `TRAIL_ALPHA_MIN` at
/// the oldest sample up to opaque at the newest.
fn push_trail(
    out: &mut Vec<Disk>,
    samples: impl Iterator<Item = Vec2> + ExactSizeIterator,
    radius: f32,
    color: [u8; 3],
) {
    let n = samples.len();
    if n < 2 {
        return;
    }
    let total = ((n - 1) * TRAIL_STEPS) as f32;
    let points: Vec<Vec2> = samples.collect();
    for (j, pair) in points.windows(2).enumerate() {
        for step in 0..TRAIL_STEPS {
            let t = step as f32 / TRAIL_STEPS as f32;
            let progress = (j * TRAIL_STEPS + step) as f32 / total;
            let alpha = TRAIL_ALPHA_MIN + (255.0 - TRAIL_ALPHA_MIN) * progress;
            out.push(Disk {
                pos: pair[0].lerp(pair[1], t),
                radius,
                color,
                alpha: alpha as u8,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TICK_DT;
    use crate::sim::clock::{ClockDriver, ClockTime};
    use crate::sim::gravity::SharedGravity;
    use crate::tuning::Tuning;

    fn setup() -> (PhysicsWorld, ClockDriver) {
        let mut world = PhysicsWorld::new(SharedGravity::new(Vec2::new(0.0, 900.0)), TICK_DT);
        let tuning = Tuning {
            ring_segments: 24,
            spawn_interval_ticks: 1,
            ..Tuning::default()
        };
        let driver = ClockDriver::new(&mut world, tuning, 7);
        (world, driver)
    }

    #[test]
    fn open_segments_draw_nothing() {
        let (mut world, mut driver) = setup();
        driver.tick(&mut world, &ClockTime { hour: 3, minute: 0, second: 0.0 });
        world.step();

        let scene = build_scene(&world, &driver);
        let closed = driver.ring().segments().len() - driver.ring().open_count();
        assert!(driver.ring().open_count() > 0);
        assert_eq!(scene.segments.len(), closed);
    }

    #[test]
    fn trail_alpha_fades_toward_the_newest_sample() {
        let mut trails = Vec::new();
        let samples = [
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(0.0, 20.0),
        ];
        push_trail(&mut trails, samples.iter().copied(), 4.0, [1, 2, 3]);
        assert_eq!(trails.len(), 2 * TRAIL_STEPS);
        for pair in trails.windows(2) {
            assert!(pair[0].alpha < pair[1].alpha);
        }
        assert_eq!(trails[0].alpha, TRAIL_ALPHA_MIN as u8);
    }

    #[test]
    fn single_sample_trail_is_skipped() {
        let mut trails = Vec::new();
        push_trail(&mut trails, [Vec2::ZERO].iter().copied(), 4.0, [0, 0, 0]);
        assert!(trails.is_empty());
    }

    #[test]
    fn scene_has_hands_and_cap() {
        let (mut world, mut driver) = setup();
        driver.tick(&mut world, &ClockTime { hour: 9, minute: 45, second: 0.0 });
        world.step();

        let scene = build_scene(&world, &driver);
        assert_eq!(scene.hands.len(), 2);
        assert_eq!(scene.balls.len(), driver.balls().len());
        let cap = scene.center_cap.unwrap();
        assert_eq!(cap.pos, driver.center());
        assert!((cap.radius - driver.ring().collider_radius() * CAP_SCALE).abs() < 1e-6);
    }
}
