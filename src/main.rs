//! Headless clock runner
//!
//! Drives the simulation at a fixed 60 Hz against the real wall clock and
//! logs a state line once per second. A slow synthetic tilt feeds the gravity
//! smoother so the g-vector drifts the way a handheld device would.

use std::thread;
use std::time::{Duration, Instant};

use glam::{Vec2, Vec3};

use gravity_clock::consts::{ONE_G, TICK_DT};
use gravity_clock::physics::PhysicsWorld;
use gravity_clock::render::build_scene;
use gravity_clock::sim::clock::{ClockDriver, ClockTime};
use gravity_clock::sim::gravity::{GravitySmoother, SharedGravity};
use gravity_clock::Tuning;

const TUNING_PATH: &str = "gravity-clock.json";

fn main() {
    env_logger::init();

    let tuning = Tuning::load(TUNING_PATH);
    let utc_offset = tuning.utc_offset_hours;

    let gravity = SharedGravity::new(Vec2::new(0.0, tuning.gravity_strength));
    let mut world = PhysicsWorld::new(gravity.clone(), TICK_DT);

    let mut smoother = GravitySmoother::new(
        tuning.gravity_filter_alpha,
        tuning.gravity_strength,
        gravity.clone(),
    );

    let seed = {
        let t = ClockTime::now(utc_offset);
        u64::from(t.hour) * 3600 + u64::from(t.minute) * 60 + t.second as u64
    };
    let mut driver = ClockDriver::new(&mut world, tuning, seed);
    log::info!("clock started (seed {seed}, utc offset {utc_offset}h)");

    let tick_period = Duration::from_secs_f32(TICK_DT);
    let mut tick: u64 = 0;
    let mut next_tick = Instant::now();

    loop {
        // Slow side-to-side tilt, a few degrees either way over ~20 s.
        let phase = tick as f32 * TICK_DT * 0.3;
        let tilt = Vec3::new(-0.08 * ONE_G * phase.sin(), -ONE_G, 0.0);
        smoother.on_sample(Some(tilt));

        world.step();
        driver.tick(&mut world, &ClockTime::now(utc_offset));

        if tick % 60 == 0 {
            let scene = build_scene(&world, &driver);
            log::info!(
                "gate open {:>3}, balls {:>3} ({} dying), bodies {}, drawing {} shapes",
                driver.ring().open_count(),
                driver.balls().len(),
                driver.balls().len() - driver.balls().live_count(),
                world.num_bodies(),
                scene.segments.len() + scene.trails.len() + scene.balls.len() + scene.hands.len(),
            );
        }

        tick += 1;
        next_tick += tick_period;
        let now = Instant::now();
        if next_tick > now {
            thread::sleep(next_tick - now);
        } else {
            // Fell behind; resync instead of bursting catch-up ticks.
            next_tick = now;
        }
    }
}
