//! Clock tuning knobs
//!
//! Every physically or visually tweakable constant lives in one serde struct,
//! so a JSON tuning file can override defaults without recompiling. Values are
//! tuned for visual appeal, not simulation fidelity.

use serde::{Deserialize, Serialize};

/// All tunable constants. `Default` carries the shipped values; a tuning file
/// may override any subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Play area ===
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Hours added to UTC when deriving the displayed time.
    pub utc_offset_hours: i32,

    // === Ring ===
    pub ring_radius: f32,
    /// Disk colliders forming the ring; more is rounder, slightly slower.
    pub ring_segments: usize,
    /// Overlap factor between adjacent segment colliders.
    pub ring_overlap: f32,
    /// Minimum visual thickness of the ring band.
    pub ring_thickness: f32,
    pub ring_restitution: f32,
    pub ring_friction: f32,

    // === Hands ===
    pub hour_hand_length: f32,
    /// Minute hand length as a fraction of the ring radius.
    pub minute_hand_scale: f32,

    // === Balls ===
    /// Ticks between spawns (60 = one ball per second).
    pub spawn_interval_ticks: u64,
    /// Spawn y in canvas pixels (negative = above the visible area).
    pub spawn_height: f32,
    pub ball_radius_min: f32,
    pub ball_radius_max: f32,
    pub ball_restitution: f32,
    pub ball_friction: f32,
    /// Air-drag stand-in (linear damping).
    pub ball_damping: f32,
    pub ball_density: f32,
    /// Target maximum of live (non-dying) balls.
    pub soft_cap: usize,
    /// Absolute ceiling on total balls; spawns beyond it are dropped.
    pub hard_ceiling: usize,
    /// Balls marked dying per tick while over the soft cap.
    pub cull_per_tick: usize,
    /// Per-tick radius multiplier once a ball is dying.
    pub shrink_factor: f32,
    /// Bounded trail history length.
    pub trail_length: usize,
    /// Per-axis speed clamp (px/s); bounds displacement per physics step.
    pub max_axis_speed: f32,
    /// Spawn velocity spread, x in [-spawn_speed_x, spawn_speed_x] px/s.
    pub spawn_speed_x: f32,
    /// Spawn velocity, y in [0, spawn_speed_y] px/s (gentle downward drift).
    pub spawn_speed_y: f32,
    /// Ball colors, picked per spawn.
    pub palette: Vec<[u8; 3]>,

    // === Gravity ===
    /// Magnitude of full-tilt gravity (px/s^2).
    pub gravity_strength: f32,
    /// Low-pass alpha: higher responds faster but jitters more.
    pub gravity_filter_alpha: f32,

    // === Bounds ===
    pub wall_thickness: f32,
    pub wall_restitution: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: 960.0,
            canvas_height: 960.0,
            utc_offset_hours: 0,

            ring_radius: 380.0,
            ring_segments: 600,
            ring_overlap: 0.9,
            ring_thickness: 15.0,
            ring_restitution: 0.25,
            ring_friction: 0.3,

            hour_hand_length: 200.0,
            minute_hand_scale: 1.03,

            spawn_interval_ticks: 60,
            spawn_height: -50.0,
            ball_radius_min: 8.0,
            ball_radius_max: 16.0,
            ball_restitution: 0.9,
            ball_friction: 0.01,
            ball_damping: 0.3,
            ball_density: 0.0008,
            soft_cap: 200,
            hard_ceiling: 1000,
            cull_per_tick: 2,
            shrink_factor: 0.96,
            trail_length: 5,
            max_axis_speed: 1500.0,
            spawn_speed_x: 30.0,
            spawn_speed_y: 60.0,
            palette: vec![[0xff, 0xcc, 0x66]],

            gravity_strength: 900.0,
            gravity_filter_alpha: 0.12,

            wall_thickness: 100.0,
            wall_restitution: 0.8,
        }
    }
}

impl Tuning {
    /// Minute hand length in pixels.
    pub fn minute_hand_length(&self) -> f32 {
        self.ring_radius * self.minute_hand_scale
    }

    /// Load tuning from a JSON file, falling back to defaults when the file
    /// is missing or malformed. Never fails: the clock must always start.
    pub fn load(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(tuning) => {
                    log::info!("loaded tuning from {path}");
                    tuning
                }
                Err(err) => {
                    log::warn!("ignoring malformed tuning file {path}: {err}");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no tuning file at {path}, using defaults");
                Self::default()
            }
        }
    }
}
