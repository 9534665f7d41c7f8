//! Dodgefall - A single-screen arcade avoidance game
//!
//! Core modules:
//! - `sim`: Simulation (player, obstacles, particles, collisions, difficulty)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction (input, storage, time)
//! - `session`: The game context tying simulation, input and persistence together
//! - `best_score` / `settings`: Persisted player data

pub mod best_score;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use best_score::BestScore;
pub use session::Session;
pub use settings::{QualityPreset, Settings, Toggle};

use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Frame delta bounds (seconds) applied by the frame driver
    pub const MIN_FRAME_DT: f32 = 0.001;
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Play area minimum size (logical pixels)
    pub const MIN_ARENA_WIDTH: f32 = 320.0;
    pub const MIN_ARENA_HEIGHT: f32 = 480.0;
    /// Reference dimension for the sizing scale factor
    pub const SCALE_REFERENCE: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 14.0;
    pub const PLAYER_SPEED: f32 = 260.0;
    /// Keyboard acceleration as a multiple of player speed
    pub const PLAYER_ACCEL_FACTOR: f32 = 3.0;
    /// Pointer seek gain (acceleration per pixel of distance)
    pub const POINTER_SEEK_GAIN: f32 = 6.0;
    pub const PLAYER_FRICTION: f32 = 10.0;
    /// Start row as a fraction of arena height
    pub const PLAYER_START_Y: f32 = 0.8;

    /// Score accrued per second survived
    pub const SCORE_RATE: f32 = 10.0;
    /// Score at which speed and spawn interval stop ramping
    pub const RAMP_SCORE: f32 = 120.0;
    /// Score at which obstacle size reaches its floor
    pub const SIZE_RAMP_SCORE: f32 = 200.0;
    pub const SIZE_FLOOR: f32 = 0.9;

    /// Spawn interval (seconds) at score 0 and at full ramp
    pub const SPAWN_INTERVAL_START: f32 = 0.75;
    pub const SPAWN_INTERVAL_END: f32 = 0.18;
    /// Random jitter applied to each spawn interval
    pub const SPAWN_JITTER_MIN: f32 = 0.7;
    pub const SPAWN_JITTER_MAX: f32 = 1.25;

    /// Obstacle fall speed at score 0 and at full ramp
    pub const FALL_SPEED_START: f32 = 140.0;
    pub const FALL_SPEED_END: f32 = 380.0;
    /// Obstacle size bands (before scale)
    pub const OBSTACLE_WIDTH_MIN: f32 = 24.0;
    pub const OBSTACLE_WIDTH_MAX: f32 = 38.0;
    pub const OBSTACLE_HEIGHT_MIN: f32 = 18.0;
    pub const OBSTACLE_HEIGHT_MAX: f32 = 28.0;
    pub const OBSTACLE_DRIFT: f32 = 30.0;
    /// Distance below the arena bottom at which obstacles despawn
    pub const DESPAWN_MARGIN: f32 = 40.0;

    /// Particles per impact/despawn burst
    pub const BURST_COUNT: usize = 12;
    /// Ambient particles seeded before the first run
    pub const AMBIENT_COUNT: usize = 40;
    /// Burst particle gravity (before scale)
    pub const BURST_GRAVITY: f32 = 360.0;
    /// Default particle cap (Medium quality)
    pub const MAX_PARTICLES: usize = 500;

    /// Obstacle hue palette (degrees)
    pub const OBSTACLE_HUES: [u16; 6] = [190, 165, 210, 130, 0, 45];
    /// Fixed colors
    pub const PLAYER_COLOR: u32 = 0x5cf5c7;
    pub const IMPACT_COLOR: u32 = 0xff6b6b;
}

/// Uniform float in `[min, max)`; inverted bounds sample `(max, min]`
#[inline]
pub fn rand_range<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    rng.random::<f32>() * (max - min) + min
}

/// Bound `v` to `[a, b]`
#[inline]
pub fn clamp(v: f32, a: f32, b: f32) -> f32 {
    v.min(b).max(a)
}

/// Linear interpolation; `t` is not clamped
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
