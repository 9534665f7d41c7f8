//! Score-driven difficulty curves
//!
//! Everything ramps linearly with score and saturates at a threshold; there
//! are no discrete levels.

use crate::consts::*;
use crate::lerp;

/// Ramp position in `[0, 1]` for a score against a saturation threshold
#[inline]
pub fn ramp(score: f32, threshold: f32) -> f32 {
    (score / threshold).clamp(0.0, 1.0)
}

/// Base seconds between spawns, before jitter
pub fn spawn_interval(score: f32) -> f32 {
    lerp(
        SPAWN_INTERVAL_START,
        SPAWN_INTERVAL_END,
        ramp(score, RAMP_SCORE),
    )
}

/// Obstacle fall speed in pixels per second
pub fn fall_speed(score: f32) -> f32 {
    lerp(FALL_SPEED_START, FALL_SPEED_END, ramp(score, RAMP_SCORE))
}

/// Obstacle size multiplier; shrinks slightly with score down to a floor
pub fn size_factor(score: f32) -> f32 {
    (1.0 - score / SIZE_RAMP_SCORE).max(SIZE_FLOOR)
}
