//! Frame timing

use crate::consts::{MAX_FRAME_DT, MIN_FRAME_DT};

/// Bound a raw frame delta (seconds); NaN and non-positive deltas take the floor
#[inline]
pub fn clamp_frame_dt(raw: f32) -> f32 {
    if raw.is_nan() {
        return MIN_FRAME_DT;
    }
    raw.clamp(MIN_FRAME_DT, MAX_FRAME_DT)
}

/// Turns animation-frame timestamps into clamped simulation deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    /// Previous timestamp in seconds (0 before the first frame)
    last: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a timestamp in milliseconds, get the delta in seconds
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let now = now_ms * 0.001;
        let raw = (now - self.last) as f32;
        self.last = now;
        clamp_frame_dt(raw)
    }
}
