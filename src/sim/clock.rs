//! Frame clock with slow-motion and camera shake
//!
//! Slow motion is a pure transform of the frame delta: every integrator and
//! timer downstream sees the same scaled `dt`.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_FRAME_DT;

/// Timescale and screen-shake state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clock {
    /// Multiplier applied to raw frame time (1.0 = real time)
    pub time_scale: f32,
    /// Seconds of slow motion left (scaled time)
    pub slow_motion_remaining: f32,
    /// Shake amplitude in pixels, decays to zero
    pub camera_shake: f32,
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            slow_motion_remaining: 0.0,
            camera_shake: 0.0,
        }
    }
}

impl Clock {
    /// Convert a raw frame delta into simulation time
    pub fn scale(&self, raw_dt: f32) -> f32 {
        raw_dt.clamp(0.0, MAX_FRAME_DT) * self.time_scale
    }

    /// Enter slow motion for `duration` seconds of scaled time
    pub fn slow_motion(&mut self, scale: f32, duration: f32) {
        self.time_scale = scale;
        self.slow_motion_remaining = duration;
    }

    /// Raise shake to at least `amount`
    pub fn shake(&mut self, amount: f32) {
        self.camera_shake = self.camera_shake.max(amount);
    }

    /// Back to real time immediately
    pub fn reset_time_scale(&mut self) {
        self.time_scale = 1.0;
        self.slow_motion_remaining = 0.0;
    }

    /// Advance slow-motion and shake decay by scaled `dt`
    pub fn advance(&mut self, dt: f32) {
        if self.slow_motion_remaining > 0.0 {
            self.slow_motion_remaining -= dt;
            if self.slow_motion_remaining <= 0.0 {
                self.reset_time_scale();
            }
        }

        if self.camera_shake > 0.0 {
            self.camera_shake = (self.camera_shake - dt * 10.0).max(0.0);
        }
    }
}
