//! Play/pause flag and speed multiplier
//!
//! The clock turns frame timestamps into speed-scaled deltas. It never touches
//! effect state.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Global animation clock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clock {
    playing: bool,
    speed: f32,
    /// Timestamp (ms) of the previous frame; `None` until the next frame after start/resume
    last_timestamp: Option<f64>,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(1.0, true)
    }
}

impl Clock {
    pub fn new(speed: f32, playing: bool) -> Self {
        let mut clock = Self {
            playing,
            speed: 1.0,
            last_timestamp: None,
        };
        clock.set_speed(speed);
        clock
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Scale a raw delta (seconds) by the speed multiplier
    #[inline]
    pub fn tick(&self, raw_dt: f32) -> f32 {
        raw_dt * self.speed
    }

    /// Consume a frame timestamp (ms) and return the scaled delta in seconds.
    ///
    /// Returns `None` while paused. The first frame after construction or
    /// resume yields a zero delta instead of a catch-up jump.
    pub fn advance(&mut self, timestamp_ms: f64) -> Option<f32> {
        if !self.playing {
            return None;
        }
        let last = self.last_timestamp.replace(timestamp_ms).unwrap_or(timestamp_ms);
        let raw_dt = ((timestamp_ms - last) / 1000.0).max(0.0) as f32;
        Some(self.tick(raw_dt))
    }

    /// Stop time. Returns true if the clock was playing (a pending frame must be cancelled).
    pub fn pause(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        self.playing = false;
        true
    }

    /// Restart time. Returns true if the clock was paused (a frame must be scheduled).
    pub fn resume(&mut self) -> bool {
        if self.playing {
            return false;
        }
        self.playing = true;
        self.last_timestamp = None;
        true
    }

    /// Flip play/pause; returns the new playing state
    pub fn toggle(&mut self) -> bool {
        if self.playing {
            self.pause();
        } else {
            self.resume();
        }
        self.playing
    }

    /// Set the multiplier, clamped to [MIN_SPEED, MAX_SPEED]. NaN is ignored.
    pub fn set_speed(&mut self, speed: f32) {
        if speed.is_nan() {
            log::warn!("Ignoring NaN speed");
            return;
        }
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }

    pub fn speed_up(&mut self) {
        self.speed = (self.speed * SPEED_UP_FACTOR).min(MAX_SPEED);
    }

    pub fn slow_down(&mut self) {
        self.speed = (self.speed * SLOW_DOWN_FACTOR).max(MIN_SPEED);
    }

    /// Readout text: two decimals, trailing zeros dropped (`1×`, `1.95×`)
    pub fn speed_label(&self) -> String {
        let rounded = (self.speed * 100.0).round() / 100.0;
        format!("{rounded}×")
    }
}
