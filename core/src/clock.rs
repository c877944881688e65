//! Frame clock — owns frame count, elapsed time, time scale, and pause.

use crate::types::{Frame, Seconds};
use serde::{Deserialize, Serialize};

/// Timing information for one frame, handed to every subsystem update.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FrameTime {
    pub frame:          Frame,
    /// Scaled delta; zero while paused.
    pub delta:          Seconds,
    pub unscaled_delta: Seconds,
    /// Scaled time accumulated since startup.
    pub elapsed:        Seconds,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameClock {
    pub current_frame: Frame,
    pub elapsed:       Seconds,
    pub time_scale:    f64,
    pub paused:        bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            current_frame: 0,
            elapsed: 0.0,
            time_scale: 1.0,
            paused: false,
        }
    }

    /// Advance one frame. The frame counter always moves; scaled time
    /// only moves while unpaused. Negative or non-finite deltas count as 0.
    pub fn advance(&mut self, unscaled_delta: Seconds) -> FrameTime {
        let unscaled_delta = if unscaled_delta.is_finite() { unscaled_delta.max(0.0) } else { 0.0 };
        let delta = if self.paused { 0.0 } else { unscaled_delta * self.time_scale };
        self.current_frame += 1;
        self.elapsed += delta;
        FrameTime {
            frame: self.current_frame,
            delta,
            unscaled_delta,
            elapsed: self.elapsed,
        }
    }

    pub fn pause(&mut self)  { self.paused = true;  }
    pub fn resume(&mut self) { self.paused = false; }

    /// Negative scales clamp to 0.
    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale = scale.max(0.0);
    }

    pub fn now(&self) -> FrameTime {
        FrameTime {
            frame: self.current_frame,
            delta: 0.0,
            unscaled_delta: 0.0,
            elapsed: self.elapsed,
        }
    }
}
