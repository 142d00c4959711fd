//! Display-side easing of the track offset.
//!
//! The engine moves in exact sub-column steps; the renderer follows it with
//! an exponential ease-out so pauses and resumes glide instead of stopping
//! dead.  A frame reported without transitions (the wrap frame) shifts the
//! displayed offset by one track period along with the engine, so the ease
//! keeps its lag and the wrap stays invisible.

use crate::core::carousel::TrackFrame;

/// Offset follower with exponential ease-out.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Offset currently on screen.
    shown: f64,
    /// Fraction of the remaining distance covered each frame.
    /// Good range: 0.4–0.8 at 60 fps.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            shown: 0.0,
            speed: speed.clamp(0.05, 1.0),
        }
    }

    /// Feed the engine's frame.  Call once per display frame.  `period` is
    /// the track width the engine jumps by when it wraps.
    pub fn follow(&mut self, frame: TrackFrame, period: f64) {
        if !frame.transition_enabled {
            self.shown += period;
        }
        self.shown += (frame.offset - self.shown) * self.speed;
        if (frame.offset - self.shown).abs() < 0.05 {
            self.shown = frame.offset;
        }
    }

    /// Offset to draw with.
    pub fn offset(&self) -> f64 {
        self.shown
    }
}
