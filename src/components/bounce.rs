//! Click-triggered bounce.
//!
//! A [`Bounce`] is a time-boxed vertical tween: it leaves the takeoff height,
//! reaches the peak at 35 % of its duration and lands back where it started.
//! Easing is applied to the overall progress before the keyframes are
//! sampled. It is polled against the world clock each tick instead of
//! completing through a callback.

use super::tween::{Easing, Keyframe};

/// Fraction of the bounce duration at which the peak is reached.
pub const PEAK_AT: f32 = 0.35;

#[derive(Clone, Debug, PartialEq)]
pub struct Bounce {
    /// World time (seconds) at which the bounce started.
    pub started_at: f64,
    /// Duration in seconds.
    pub duration: f32,
    /// Easing applied to the overall progress.
    pub easing: Easing,
    /// Takeoff, peak and landing heights (screen y, pixels).
    pub keyframes: [Keyframe; 3],
}

impl Bounce {
    /// Bounce from `takeoff_y` up by `height` pixels, never above the top of
    /// the screen.
    pub fn new(started_at: f64, duration: f32, takeoff_y: f32, height: f32, easing: Easing) -> Self {
        let peak_y = (takeoff_y - height).max(0.0);
        Self {
            started_at,
            duration,
            easing,
            keyframes: [
                Keyframe::new(0.0, takeoff_y),
                Keyframe::new(PEAK_AT, peak_y),
                Keyframe::new(1.0, takeoff_y),
            ],
        }
    }

    pub fn takeoff_y(&self) -> f32 {
        self.keyframes[0].value
    }

    pub fn peak_y(&self) -> f32 {
        self.keyframes[1].value
    }

    /// Linear progress in `[0, 1]` at world time `now`.
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.duration as f64).clamp(0.0, 1.0) as f32
    }

    pub fn is_finished(&self, now: f64) -> bool {
        now - self.started_at >= self.duration as f64
    }
}
