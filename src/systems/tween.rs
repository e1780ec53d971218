//! Tween evaluation.
//!
//! - [`ease`] reshapes normalized progress with an [`Easing`] curve
//! - [`sample_keyframes`] interpolates a keyframe track
//! - [`bounce_y`] evaluates a [`Bounce`] at a world time
//!
//! Easing is applied to the overall progress first and the keyframes are
//! then interpolated linearly, so the easing shapes the whole bounce rather
//! than each segment.

use crate::components::bounce::Bounce;
use crate::components::tween::{Easing, Keyframe};

/// Apply an easing function to a normalized time value.
///
/// The input `t` is clamped to [0.0, 1.0] and transformed according to the
/// easing curve.
pub fn ease(e: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match e {
        Easing::Linear => t,
        Easing::QuadIn => t * t,
        Easing::QuadOut => t * (2.0 - t),
        Easing::QuadInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                -1.0 + (4.0 - 2.0 * t) * t
            }
        }
        Easing::CubicIn => t * t * t,
        Easing::CubicOut => {
            let p = t - 1.0;
            p * p * p + 1.0
        }
        Easing::CubicInOut => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                let p = 2.0 * t - 2.0;
                0.5 * p * p * p + 1.0
            }
        }
    }
}

/// Linearly interpolate between two floats.
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Value of a keyframe track at progress `t`.
///
/// `keys` must be sorted by `at`. Before the first key the first value is
/// held, after the last key the last value. An empty track yields 0.
pub fn sample_keyframes(keys: &[Keyframe], t: f32) -> f32 {
    let (Some(first), Some(last)) = (keys.first(), keys.last()) else {
        return 0.0;
    };
    if t <= first.at {
        return first.value;
    }
    if t >= last.at {
        return last.value;
    }
    for pair in keys.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.at {
            let span = b.at - a.at;
            if span <= 0.0 {
                return b.value;
            }
            return lerp_f32(a.value, b.value, (t - a.at) / span);
        }
    }
    last.value
}

/// Screen y of a bounce at world time `now`.
pub fn bounce_y(bounce: &Bounce, now: f64) -> f32 {
    let t = ease(bounce.easing, bounce.progress(now));
    sample_keyframes(&bounce.keyframes, t)
}
