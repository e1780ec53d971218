//! Tween building blocks for keyframed interpolation.
//!
//! - [`Easing`] reshapes a normalized progress value before sampling.
//! - [`Keyframe`] pins a value to a point of normalized progress.
//!
//! A track is a slice of keyframes sorted by `at`; see
//! [`crate::systems::tween::sample_keyframes`] for how it is evaluated.

/// Easing functions for smooth interpolation.
///
/// These functions transform a linear `t` value (0.0 to 1.0) to create
/// different acceleration/deceleration curves.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed (no easing).
    Linear,
    /// Starts slow, accelerates (quadratic).
    QuadIn,
    /// Starts fast, decelerates (quadratic).
    QuadOut,
    /// Slow start and end (quadratic).
    QuadInOut,
    /// Starts slow, accelerates (cubic).
    CubicIn,
    /// Starts fast, decelerates (cubic).
    CubicOut,
    /// Slow start and end (cubic).
    CubicInOut,
}

impl Easing {
    pub const ALL: [Easing; 7] = [
        Easing::Linear,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
    ];

    /// Snake-case name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::QuadIn => "quad_in",
            Easing::QuadOut => "quad_out",
            Easing::QuadInOut => "quad_in_out",
            Easing::CubicIn => "cubic_in",
            Easing::CubicOut => "cubic_out",
            Easing::CubicInOut => "cubic_in_out",
        }
    }

    /// Parse a configuration name (case-insensitive, `-` or `_` separators).
    pub fn from_name(name: &str) -> Option<Easing> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        Easing::ALL.into_iter().find(|e| e.name() == normalized)
    }
}

/// A value pinned to a point of normalized progress in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Keyframe {
    pub at: f32,
    pub value: f32,
}

impl Keyframe {
    pub fn new(at: f32, value: f32) -> Self {
        Self { at, value }
    }
}
