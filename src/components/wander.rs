//! Motion state of the wandering pet.
//!
//! [`Wander`] is the one owned state object of the pet: horizontal position
//! and velocity, facing, walk target, pause deadline, bob phase and the
//! in-flight [`Bounce`], if any. Only the wander systems and the click
//! observer mutate it (see [`crate::systems::wander`]).
//!
//! The pet is always in exactly one [`PetState`], derived from these fields
//! at a given world time.

use bevy_ecs::prelude::Component;
use fastrand::Rng;

use super::bounce::Bounce;
use super::facing::Facing;

/// Logical state of the pet at a point in time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PetState {
    /// No walk target; one is chosen on the next tick.
    Idle,
    /// Walking toward the current target.
    Seeking,
    /// Standing still until the pause deadline passes.
    Paused,
    /// A click-triggered bounce is in flight. Horizontal wandering goes on
    /// underneath it.
    Bouncing,
}

#[derive(Component, Debug)]
pub struct Wander {
    /// Horizontal screen position of the sprite's left edge.
    pub x: f32,
    /// Horizontal velocity in pixels per tick.
    pub velocity: f32,
    pub facing: Facing,
    /// Horizontal position being walked toward.
    pub target: Option<f32>,
    /// World time (seconds) until which horizontal motion is frozen.
    pub wait_until: f64,
    /// Bob oscillator phase in radians, advanced every tick and wrapped into
    /// `[0, TAU)`.
    pub bob_phase: f32,
    pub bounce: Option<Bounce>,
    /// Source of every random decision the pet makes.
    pub rng: Rng,
}

impl Wander {
    pub fn new(rng: Rng) -> Self {
        Self {
            x: 0.0,
            velocity: 0.0,
            facing: Facing::Right,
            target: None,
            wait_until: 0.0,
            bob_phase: 0.0,
            bounce: None,
            rng,
        }
    }

    /// Deterministic state for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Rng::with_seed(seed))
    }

    pub fn is_bouncing(&self) -> bool {
        self.bounce.is_some()
    }

    pub fn is_paused(&self, now: f64) -> bool {
        now < self.wait_until
    }

    /// Horizontal state, ignoring any bounce in flight.
    pub fn stride_state(&self, now: f64) -> PetState {
        if self.is_paused(now) {
            PetState::Paused
        } else if self.target.is_some() {
            PetState::Seeking
        } else {
            PetState::Idle
        }
    }

    /// Current logical state. A bounce takes precedence.
    pub fn state(&self, now: f64) -> PetState {
        if self.is_bouncing() {
            PetState::Bouncing
        } else {
            self.stride_state(now)
        }
    }

    /// Uniform sample between `lo` and `hi`; returns `lo` for an empty range.
    pub fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        lo + (hi - lo) * self.rng.f32()
    }
}
