//! Pet systems.
//!
//! Submodules overview
//! - [`input`] – poll the left mouse button and trigger clicks
//! - [`layout`] – refresh monitor geometry every tick
//! - [`render`] – move the window and draw the current animation frame
//! - [`time`] – advance the fixed-step simulation clock
//! - [`tween`] – easing, keyframe sampling and bounce evaluation
//! - [`wander`] – the per-tick motion update and target selection

pub mod input;
pub mod layout;
pub mod render;
pub mod time;
pub mod tween;
pub mod wander;
