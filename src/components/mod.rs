//! ECS components for the pet entity.
//!
//! Submodules overview:
//! - [`bounce`] – click-triggered keyframed vertical bounce
//! - [`facing`] – left/right selector for the displayed animation
//! - [`screenposition`] – window position directive written each tick
//! - [`sprite`] – size of the prepared sprite frames
//! - [`tween`] – easing curves and keyframes
//! - [`wander`] – the pet's motion state and its logical [`wander::PetState`]

pub mod bounce;
pub mod facing;
pub mod screenposition;
pub mod sprite;
pub mod tween;
pub mod wander;
