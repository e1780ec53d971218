//! Wanderpet library.
//!
//! A small animated sprite that walks along the bottom of the screen and
//! hops when clicked. This module exposes the asset preparer and the ECS
//! components, resources, systems and events for use in integration tests.

pub mod components;
pub mod events;
pub mod pet;
pub mod resources;
pub mod spriteprep;
pub mod systems;
