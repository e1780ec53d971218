//! Event types and observers.
//!
//! Submodules:
//! - [`click`] – left click on the sprite and the bounce observer
pub mod click;
