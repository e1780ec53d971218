//! Screen-space position directive.
//!
//! The [`ScreenPosition`] component holds where the pet window's top-left
//! corner goes on the desktop, in whole pixels. The wander system writes it
//! every tick and the render pass moves the window there.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScreenPosition {
    pub x: i32,
    pub y: i32,
}

impl ScreenPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Truncate fractional coordinates toward zero.
    pub fn from_f32(x: f32, y: f32) -> Self {
        Self {
            x: x as i32,
            y: y as i32,
        }
    }
}
