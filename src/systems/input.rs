//! Pointer input.
//!
//! The pet only reacts to one input: a left click on the sprite. The window
//! is exactly the sprite, so any left click raylib reports is on the pet.
//! Everything else is ignored.
use bevy_ecs::prelude::*;
use raylib::prelude::MouseButton;

use crate::events::click::PetClickedEvent;

/// Poll the left mouse button and trigger [`PetClickedEvent`] on press.
///
/// Runs every rendered frame, not every tick, so short clicks are not lost
/// between ticks.
pub fn update_pointer_state(rl: NonSend<raylib::RaylibHandle>, mut commands: Commands) {
    if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
        commands.trigger(PetClickedEvent {});
    }
}
