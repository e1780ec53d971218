//! Click events.
//!
//! A [`PetClickedEvent`] is triggered for every left click on the sprite.
//! [`pet_click_observer`] turns it into a bounce taking off from the pet's
//! current window position; clicks while a bounce is in flight are ignored.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::screenposition::ScreenPosition;
use crate::components::wander::Wander;
use crate::resources::petconfig::PetConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::wander::start_bounce;

/// Left click on the pet sprite.
#[derive(Event, Debug, Clone, Copy)]
pub struct PetClickedEvent {}

pub fn pet_click_observer(
    _trigger: On<PetClickedEvent>,
    time: Res<WorldTime>,
    config: Res<PetConfig>,
    mut query: Query<(&mut Wander, &ScreenPosition)>,
) {
    for (mut wander, position) in query.iter_mut() {
        if !start_bounce(&mut wander, position.y as f32, time.elapsed, &config) {
            debug!("Click ignored, already bouncing");
        }
    }
}
