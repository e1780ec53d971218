//! Pet entity setup.

use bevy_ecs::prelude::*;
use fastrand::Rng;

use crate::components::screenposition::ScreenPosition;
use crate::components::sprite::PetSprite;
use crate::components::wander::Wander;
use crate::resources::petconfig::PetConfig;
use crate::resources::screenlayout::ScreenLayout;
use crate::systems::wander::{place_initial, vertical_position};

/// Spawn the pet on the track and return its entity.
///
/// Requires the [`ScreenLayout`] and [`PetConfig`] resources. A `seed` makes
/// the whole wander reproducible; without one the generator is seeded from
/// the system.
pub fn spawn_pet(world: &mut World, sprite: PetSprite, seed: Option<u64>) -> Entity {
    let rng = match seed {
        Some(seed) => Rng::with_seed(seed),
        None => Rng::new(),
    };
    let mut wander = Wander::new(rng);
    let position = {
        let layout = world.resource::<ScreenLayout>();
        let config = world.resource::<PetConfig>();
        place_initial(&mut wander, layout, &sprite, config);
        let y = vertical_position(&wander, layout, &sprite, config, 0.0);
        ScreenPosition::from_f32(wander.x, y)
    };
    world.spawn((wander, sprite, position)).id()
}
