use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::screenposition::ScreenPosition;
use crate::components::wander::Wander;
use crate::resources::spriteplayer::SpritePlayer;

/// Move the pet window to its position directive and draw the current frame.
///
/// The sequence matching the pet's facing is selected before advancing, so
/// a facing change restarts the new sequence at its first frame.
pub fn render_pet(world: &mut World, thread: &RaylibThread, player: &mut SpritePlayer, dt: f32) {
    let placement = {
        let mut q = world.query::<(&ScreenPosition, &Wander)>();
        q.iter(world).next().map(|(pos, wander)| (*pos, wander.facing))
    };
    let Some((pos, facing)) = placement else {
        return;
    };

    player.select(facing);
    player.advance(dt * 1000.0);

    let mut rl = world.non_send_resource_mut::<RaylibHandle>();
    rl.set_window_position(pos.x, pos.y);
    let mut d = rl.begin_drawing(thread);
    d.clear_background(Color::BLANK);
    if let Some(texture) = player.current_texture() {
        d.draw_texture(texture, 0, 0, Color::WHITE);
    }
}
