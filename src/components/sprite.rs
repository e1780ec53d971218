use bevy_ecs::prelude::Component;

/// Size in pixels of the prepared sprite frames (identical for both facings).
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PetSprite {
    pub width: u32,
    pub height: u32,
}

impl PetSprite {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}
