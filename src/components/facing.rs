//! Facing direction of the pet.
//!
//! Selects which of the two prepared animations is displayed: the source
//! orientation for [`Facing::Right`], the mirrored one for [`Facing::Left`].

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// Direction of travel from `from` to `to`. Equal positions face right.
    pub fn toward(from: f32, to: f32) -> Facing {
        if to >= from { Facing::Right } else { Facing::Left }
    }
}
