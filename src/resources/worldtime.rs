use bevy_ecs::prelude::Resource;

/// Simulation clock advanced once per tick.
///
/// `elapsed` is the world time in seconds that pause deadlines and bounces
/// are measured against. It is kept in `f64` so the pet can run for months
/// without the tick increment rounding away.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f64,
    pub delta: f32,
    pub time_scale: f32,
    /// Number of ticks run so far.
    pub ticks: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            ticks: 0,
        }
    }
}
