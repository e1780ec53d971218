//! Wander systems.
//!
//! The pet walks along the bottom of the screen, one update per tick:
//!
//! 1. A finished bounce is retired and the walk target cleared, so the next
//!    step picks a fresh one.
//! 2. The bob phase always advances.
//! 3. While paused, the pet stands still.
//! 4. Without a target, one is picked ([`pick_new_target`]).
//! 5. Within [`ARRIVAL_DISTANCE`] of the target the pet pauses for a random
//!    time and the next target is chosen right away.
//! 6. Otherwise velocity is low-pass filtered toward a desired speed that
//!    grows with the remaining distance, and the position integrates it.
//! 7. Leaving the track clamps the position to the edge, picks a new random
//!    target and turns the pet back toward the interior.
//!
//! Vertically the sprite rests on the taskbar baseline and bobs on a sine
//! wave, unless a bounce is in flight, which then owns the y coordinate.
//! Horizontal wandering is not suspended during a bounce.
//!
//! [`advance`] is the single per-tick transition; [`wander_system`] applies it
//! to every [`Wander`] entity and publishes the [`ScreenPosition`].

use std::f32::consts::TAU;

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::bounce::Bounce;
use crate::components::facing::Facing;
use crate::components::screenposition::ScreenPosition;
use crate::components::sprite::PetSprite;
use crate::components::wander::{PetState, Wander};
use crate::resources::petconfig::PetConfig;
use crate::resources::screenlayout::{ScreenLayout, Track};
use crate::resources::worldtime::WorldTime;
use crate::systems::tween::bounce_y;

/// Distance (px) at which a target counts as reached.
pub const ARRIVAL_DISTANCE: f32 = 2.0;
/// Chance of walking to any point of the track instead of continuing ahead.
pub const LONG_WALK_CHANCE: f32 = 0.07;
/// Chance of heading for the far edge after reaching a target.
pub const EDGE_RUN_CHANCE: f32 = 0.33;
/// Nearest point ahead considered when continuing in the same direction.
pub const AHEAD_MIN: f32 = 40.0;
/// Farthest point ahead considered when continuing in the same direction.
pub const AHEAD_MAX: f32 = 200.0;
/// Every this many pixels of remaining distance adds 1 px/tick of speed.
pub const SPEED_PER_DISTANCE: f32 = 50.0;

/// Which screen edge a clamp happened at.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
}

/// What a single tick did to the horizontal motion.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// Standing still until the pause deadline.
    Paused,
    /// Reached the target; pausing for `pause` seconds.
    Arrived { pause: f32 },
    /// Moved toward the target.
    Moved,
    /// Moved past a track edge and was clamped to it.
    Clamped(Edge),
}

/// One low-pass step of `velocity` toward `target_speed`.
pub fn approach_velocity(velocity: f32, target_speed: f32, accel: f32) -> f32 {
    velocity + (target_speed - velocity) * accel.min(1.0)
}

/// Signed desired speed for a remaining horizontal distance `dx`.
pub fn desired_speed(dx: f32, config: &PetConfig) -> f32 {
    let magnitude = (config.walk_speed + dx.abs() / SPEED_PER_DISTANCE).min(config.max_speed);
    if dx > 0.0 { magnitude } else { -magnitude }
}

/// Place a freshly created pet: random start on the track, random initial
/// facing, then a first target anywhere on the track which the facing follows.
pub fn place_initial(wander: &mut Wander, layout: &ScreenLayout, sprite: &PetSprite, config: &PetConfig) {
    let track = layout.track(sprite.width, config.edge_margin);
    wander.facing = if wander.rng.bool() {
        Facing::Right
    } else {
        Facing::Left
    };
    let lo = track.min_x.round() as i32;
    let hi = (track.max_x.round() as i32).max(lo);
    wander.x = wander.rng.i32(lo..=hi) as f32;
    wander.velocity = 0.0;
    wander.wait_until = 0.0;
    wander.bob_phase = wander.rng.f32() * TAU;

    let target = wander.uniform(track.min_x, track.max_x);
    wander.target = Some(target);
    wander.facing = Facing::toward(wander.x, target);
    info!(
        "Pet placed at x={} heading {:?} to {:.1} (track {}..{})",
        wander.x, wander.facing, target, track.min_x, track.max_x
    );
}

/// Choose the next walk target and face it.
///
/// Usually continues in the current direction, 40 to 200 px ahead; with a
/// small chance, or when there is no room ahead, any point of the track.
pub fn pick_new_target(wander: &mut Wander, track: Track) -> f32 {
    let target = if wander.rng.f32() < LONG_WALK_CHANCE {
        wander.uniform(track.min_x, track.max_x)
    } else {
        let (low, high) = match wander.facing {
            Facing::Right => (
                (wander.x + AHEAD_MIN).min(track.max_x),
                (wander.x + AHEAD_MAX).min(track.max_x),
            ),
            Facing::Left => (
                (wander.x - AHEAD_MAX).max(track.min_x),
                (wander.x - AHEAD_MIN).max(track.min_x),
            ),
        };
        if low >= high {
            wander.uniform(track.min_x, track.max_x)
        } else {
            wander.uniform(low, high)
        }
    };
    let target = track.clamp(target);
    wander.target = Some(target);
    wander.facing = Facing::toward(wander.x, target);
    debug!("New target {:.1} from x={:.1} ({:?})", target, wander.x, wander.facing);
    target
}

/// Start a bounce from `takeoff_y` unless one is already in flight.
///
/// Returns whether a bounce was started.
pub fn start_bounce(wander: &mut Wander, takeoff_y: f32, now: f64, config: &PetConfig) -> bool {
    if wander.is_bouncing() {
        return false;
    }
    let bounce = Bounce::new(
        now,
        config.bounce_seconds(),
        takeoff_y,
        config.bounce_height,
        config.bounce_easing,
    );
    info!("Bounce from y={} to y={}", bounce.takeoff_y(), bounce.peak_y());
    wander.bounce = Some(bounce);
    true
}

/// Advance the horizontal motion and the bob by one tick.
pub fn advance(
    wander: &mut Wander,
    layout: &ScreenLayout,
    sprite: &PetSprite,
    config: &PetConfig,
    now: f64,
) -> TickOutcome {
    if wander.bounce.as_ref().is_some_and(|b| b.is_finished(now)) {
        wander.bounce = None;
        wander.target = None;
        debug!("Bounce finished, target cleared");
    }

    wander.bob_phase = (wander.bob_phase + config.bob_step).rem_euclid(TAU);
    let track = layout.track(sprite.width, config.edge_margin);

    let target = match wander.stride_state(now) {
        PetState::Paused => {
            // Only moves if the screen geometry shrank under the pet.
            wander.x = track.clamp(wander.x);
            return TickOutcome::Paused;
        }
        PetState::Idle => pick_new_target(wander, track),
        _ => match wander.target {
            Some(target) => target,
            None => pick_new_target(wander, track),
        },
    };

    let dx = target - wander.x;
    if dx.abs() <= ARRIVAL_DISTANCE {
        let pause = wander.uniform(config.pause_min, config.pause_max);
        wander.wait_until = now + pause as f64;
        let next = if wander.rng.f32() < EDGE_RUN_CHANCE {
            if wander.x < track.midpoint() {
                track.max_x
            } else {
                track.min_x
            }
        } else {
            wander.uniform(track.min_x, track.max_x)
        };
        wander.target = Some(next);
        wander.facing = Facing::toward(wander.x, next);
        debug!(
            "Arrived at {:.1}, pausing {:.2}s, next target {:.1}",
            wander.x, pause, next
        );
        return TickOutcome::Arrived { pause };
    }

    wander.velocity = approach_velocity(wander.velocity, desired_speed(dx, config), config.accel);
    wander.x += wander.velocity;
    wander.facing = if dx > 0.0 { Facing::Right } else { Facing::Left };

    if wander.x < track.min_x {
        wander.x = track.min_x;
        let next = wander.uniform(track.min_x, track.max_x);
        wander.target = Some(next);
        wander.facing = Facing::Right;
        info!("Clamped at left edge, new target {:.1}", next);
        TickOutcome::Clamped(Edge::Left)
    } else if wander.x > track.max_x {
        wander.x = track.max_x;
        let next = wander.uniform(track.min_x, track.max_x);
        wander.target = Some(next);
        wander.facing = Facing::Left;
        info!("Clamped at right edge, new target {:.1}", next);
        TickOutcome::Clamped(Edge::Right)
    } else {
        TickOutcome::Moved
    }
}

/// Screen y of the sprite: the bounce while one is in flight, otherwise the
/// taskbar baseline plus the bob.
pub fn vertical_position(
    wander: &Wander,
    layout: &ScreenLayout,
    sprite: &PetSprite,
    config: &PetConfig,
    now: f64,
) -> f32 {
    match &wander.bounce {
        Some(bounce) => bounce_y(bounce, now),
        None => {
            layout.y_base(sprite.height, config.raise)
                + wander.bob_phase.sin() * config.bob_amplitude
        }
    }
}

/// Advance every wandering pet by one tick and publish its window position.
pub fn wander_system(
    time: Res<WorldTime>,
    layout: Res<ScreenLayout>,
    config: Res<PetConfig>,
    mut query: Query<(&mut Wander, &PetSprite, &mut ScreenPosition)>,
) {
    let now = time.elapsed;
    for (mut wander, sprite, mut position) in query.iter_mut() {
        advance(&mut wander, &layout, sprite, &config, now);
        let y = vertical_position(&wander, &layout, sprite, &config, now);
        *position = ScreenPosition::from_f32(wander.x, y);
    }
}
