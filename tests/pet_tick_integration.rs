//! Pet tick integration tests.
//!
//! Drive a headless `World` through the tick schedule and the click observer
//! the same way the main loop does, without opening a window.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use image::{Rgba, RgbaImage};

use wanderpet::components::screenposition::ScreenPosition;
use wanderpet::components::sprite::PetSprite;
use wanderpet::components::wander::{PetState, Wander};
use wanderpet::events::click::{PetClickedEvent, pet_click_observer};
use wanderpet::pet::spawn_pet;
use wanderpet::resources::petconfig::PetConfig;
use wanderpet::resources::screenlayout::ScreenLayout;
use wanderpet::resources::worldtime::WorldTime;
use wanderpet::spriteprep::{SpriteFrame, encode_animation, prepare_from_bytes};
use wanderpet::systems::time::update_world_time;
use wanderpet::systems::wander::wander_system;

const SCREEN_W: i32 = 1920;
const SCREEN_H: i32 = 1080;

fn make_world() -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(ScreenLayout::new(SCREEN_W, SCREEN_H, 48));
    world.insert_resource(PetConfig::new());
    world.spawn(Observer::new(pet_click_observer));
    world.flush();
    world
}

fn tick_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(wander_system);
    schedule
}

fn run_ticks(world: &mut World, schedule: &mut Schedule, n: usize) {
    let tick = world.resource::<PetConfig>().tick_seconds();
    for _ in 0..n {
        update_world_time(world, tick);
        schedule.run(world);
    }
}

fn baseline(world: &World, sprite: PetSprite) -> f32 {
    let config = world.resource::<PetConfig>();
    world
        .resource::<ScreenLayout>()
        .y_base(sprite.height, config.raise)
}

#[test]
fn test_wander_stays_on_track_for_many_ticks() {
    let mut world = make_world();
    let sprite = PetSprite::new(90, 90);
    let pet = spawn_pet(&mut world, sprite, Some(42));
    let mut schedule = tick_schedule();
    let base = baseline(&world, sprite);

    let mut moved = false;
    let start_x = world.get::<ScreenPosition>(pet).unwrap().x;
    for _ in 0..2000 {
        run_ticks(&mut world, &mut schedule, 1);
        let pos = *world.get::<ScreenPosition>(pet).unwrap();
        assert!(pos.x >= 8 && pos.x <= SCREEN_W - 90 - 8, "x={} off track", pos.x);
        assert!(
            (pos.y as f32 - base).abs() <= 7.0,
            "y={} strays from baseline {}",
            pos.y,
            base
        );
        moved |= pos.x != start_x;
    }
    assert!(moved, "pet never moved");
    assert_eq!(world.resource::<WorldTime>().ticks, 2000);
}

#[test]
fn test_click_bounces_and_lands() {
    let mut world = make_world();
    let sprite = PetSprite::new(90, 90);
    let pet = spawn_pet(&mut world, sprite, Some(5));
    let mut schedule = tick_schedule();
    run_ticks(&mut world, &mut schedule, 3);

    let takeoff = world.get::<ScreenPosition>(pet).unwrap().y;
    world.trigger(PetClickedEvent {});
    let now = world.resource::<WorldTime>().elapsed;
    {
        let wander = world.get::<Wander>(pet).unwrap();
        assert!(wander.is_bouncing());
        assert_eq!(wander.state(now), PetState::Bouncing);
    }

    // 0.1 s into the bounce the sprite is near the top of its arc.
    run_ticks(&mut world, &mut schedule, 4);
    let airborne = world.get::<ScreenPosition>(pet).unwrap().y;
    assert!(airborne < takeoff - 50, "y={} not lifted from {}", airborne, takeoff);

    // Well past the 650 ms duration the bounce is retired.
    run_ticks(&mut world, &mut schedule, 40);
    let wander = world.get::<Wander>(pet).unwrap();
    assert!(!wander.is_bouncing());
    let landed = world.get::<ScreenPosition>(pet).unwrap().y as f32;
    assert!((landed - baseline(&world, sprite)).abs() <= 7.0);
}

#[test]
fn test_click_while_airborne_is_ignored() {
    let mut world = make_world();
    let pet = spawn_pet(&mut world, PetSprite::new(90, 90), Some(9));
    let mut schedule = tick_schedule();
    run_ticks(&mut world, &mut schedule, 1);

    world.trigger(PetClickedEvent {});
    let first = world.get::<Wander>(pet).unwrap().bounce.clone().unwrap();

    run_ticks(&mut world, &mut schedule, 5);
    world.trigger(PetClickedEvent {});
    let second = world.get::<Wander>(pet).unwrap().bounce.clone().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_click_bounce_lands_after_days_of_uptime() {
    let mut world = make_world();
    world.insert_resource(WorldTime {
        elapsed: 600_000.0,
        ..WorldTime::default()
    });
    let pet = spawn_pet(&mut world, PetSprite::new(90, 90), Some(21));
    let mut schedule = tick_schedule();
    run_ticks(&mut world, &mut schedule, 1);

    world.trigger(PetClickedEvent {});
    assert!(world.get::<Wander>(pet).unwrap().is_bouncing());
    run_ticks(&mut world, &mut schedule, 40);
    assert!(!world.get::<Wander>(pet).unwrap().is_bouncing());

    // A later click is honoured again.
    world.trigger(PetClickedEvent {});
    assert!(world.get::<Wander>(pet).unwrap().is_bouncing());
    assert!(world.resource::<WorldTime>().elapsed > 600_001.0);
}

#[test]
fn test_horizontal_motion_continues_during_bounce() {
    let mut world = make_world();
    let pet = spawn_pet(&mut world, PetSprite::new(90, 90), Some(11));
    {
        let mut wander = world.get_mut::<Wander>(pet).unwrap();
        wander.x = 400.0;
        wander.target = Some(1400.0);
        wander.wait_until = 0.0;
    }
    let mut schedule = tick_schedule();
    run_ticks(&mut world, &mut schedule, 1);
    world.trigger(PetClickedEvent {});
    let before = world.get::<Wander>(pet).unwrap().x;
    run_ticks(&mut world, &mut schedule, 10);
    let after = world.get::<Wander>(pet).unwrap().x;
    assert!(after > before, "x {} -> {} while bouncing", before, after);
}

#[test]
fn test_prepared_sprite_spawns_pet_on_track() {
    let frames: Vec<SpriteFrame> = (0..3u8)
        .map(|i| {
            let image = RgbaImage::from_pixel(100, 100, Rgba([i * 80, 0, 255 - i * 80, 255]));
            SpriteFrame::new(image, 100)
        })
        .collect();
    let source = encode_animation(&frames).unwrap();

    let prepared = prepare_from_bytes(&source, 0.9).unwrap();
    assert_eq!(prepared.size(), (90, 90));
    assert_eq!(prepared.frame_count, 3);

    let mut world = make_world();
    for seed in 0..50 {
        let pet = spawn_pet(
            &mut world,
            PetSprite::new(prepared.width, prepared.height),
            Some(seed),
        );
        let pos = world.get::<ScreenPosition>(pet).unwrap();
        assert!(pos.x >= 8 && pos.x <= SCREEN_W - 90 - 8, "seed {} x={}", seed, pos.x);
        let wander = world.get::<Wander>(pet).unwrap();
        assert!(wander.target.is_some());
    }
}

#[test]
fn test_screen_shrink_pulls_pet_back_on_track() {
    let mut world = make_world();
    let pet = spawn_pet(&mut world, PetSprite::new(90, 90), Some(3));
    {
        let mut wander = world.get_mut::<Wander>(pet).unwrap();
        wander.x = 1700.0;
        wander.target = Some(1750.0);
    }
    world.insert_resource(ScreenLayout::new(1280, 720, 48));
    let mut schedule = tick_schedule();
    run_ticks(&mut world, &mut schedule, 1);
    let pos = world.get::<ScreenPosition>(pet).unwrap();
    assert!(pos.x <= 1280 - 90 - 8, "x={} beyond shrunken track", pos.x);
}
