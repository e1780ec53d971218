//! Wanderpet main entry point.
//!
//! A desktop pet built with:
//! - **raylib** for the borderless, transparent, always-on-top window
//! - **bevy_ecs** for the motion state, systems and click observer
//! - **image** and **gif** for preparing the sprite animations
//!
//! # Startup
//!
//! 1. Parse the command line and load `wanderpet.ini`
//! 2. Locate the source GIF and prepare the right- and left-facing animations
//! 3. Open a window exactly the size of the sprite
//! 4. Build the ECS world, register the click observer and spawn the pet
//!
//! # Main Loop
//!
//! - Poll the mouse every frame (a click starts a bounce)
//! - Run the tick schedule once per elapsed tick period: refresh the screen
//!   layout, then move the pet
//! - Move the window and draw the current frame
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- path/to/sprite.gif
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};
use raylib::ffi;
use raylib::prelude::*;
use std::path::PathBuf;

use wanderpet::components::facing::Facing;
use wanderpet::components::sprite::PetSprite;
use wanderpet::components::wander::Wander;
use wanderpet::events::click::pet_click_observer;
use wanderpet::pet::spawn_pet;
use wanderpet::resources::petconfig::PetConfig;
use wanderpet::resources::spriteplayer::SpritePlayer;
use wanderpet::resources::worldtime::WorldTime;
use wanderpet::spriteprep::{find_sprite_source, prepare_from_path};
use wanderpet::systems::input::update_pointer_state;
use wanderpet::systems::layout::{query_screen_layout, refresh_screen_layout};
use wanderpet::systems::render::render_pet;
use wanderpet::systems::time::update_world_time;
use wanderpet::systems::wander::wander_system;

/// Ticks the loop may fall behind before the backlog is dropped.
const MAX_CATCH_UP_TICKS: f32 = 5.0;
const RENDER_FPS: u32 = 60;

/// Wanderpet: a sprite that wanders along the bottom of your screen
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Animated GIF to use. Defaults to the configured source in the current
    /// directory, then the first GIF found there.
    source: Option<PathBuf>,

    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "./wanderpet.ini")]
    config: PathBuf,

    /// Override the sprite scale factor.
    #[arg(long, value_name = "FACTOR")]
    scale: Option<f32>,

    /// Write the effective configuration to the config file and exit.
    #[arg(long)]
    write_config: bool,

    /// Seed for a reproducible wander.
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = PetConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if let Some(scale) = cli.scale {
        config.scale = scale;
    }
    config.validate();

    if cli.write_config {
        match config.save_to_file() {
            Ok(()) => println!("Configuration written to {}", config.config_path.display()),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    // --------------- Asset preparation ---------------
    let source = match cli.source.clone() {
        Some(path) => path,
        None => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            match find_sprite_source(&cwd, &config.source) {
                Some(path) => path,
                None => fatal(
                    "No sprite found",
                    &format!(
                        "Put {} (or any .gif) in {} or pass a path on the command line.",
                        config.source,
                        cwd.display()
                    ),
                ),
            }
        }
    };
    info!("Preparing sprite {} at scale {}", source.display(), config.scale);
    let prepared = match prepare_from_path(&source, config.scale) {
        Ok(prepared) => prepared,
        Err(e) => fatal("Could not prepare sprite", &format!("{}: {}", source.display(), e)),
    };
    let sprite = PetSprite::new(prepared.width, prepared.height);

    // --------------- Raylib window ---------------
    unsafe {
        ffi::SetConfigFlags(ffi::ConfigFlags::FLAG_WINDOW_UNFOCUSED as u32);
    }
    let (mut rl, thread) = raylib::init()
        .size(sprite.width as i32, sprite.height as i32)
        .title("Wanderpet")
        .undecorated()
        .transparent()
        .build();
    unsafe {
        ffi::SetWindowState(ffi::ConfigFlags::FLAG_WINDOW_TOPMOST as u32);
    }
    rl.set_target_fps(RENDER_FPS);
    rl.set_exit_key(None);

    let layout = query_screen_layout(&config);
    info!(
        "Screen {}x{}, usable bottom {}",
        layout.screen_w, layout.screen_h, layout.usable_bottom
    );

    // --------------- ECS world + resources ---------------
    let tick = config.tick_seconds();
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(layout);
    world.insert_resource(config);
    world.spawn(Observer::new(pet_click_observer));
    world.flush();

    let pet = spawn_pet(&mut world, sprite, cli.seed);
    let facing = world
        .get::<Wander>(pet)
        .map(|w| w.facing)
        .unwrap_or(Facing::Right);

    let mut player = match SpritePlayer::load(&mut rl, &thread, &prepared, facing) {
        Ok(player) => player,
        Err(e) => fatal_in(&mut rl, &thread, "Could not load sprite", &e),
    };
    drop(prepared);
    world.insert_non_send_resource(rl);

    let mut frame = Schedule::default();
    frame.add_systems(update_pointer_state);

    let mut tick_schedule = Schedule::default();
    tick_schedule.add_systems((refresh_screen_layout, wander_system).chain());

    // --------------- Main loop ---------------
    let mut accumulator = 0.0f32;
    while !world
        .non_send_resource::<RaylibHandle>()
        .window_should_close()
    {
        let dt = world.non_send_resource::<RaylibHandle>().get_frame_time();

        frame.run(&mut world);

        accumulator = (accumulator + dt).min(tick * MAX_CATCH_UP_TICKS);
        while accumulator >= tick {
            update_world_time(&mut world, tick);
            tick_schedule.run(&mut world);
            accumulator -= tick;
        }

        render_pet(&mut world, &thread, &mut player, dt);

        world.clear_trackers();
    }
    info!("Window closed, bye");
}

/// Log `message`, show it in a small window until dismissed, then exit 1.
fn fatal(title: &str, message: &str) -> ! {
    error!("{}: {}", title, message);
    let (lines, height) = diagnostic_layout(message);
    let (mut rl, thread) = raylib::init()
        .size(DIAG_WIDTH, height)
        .title(title)
        .build();
    show_diagnostic(&mut rl, &thread, title, &lines, height);
    std::process::exit(1);
}

/// Like [`fatal`], reusing the already open pet window.
fn fatal_in(rl: &mut RaylibHandle, thread: &RaylibThread, title: &str, message: &str) -> ! {
    error!("{}: {}", title, message);
    let (lines, height) = diagnostic_layout(message);
    rl.set_window_size(DIAG_WIDTH, height);
    rl.set_window_title(thread, title);
    show_diagnostic(rl, thread, title, &lines, height);
    std::process::exit(1);
}

const DIAG_WIDTH: i32 = 480;
const DIAG_FONT: i32 = 18;
const DIAG_MARGIN: i32 = 16;

fn diagnostic_layout(message: &str) -> (Vec<String>, i32) {
    let columns = ((DIAG_WIDTH - 2 * DIAG_MARGIN) / (DIAG_FONT / 2)) as usize;
    let lines = wrap_text(message, columns);
    let height = DIAG_MARGIN * 3 + DIAG_FONT * (lines.len() as i32 + 2);
    (lines, height)
}

fn show_diagnostic(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    title: &str,
    lines: &[String],
    height: i32,
) {
    rl.set_target_fps(30);
    while !rl.window_should_close() {
        if rl.get_key_pressed().is_some() || rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT)
        {
            break;
        }
        let mut d = rl.begin_drawing(thread);
        d.clear_background(Color::RAYWHITE);
        d.draw_text(title, DIAG_MARGIN, DIAG_MARGIN, DIAG_FONT + 4, Color::MAROON);
        for (i, line) in lines.iter().enumerate() {
            let y = DIAG_MARGIN * 2 + DIAG_FONT + 4 + i as i32 * DIAG_FONT;
            d.draw_text(line, DIAG_MARGIN, y, DIAG_FONT, Color::DARKGRAY);
        }
        d.draw_text(
            "Press any key to close",
            DIAG_MARGIN,
            height - DIAG_MARGIN - DIAG_FONT,
            DIAG_FONT - 4,
            Color::GRAY,
        );
    }
}

/// Greedy word wrap at `width` characters.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_breaks_on_word_boundaries() {
        let lines = wrap_text("no sprite found in the current directory", 12);
        assert_eq!(lines, vec!["no sprite", "found in the", "current", "directory"]);
    }

    #[test]
    fn test_wrap_text_keeps_long_words_whole() {
        let lines = wrap_text("a verylongpathcomponent b", 5);
        assert_eq!(lines, vec!["a", "verylongpathcomponent", "b"]);
        assert!(wrap_text("   ", 10).is_empty());
    }

    #[test]
    fn test_cli_parses_overrides() {
        let cli = Cli::parse_from(["wanderpet", "pet.gif", "--scale", "0.5", "--seed", "3"]);
        assert_eq!(cli.source, Some(PathBuf::from("pet.gif")));
        assert_eq!(cli.scale, Some(0.5));
        assert_eq!(cli.seed, Some(3));
        assert!(!cli.write_config);
        assert_eq!(cli.config, PathBuf::from("./wanderpet.ini"));
    }
}
