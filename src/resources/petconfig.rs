//! Pet configuration resource.
//!
//! Every tunable of the pet lives in [`PetConfig`]. Defaults are safe to run
//! with; an INI file can override any subset of them.
//!
//! # Configuration File Format
//!
//! ```ini
//! [sprite]
//! source = dino.gif
//! scale = 0.9
//!
//! [motion]
//! tick_ms = 25
//! max_speed = 3.0
//! walk_speed = 0.6
//! accel = 0.15
//! edge_margin = 8
//! pause_min = 0.18
//! pause_max = 0.95
//!
//! [bob]
//! amplitude = 6
//! step = 0.1
//!
//! [bounce]
//! height = 140
//! duration_ms = 650
//! easing = cubic_out
//!
//! [screen]
//! raise = -120
//! taskbar_height = 48
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::components::tween::Easing;

const DEFAULT_SOURCE: &str = "dino.gif";
const DEFAULT_SCALE: f32 = 0.90;
const DEFAULT_TICK_MS: u32 = 25;
const DEFAULT_MAX_SPEED: f32 = 3.0;
const DEFAULT_WALK_SPEED: f32 = 0.6;
const DEFAULT_ACCEL: f32 = 0.15;
const DEFAULT_EDGE_MARGIN: u32 = 8;
const DEFAULT_PAUSE_MIN: f32 = 0.18;
const DEFAULT_PAUSE_MAX: f32 = 0.95;
const DEFAULT_BOB_AMPLITUDE: f32 = 6.0;
const DEFAULT_BOB_STEP: f32 = 0.10;
const DEFAULT_BOUNCE_HEIGHT: f32 = 140.0;
const DEFAULT_BOUNCE_MS: u32 = 650;
const DEFAULT_BOUNCE_EASING: Easing = Easing::CubicOut;
const DEFAULT_RAISE: i32 = -120;
const DEFAULT_TASKBAR_HEIGHT: u32 = 48;
const DEFAULT_CONFIG_PATH: &str = "./wanderpet.ini";

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PetConfig {
    /// Sprite file looked up first when no path is given.
    pub source: String,
    /// Scale applied to every source frame.
    pub scale: f32,
    /// Tick period in milliseconds.
    pub tick_ms: u32,
    /// Top speed in pixels per tick.
    pub max_speed: f32,
    /// Nominal walking speed in pixels per tick.
    pub walk_speed: f32,
    /// Fraction of the gap to the desired speed closed each tick.
    pub accel: f32,
    /// Distance kept from both screen edges, in pixels.
    pub edge_margin: u32,
    /// Shortest pause after reaching a target, in seconds.
    pub pause_min: f32,
    /// Longest pause after reaching a target, in seconds.
    pub pause_max: f32,
    /// Bob amplitude in pixels.
    pub bob_amplitude: f32,
    /// Bob phase increment per tick, in radians.
    pub bob_step: f32,
    /// How far a click bounce lifts the sprite, in pixels.
    pub bounce_height: f32,
    /// Bounce duration in milliseconds.
    pub bounce_duration_ms: u32,
    pub bounce_easing: Easing,
    /// Vertical offset from the taskbar baseline (negative lifts up).
    pub raise: i32,
    /// Taskbar thickness in pixels; the display layer only reports full
    /// monitor geometry.
    pub taskbar_height: u32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for PetConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PetConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            scale: DEFAULT_SCALE,
            tick_ms: DEFAULT_TICK_MS,
            max_speed: DEFAULT_MAX_SPEED,
            walk_speed: DEFAULT_WALK_SPEED,
            accel: DEFAULT_ACCEL,
            edge_margin: DEFAULT_EDGE_MARGIN,
            pause_min: DEFAULT_PAUSE_MIN,
            pause_max: DEFAULT_PAUSE_MAX,
            bob_amplitude: DEFAULT_BOB_AMPLITUDE,
            bob_step: DEFAULT_BOB_STEP,
            bounce_height: DEFAULT_BOUNCE_HEIGHT,
            bounce_duration_ms: DEFAULT_BOUNCE_MS,
            bounce_easing: DEFAULT_BOUNCE_EASING,
            raise: DEFAULT_RAISE,
            taskbar_height: DEFAULT_TASKBAR_HEIGHT,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Tick period in seconds.
    pub fn tick_seconds(&self) -> f32 {
        self.tick_ms as f32 / 1000.0
    }

    /// Bounce duration in seconds.
    pub fn bounce_seconds(&self) -> f32 {
        self.bounce_duration_ms as f32 / 1000.0
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);

        info!(
            "Loaded config from {:?}: scale={}, tick={}ms, speed={}..{}, accel={}, bounce={}px/{}ms",
            self.config_path,
            self.scale,
            self.tick_ms,
            self.walk_speed,
            self.max_speed,
            self.accel,
            self.bounce_height,
            self.bounce_duration_ms
        );
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        let float = |section: &str, key: &str| {
            config.getfloat(section, key).ok().flatten().map(|v| v as f32)
        };
        let uint = |section: &str, key: &str| {
            config.getuint(section, key).ok().flatten().map(|v| v as u32)
        };

        // [sprite] section
        if let Some(source) = config.get("sprite", "source") {
            self.source = source;
        }
        if let Some(scale) = float("sprite", "scale") {
            self.scale = scale;
        }

        // [motion] section
        if let Some(tick_ms) = uint("motion", "tick_ms") {
            self.tick_ms = tick_ms;
        }
        if let Some(max_speed) = float("motion", "max_speed") {
            self.max_speed = max_speed;
        }
        if let Some(walk_speed) = float("motion", "walk_speed") {
            self.walk_speed = walk_speed;
        }
        if let Some(accel) = float("motion", "accel") {
            self.accel = accel;
        }
        if let Some(edge_margin) = uint("motion", "edge_margin") {
            self.edge_margin = edge_margin;
        }
        if let Some(pause_min) = float("motion", "pause_min") {
            self.pause_min = pause_min;
        }
        if let Some(pause_max) = float("motion", "pause_max") {
            self.pause_max = pause_max;
        }

        // [bob] section
        if let Some(amplitude) = float("bob", "amplitude") {
            self.bob_amplitude = amplitude;
        }
        if let Some(step) = float("bob", "step") {
            self.bob_step = step;
        }

        // [bounce] section
        if let Some(height) = float("bounce", "height") {
            self.bounce_height = height;
        }
        if let Some(duration) = uint("bounce", "duration_ms") {
            self.bounce_duration_ms = duration;
        }
        if let Some(name) = config.get("bounce", "easing") {
            match Easing::from_name(&name) {
                Some(easing) => self.bounce_easing = easing,
                None => warn!("Unknown bounce easing '{}', keeping {}", name, self.bounce_easing.name()),
            }
        }

        // [screen] section
        if let Some(raise) = config.getint("screen", "raise").ok().flatten() {
            self.raise = raise as i32;
        }
        if let Some(taskbar) = uint("screen", "taskbar_height") {
            self.taskbar_height = taskbar;
        }
    }

    /// Replace out-of-range values with defaults, logging each repair.
    pub fn validate(&mut self) {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            warn!("Invalid scale {}, using {}", self.scale, DEFAULT_SCALE);
            self.scale = DEFAULT_SCALE;
        }
        if self.tick_ms == 0 {
            warn!("Tick period must be positive, using {}ms", DEFAULT_TICK_MS);
            self.tick_ms = DEFAULT_TICK_MS;
        }
        if !(self.accel.is_finite() && self.accel > 0.0) {
            warn!("Invalid acceleration {}, using {}", self.accel, DEFAULT_ACCEL);
            self.accel = DEFAULT_ACCEL;
        }
        if !(self.walk_speed.is_finite() && self.walk_speed >= 0.0) {
            warn!("Invalid walk speed {}, using {}", self.walk_speed, DEFAULT_WALK_SPEED);
            self.walk_speed = DEFAULT_WALK_SPEED;
        }
        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            warn!("Invalid max speed {}, using {}", self.max_speed, DEFAULT_MAX_SPEED);
            self.max_speed = DEFAULT_MAX_SPEED;
        }
        if self.pause_min < 0.0 || self.pause_max < 0.0 {
            warn!(
                "Negative pause bounds {}..{}, using {}..{}",
                self.pause_min, self.pause_max, DEFAULT_PAUSE_MIN, DEFAULT_PAUSE_MAX
            );
            self.pause_min = DEFAULT_PAUSE_MIN;
            self.pause_max = DEFAULT_PAUSE_MAX;
        }
        if self.pause_min > self.pause_max {
            warn!("Pause bounds inverted, swapping {} and {}", self.pause_min, self.pause_max);
            std::mem::swap(&mut self.pause_min, &mut self.pause_max);
        }
        // An arrival must always hold the pet for at least one tick.
        let shortest = self.tick_seconds();
        if self.pause_min < shortest {
            warn!("Pause minimum {} below one tick, using {}", self.pause_min, shortest);
            self.pause_min = shortest;
            self.pause_max = self.pause_max.max(shortest);
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("sprite", "source", Some(self.source.clone()));
        config.set("sprite", "scale", Some(self.scale.to_string()));

        config.set("motion", "tick_ms", Some(self.tick_ms.to_string()));
        config.set("motion", "max_speed", Some(self.max_speed.to_string()));
        config.set("motion", "walk_speed", Some(self.walk_speed.to_string()));
        config.set("motion", "accel", Some(self.accel.to_string()));
        config.set("motion", "edge_margin", Some(self.edge_margin.to_string()));
        config.set("motion", "pause_min", Some(self.pause_min.to_string()));
        config.set("motion", "pause_max", Some(self.pause_max.to_string()));

        config.set("bob", "amplitude", Some(self.bob_amplitude.to_string()));
        config.set("bob", "step", Some(self.bob_step.to_string()));

        config.set("bounce", "height", Some(self.bounce_height.to_string()));
        config.set("bounce", "duration_ms", Some(self.bounce_duration_ms.to_string()));
        config.set("bounce", "easing", Some(self.bounce_easing.name().to_string()));

        config.set("screen", "raise", Some(self.raise.to_string()));
        config.set("screen", "taskbar_height", Some(self.taskbar_height.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
