//! ECS resources made available to systems.
//!
//! Overview
//! - `petconfig` – every tunable of the pet, loaded from an INI file
//! - `screenlayout` – monitor geometry and the derived walking track
//! - `spriteplayer` – uploaded animation frames and the playback cursor
//! - `worldtime` – fixed-step simulation clock
pub mod petconfig;
pub mod screenlayout;
pub mod spriteplayer;
pub mod worldtime;
