//! Screen layout refresh.
//!
//! Re-reads the current monitor geometry from raylib every tick and updates
//! [`ScreenLayout`] when it changed (resolution switch, monitor hop).

use bevy_ecs::prelude::*;
use log::info;
use raylib::ffi;

use crate::resources::petconfig::PetConfig;
use crate::resources::screenlayout::ScreenLayout;

/// Geometry of the monitor the pet window is on.
///
/// Requires an initialized raylib window.
pub fn query_screen_layout(config: &PetConfig) -> ScreenLayout {
    let (width, height) = unsafe {
        let monitor = ffi::GetCurrentMonitor();
        (ffi::GetMonitorWidth(monitor), ffi::GetMonitorHeight(monitor))
    };
    ScreenLayout::new(width, height, config.taskbar_height as i32)
}

pub fn refresh_screen_layout(mut layout: ResMut<ScreenLayout>, config: Res<PetConfig>) {
    let fresh = query_screen_layout(&config);
    if *layout != fresh {
        info!(
            "Screen layout changed: {}x{} -> {}x{} (taskbar {}px)",
            layout.screen_w, layout.screen_h, fresh.screen_w, fresh.screen_h, fresh.taskbar_h
        );
        *layout = fresh;
    }
}
