//! Screen layout resource.
//!
//! Snapshot of the monitor geometry the pet walks along: full screen size,
//! the bottom edge of the usable (non-taskbar) area and the taskbar
//! thickness. Re-queried every tick by
//! [`refresh_screen_layout`](crate::systems::layout::refresh_screen_layout)
//! since the geometry can change while the pet runs.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Full screen width in pixels.
    pub screen_w: i32,
    /// Full screen height in pixels.
    pub screen_h: i32,
    /// Last pixel row of the usable area.
    pub usable_bottom: i32,
    /// Taskbar thickness in pixels.
    pub taskbar_h: i32,
}

/// Allowed range for the sprite's left edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Track {
    pub min_x: f32,
    pub max_x: f32,
}

impl Track {
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min_x, self.max_x)
    }

    pub fn contains(&self, x: f32) -> bool {
        (self.min_x..=self.max_x).contains(&x)
    }

    pub fn midpoint(&self) -> f32 {
        (self.min_x + self.max_x) / 2.0
    }
}

impl ScreenLayout {
    /// Layout of a `screen_w`x`screen_h` monitor with a bottom taskbar.
    pub fn new(screen_w: i32, screen_h: i32, taskbar_h: i32) -> Self {
        let taskbar_h = taskbar_h.clamp(0, screen_h.max(0));
        Self {
            screen_w,
            screen_h,
            usable_bottom: screen_h - taskbar_h - 1,
            taskbar_h,
        }
    }

    /// Horizontal range that keeps a `sprite_w` wide sprite `edge_margin`
    /// pixels away from both screen edges. Collapses onto the left bound when
    /// the screen is too narrow.
    pub fn track(&self, sprite_w: u32, edge_margin: u32) -> Track {
        let min_x = edge_margin as f32;
        let max_x = (self.screen_w as f32 - sprite_w as f32 - edge_margin as f32).max(min_x);
        Track { min_x, max_x }
    }

    /// Resting y of the sprite: centred on the taskbar when it is taller than
    /// the sprite, otherwise on the usable-area bottom, then shifted by
    /// `raise` (negative lifts it up).
    pub fn y_base(&self, sprite_h: u32, raise: i32) -> f32 {
        let centring = ((self.taskbar_h - sprite_h as i32) / 2).max(0);
        (self.usable_bottom + centring + raise) as f32
    }
}
