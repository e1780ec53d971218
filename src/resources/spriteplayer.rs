//! Display-side playback of the prepared animations.
//!
//! [`SpritePlayer`] owns one texture per frame for both facings and a
//! [`PlaybackCursor`] that walks the per-frame durations. It is owned by the
//! main loop next to the raylib thread token and drawn by
//! [`render_pet`](crate::systems::render::render_pet).
//!
//! Switching facing restarts the newly selected sequence at frame 0, so a
//! frame of the wrong orientation is never shown.

use raylib::prelude::*;

use crate::components::facing::Facing;
use crate::spriteprep::{PreparedSprites, SpriteFrame, decode_frames};

/// Position within a looping sequence of frames.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlaybackCursor {
    pub frame: usize,
    pub elapsed_ms: f32,
}

impl PlaybackCursor {
    pub fn restart(&mut self) {
        self.frame = 0;
        self.elapsed_ms = 0.0;
    }

    /// Advance by `dt_ms`, wrapping past the last frame.
    pub fn advance(&mut self, delays_ms: &[u32], dt_ms: f32) {
        if delays_ms.is_empty() {
            return;
        }
        self.frame %= delays_ms.len();
        self.elapsed_ms += dt_ms.max(0.0);
        loop {
            let delay = delays_ms[self.frame].max(1) as f32;
            if self.elapsed_ms < delay {
                break;
            }
            self.elapsed_ms -= delay;
            self.frame = (self.frame + 1) % delays_ms.len();
        }
    }
}

/// Uploaded frames of one facing.
pub struct SpriteSequence {
    pub textures: Vec<Texture2D>,
    pub delays_ms: Vec<u32>,
}

pub struct SpritePlayer {
    right: SpriteSequence,
    left: SpriteSequence,
    active: Facing,
    cursor: PlaybackCursor,
}

impl SpritePlayer {
    /// Decode both prepared animations and upload every frame to the GPU.
    pub fn load(
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        prepared: &PreparedSprites,
        facing: Facing,
    ) -> Result<Self, String> {
        let right = upload_sequence(rl, thread, &prepared.right)?;
        let left = upload_sequence(rl, thread, &prepared.left)?;
        Ok(Self {
            right,
            left,
            active: facing,
            cursor: PlaybackCursor::default(),
        })
    }

    /// Switch to the sequence for `facing`, restarting it if it changed.
    pub fn select(&mut self, facing: Facing) {
        if facing != self.active {
            self.active = facing;
            self.cursor.restart();
        }
    }

    pub fn advance(&mut self, dt_ms: f32) {
        let delays = match self.active {
            Facing::Right => &self.right.delays_ms,
            Facing::Left => &self.left.delays_ms,
        };
        self.cursor.advance(delays, dt_ms);
    }

    pub fn current_texture(&self) -> Option<&Texture2D> {
        let sequence = match self.active {
            Facing::Right => &self.right,
            Facing::Left => &self.left,
        };
        sequence.textures.get(self.cursor.frame)
    }
}

fn upload_sequence(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    bytes: &[u8],
) -> Result<SpriteSequence, String> {
    let frames = decode_frames(bytes).map_err(|e| e.to_string())?;
    let mut textures = Vec::with_capacity(frames.len());
    let mut delays_ms = Vec::with_capacity(frames.len());
    for frame in &frames {
        let image = frame_to_image(frame);
        let texture = rl
            .load_texture_from_image(thread, &image)
            .map_err(|e| format!("Failed to upload sprite frame: {}", e))?;
        textures.push(texture);
        delays_ms.push(frame.delay_ms);
    }
    Ok(SpriteSequence {
        textures,
        delays_ms,
    })
}

fn frame_to_image(frame: &SpriteFrame) -> Image {
    let mut image = Image::gen_image_color(frame.width() as i32, frame.height() as i32, Color::BLANK);
    for (x, y, px) in frame.image.enumerate_pixels() {
        image.draw_pixel(x as i32, y as i32, Color::new(px[0], px[1], px[2], px[3]));
    }
    image
}
