//! Sprite asset preparation.
//!
//! Runs once at startup. Loads an animated GIF, optionally downscales every
//! frame with nearest-neighbour sampling, builds a horizontally mirrored copy
//! and re-encodes both as standalone looping GIF byte-streams:
//!
//! - the original (scaled) sequence is the right-facing animation
//! - the mirrored sequence is the left-facing animation
//!
//! Both outputs share the same frame size and per-frame durations. Each frame
//! is disposed to the background before the next one is drawn so transparent
//! regions never show the previous frame.
//!
//! [`find_sprite_source`] implements the lookup used when no path is given on
//! the command line.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::gif::GifDecoder;
use image::imageops::{self, FilterType};
use image::{AnimationDecoder, RgbaImage};
use log::{debug, info};
use thiserror::Error;

/// Frame delay used when the source does not specify one.
const DEFAULT_FRAME_DELAY_MS: u32 = 100;
/// Smallest width/height a scaled frame may shrink to.
const MIN_FRAME_DIM: u32 = 4;
/// Quantization speed handed to the GIF encoder (1 = best, 30 = fastest).
const ENCODE_SPEED: i32 = 10;

/// Errors produced while preparing sprite animations.
#[derive(Debug, Error)]
pub enum PrepError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode animation: {0}")]
    Decode(#[from] image::ImageError),
    #[error("no frames found in animation")]
    NoFrames,
    #[error("frame size {0}x{1} exceeds the GIF size limit")]
    TooLarge(u32, u32),
    #[error("failed to encode animation: {0}")]
    Encode(#[from] gif::EncodingError),
}

/// A single decoded RGBA frame and how long it stays on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteFrame {
    pub image: RgbaImage,
    pub delay_ms: u32,
}

impl SpriteFrame {
    pub fn new(image: RgbaImage, delay_ms: u32) -> Self {
        Self { image, delay_ms }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// The two encoded animations plus their common frame size.
#[derive(Debug, Clone)]
pub struct PreparedSprites {
    /// Looping GIF facing right (the source orientation).
    pub right: Vec<u8>,
    /// Looping GIF facing left (mirrored).
    pub left: Vec<u8>,
    /// Frame width after scaling.
    pub width: u32,
    /// Frame height after scaling.
    pub height: u32,
    /// Number of frames in each sequence.
    pub frame_count: usize,
}

impl PreparedSprites {
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Decode every frame of a GIF into full-canvas RGBA images.
pub fn decode_frames(bytes: &[u8]) -> Result<Vec<SpriteFrame>, PrepError> {
    let decoder = GifDecoder::new(Cursor::new(bytes))?;
    let frames = decoder.into_frames().collect_frames()?;
    if frames.is_empty() {
        return Err(PrepError::NoFrames);
    }
    Ok(frames
        .into_iter()
        .map(|frame| {
            let (numer, denom) = frame.delay().numer_denom_ms();
            let delay_ms = if denom == 0 { 0 } else { numer / denom };
            let delay_ms = if delay_ms == 0 {
                DEFAULT_FRAME_DELAY_MS
            } else {
                delay_ms
            };
            SpriteFrame::new(frame.into_buffer(), delay_ms)
        })
        .collect())
}

/// Target size of a frame scaled by `scale`, never below 4x4.
pub fn scaled_size(width: u32, height: u32, scale: f32) -> (u32, u32) {
    let dim = |d: u32| ((d as f32 * scale).round() as u32).max(MIN_FRAME_DIM);
    (dim(width), dim(height))
}

/// Resize every frame with nearest-neighbour sampling.
///
/// A scale of exactly 1.0 returns the frames untouched.
pub fn scale_frames(frames: Vec<SpriteFrame>, scale: f32) -> Vec<SpriteFrame> {
    if scale == 1.0 {
        return frames;
    }
    frames
        .into_iter()
        .map(|frame| {
            let (w, h) = scaled_size(frame.width(), frame.height(), scale);
            let image = imageops::resize(&frame.image, w, h, FilterType::Nearest);
            SpriteFrame::new(image, frame.delay_ms)
        })
        .collect()
}

/// Horizontally flipped copy of every frame.
pub fn mirror_frames(frames: &[SpriteFrame]) -> Vec<SpriteFrame> {
    frames
        .iter()
        .map(|frame| SpriteFrame::new(imageops::flip_horizontal(&frame.image), frame.delay_ms))
        .collect()
}

/// Encode frames as an infinitely looping GIF.
///
/// The logical screen takes the size of the first frame.
pub fn encode_animation(frames: &[SpriteFrame]) -> Result<Vec<u8>, PrepError> {
    let first = frames.first().ok_or(PrepError::NoFrames)?;
    let (width, height) = gif_dims(first.width(), first.height())?;

    let mut out = Vec::new();
    {
        let mut encoder = gif::Encoder::new(&mut out, width, height, &[])?;
        encoder.set_repeat(gif::Repeat::Infinite)?;
        for frame in frames {
            let (w, h) = gif_dims(frame.width(), frame.height())?;
            let mut pixels = frame.image.as_raw().clone();
            let mut gif_frame = gif::Frame::from_rgba_speed(w, h, &mut pixels, ENCODE_SPEED);
            // GIF delays are in hundredths of a second.
            gif_frame.delay = ((frame.delay_ms as f32 / 10.0).round() as u16).max(1);
            gif_frame.dispose = gif::DisposalMethod::Background;
            encoder.write_frame(&gif_frame)?;
        }
    }
    Ok(out)
}

fn gif_dims(width: u32, height: u32) -> Result<(u16, u16), PrepError> {
    match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(PrepError::TooLarge(width, height)),
    }
}

/// Build the right- and left-facing animations from GIF bytes.
pub fn prepare_from_bytes(bytes: &[u8], scale: f32) -> Result<PreparedSprites, PrepError> {
    let frames = decode_frames(bytes)?;
    let (src_w, src_h) = (frames[0].width(), frames[0].height());
    let frames = scale_frames(frames, scale);
    let (width, height) = (frames[0].width(), frames[0].height());
    debug!(
        "Scaled {} frames from {}x{} to {}x{} (scale {})",
        frames.len(),
        src_w,
        src_h,
        width,
        height,
        scale
    );

    let right = encode_animation(&frames)?;
    let left = encode_animation(&mirror_frames(&frames))?;

    Ok(PreparedSprites {
        right,
        left,
        width,
        height,
        frame_count: frames.len(),
    })
}

/// Read a GIF from disk and prepare both facings. The file is only read.
pub fn prepare_from_path(path: &Path, scale: f32) -> Result<PreparedSprites, PrepError> {
    let bytes = std::fs::read(path).map_err(|source| PrepError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let prepared = prepare_from_bytes(&bytes, scale)?;
    info!(
        "Prepared {} frames ({}x{}) from {}",
        prepared.frame_count,
        prepared.width,
        prepared.height,
        path.display()
    );
    Ok(prepared)
}

/// Locate the sprite to use when none was given explicitly.
///
/// Returns `dir/preferred` when it exists, otherwise the first `.gif` file in
/// `dir` by sorted path, otherwise `None`.
pub fn find_sprite_source(dir: &Path, preferred: &str) -> Option<PathBuf> {
    if !preferred.is_empty() {
        let preferred = dir.join(preferred);
        if preferred.is_file() {
            return Some(preferred);
        }
    }
    let mut gifs: Vec<PathBuf> = std::fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("gif"))
        })
        .collect();
    gifs.sort();
    gifs.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    /// Frame with a red left half and a transparent right half.
    fn half_red(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, _| if x < w / 2 { RED } else { CLEAR })
    }

    fn gif_bytes(frames: &[(RgbaImage, u32)]) -> Vec<u8> {
        let frames: Vec<SpriteFrame> = frames
            .iter()
            .map(|(img, delay)| SpriteFrame::new(img.clone(), *delay))
            .collect();
        encode_animation(&frames).unwrap()
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wanderpet-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_scaled_size_rounds_and_floors_at_four() {
        assert_eq!(scaled_size(100, 100, 0.9), (90, 90));
        assert_eq!(scaled_size(64, 32, 0.5), (32, 16));
        assert_eq!(scaled_size(10, 10, 0.25), (4, 4));
        assert_eq!(scaled_size(3, 200, 1.0), (4, 200));
        assert_eq!(scaled_size(33, 33, 0.5), (17, 17));
    }

    #[test]
    fn test_scaled_size_matches_resize_for_several_factors() {
        for scale in [0.1_f32, 0.33, 0.5, 0.75, 0.9] {
            let frames = vec![SpriteFrame::new(half_red(48, 20), 80)];
            let scaled = scale_frames(frames, scale);
            let expected = scaled_size(48, 20, scale);
            assert_eq!((scaled[0].width(), scaled[0].height()), expected, "scale {}", scale);
            assert_eq!(scaled[0].delay_ms, 80);
        }
    }

    #[test]
    fn test_scale_of_one_is_identity() {
        let frames = vec![SpriteFrame::new(half_red(7, 5), 40)];
        let scaled = scale_frames(frames.clone(), 1.0);
        assert_eq!(scaled, frames);
    }

    #[test]
    fn test_mirror_flips_pixels_horizontally() {
        let frames = vec![SpriteFrame::new(half_red(8, 2), 50)];
        let mirrored = mirror_frames(&frames);
        assert_eq!(*mirrored[0].image.get_pixel(0, 0), CLEAR);
        assert_eq!(*mirrored[0].image.get_pixel(7, 1), RED);
        assert_eq!(mirrored[0].delay_ms, 50);
    }

    #[test]
    fn test_mirror_twice_restores_original() {
        let img = RgbaImage::from_fn(9, 4, |x, y| Rgba([x as u8 * 20, y as u8 * 40, 7, 255]));
        let frames = vec![SpriteFrame::new(img, 30), SpriteFrame::new(half_red(9, 4), 60)];
        let twice = mirror_frames(&mirror_frames(&frames));
        assert_eq!(twice, frames);
    }

    #[test]
    fn test_decode_reports_invalid_bytes() {
        let err = decode_frames(b"definitely not a gif").unwrap_err();
        assert!(matches!(err, PrepError::Decode(_)));
    }

    #[test]
    fn test_decode_reports_animation_without_frames() {
        let mut out = Vec::new();
        {
            let _encoder = gif::Encoder::new(&mut out, 10, 10, &[]).unwrap();
        }
        let err = decode_frames(&out).unwrap_err();
        assert!(matches!(err, PrepError::NoFrames));
    }

    #[test]
    fn test_encode_rejects_empty_sequence() {
        assert!(matches!(encode_animation(&[]), Err(PrepError::NoFrames)));
    }

    #[test]
    fn test_encode_sets_background_disposal_and_delays() {
        let bytes = gif_bytes(&[(half_red(6, 6), 120), (half_red(6, 6), 40)]);

        let mut options = gif::DecodeOptions::new();
        options.set_color_output(gif::ColorOutput::RGBA);
        let mut decoder = options.read_info(Cursor::new(&bytes)).unwrap();
        let mut seen = Vec::new();
        while let Some(frame) = decoder.read_next_frame().unwrap() {
            assert_eq!(frame.dispose, gif::DisposalMethod::Background);
            seen.push(frame.delay);
        }
        assert_eq!(seen, vec![12, 4]);
    }

    #[test]
    fn test_decode_keeps_durations_and_transparency() {
        let bytes = gif_bytes(&[(half_red(10, 4), 70), (half_red(10, 4), 150)]);
        let frames = decode_frames(&bytes).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].delay_ms, 70);
        assert_eq!(frames[1].delay_ms, 150);
        assert_eq!(frames[0].image.get_pixel(0, 0)[3], 255);
        assert_eq!(frames[0].image.get_pixel(9, 0)[3], 0);
    }

    #[test]
    fn test_prepare_three_frames_at_ninety_percent() {
        let source = gif_bytes(&[
            (half_red(100, 100), 100),
            (RgbaImage::from_pixel(100, 100, BLUE), 100),
            (half_red(100, 100), 200),
        ]);
        let prepared = prepare_from_bytes(&source, 0.9).unwrap();
        assert_eq!(prepared.size(), (90, 90));
        assert_eq!(prepared.frame_count, 3);

        let right = decode_frames(&prepared.right).unwrap();
        let left = decode_frames(&prepared.left).unwrap();
        assert_eq!(right.len(), 3);
        assert_eq!(left.len(), 3);
        for frame in right.iter().chain(left.iter()) {
            assert_eq!((frame.width(), frame.height()), (90, 90));
        }
        assert_eq!(right[2].delay_ms, 200);
        assert_eq!(left[2].delay_ms, 200);

        // Right keeps the opaque half on the left, left-facing mirrors it.
        assert_eq!(right[0].image.get_pixel(0, 45)[3], 255);
        assert_eq!(right[0].image.get_pixel(89, 45)[3], 0);
        assert_eq!(left[0].image.get_pixel(0, 45)[3], 0);
        assert_eq!(left[0].image.get_pixel(89, 45)[3], 255);
    }

    #[test]
    fn test_prepare_from_missing_path_is_io_error() {
        let dir = temp_dir("missing");
        let err = prepare_from_path(&dir.join("nope.gif"), 1.0).unwrap_err();
        assert!(matches!(err, PrepError::Io { .. }));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_prepare_from_path_leaves_source_untouched() {
        let dir = temp_dir("untouched");
        let path = dir.join("pet.gif");
        let bytes = gif_bytes(&[(half_red(20, 20), 100)]);
        std::fs::write(&path, &bytes).unwrap();

        let prepared = prepare_from_path(&path, 0.5).unwrap();
        assert_eq!(prepared.size(), (10, 10));
        assert_eq!(std::fs::read(&path).unwrap(), bytes);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_find_prefers_named_file() {
        let dir = temp_dir("prefer");
        std::fs::write(dir.join("a.gif"), b"x").unwrap();
        std::fs::write(dir.join("dino.gif"), b"x").unwrap();
        assert_eq!(find_sprite_source(&dir, "dino.gif"), Some(dir.join("dino.gif")));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_find_falls_back_to_first_sorted_gif() {
        let dir = temp_dir("sorted");
        std::fs::write(dir.join("zebra.gif"), b"x").unwrap();
        std::fs::write(dir.join("Apple.GIF"), b"x").unwrap();
        std::fs::write(dir.join("notes.txt"), b"x").unwrap();
        assert_eq!(find_sprite_source(&dir, "dino.gif"), Some(dir.join("Apple.GIF")));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_find_returns_none_without_gifs() {
        let dir = temp_dir("empty");
        std::fs::write(dir.join("readme.md"), b"x").unwrap();
        assert_eq!(find_sprite_source(&dir, "dino.gif"), None);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
