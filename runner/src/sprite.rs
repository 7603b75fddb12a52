//! Run-cycle sprite frames, decoded from an animated gif.
//!
//! Every frame is pre-scaled to the player's 40×40 cell at load time; the
//! slide squash happens at blit time.  A missing or unreadable gif falls
//! back to a built-in placeholder cycle so the game still runs.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;

use anyhow::Context;
use image::codecs::gif::GifDecoder;
use image::imageops::{self, FilterType};
use image::{AnimationDecoder, RgbaImage};

/// Side length of the player sprite cell.
pub const SPRITE_SIZE: usize = 40;

// ════════════════════════════════════════════════════════════════════════════
// SpriteSheet
// ════════════════════════════════════════════════════════════════════════════

/// The run-cycle animation: one ARGB buffer of `SPRITE_SIZE²` pixels per
/// gif frame.
pub struct SpriteSheet {
    frames: Vec<Vec<u32>>,
}

impl SpriteSheet {
    /// Load the gif at `path`, or fall back to the placeholder cycle with a
    /// warning.  The game never refuses to start over a missing asset.
    pub fn load(path: &Path) -> SpriteSheet {
        match File::open(path) {
            Ok(file) => match SpriteSheet::from_gif(BufReader::new(file)) {
                Ok(sheet) => {
                    log::info!("loaded {} sprite frames from {:?}", sheet.len(), path);
                    sheet
                }
                Err(e) => {
                    log::warn!("could not decode {:?} ({:#}); using placeholder frames", path, e);
                    SpriteSheet::placeholder()
                }
            },
            Err(e) => {
                log::warn!("no sprite gif at {:?} ({}); using placeholder frames", path, e);
                SpriteSheet::placeholder()
            }
        }
    }

    /// Decode all frames of an animated gif, scaling each to the sprite
    /// cell.  A decode error mid-stream ends collection; the frames
    /// gathered so far are kept.
    pub fn from_gif<R: BufRead + Seek>(reader: R) -> anyhow::Result<SpriteSheet> {
        let decoder = GifDecoder::new(reader).context("not a readable gif")?;
        let mut frames = Vec::new();
        for frame in decoder.into_frames() {
            let frame = match frame {
                Ok(f) => f,
                Err(e) => {
                    log::debug!("gif ended after {} frames: {}", frames.len(), e);
                    break;
                }
            };
            frames.push(to_cell(&frame.into_buffer()));
        }
        if frames.is_empty() {
            anyhow::bail!("gif contained no frames");
        }
        Ok(SpriteSheet { frames })
    }

    /// Built-in two-tone runner with alternating leg positions.
    pub fn placeholder() -> SpriteSheet {
        let frames = (0..4).map(placeholder_frame).collect();
        SpriteSheet { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame `idx` of the cycle (wraps, so any index is safe).
    pub fn frame(&self, idx: usize) -> &[u32] {
        &self.frames[idx % self.frames.len()]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

/// Scale an rgba frame to the sprite cell and pack into ARGB.
fn to_cell(img: &RgbaImage) -> Vec<u32> {
    let scaled = imageops::resize(
        img,
        SPRITE_SIZE as u32,
        SPRITE_SIZE as u32,
        FilterType::Nearest,
    );
    scaled
        .pixels()
        .map(|p| {
            let [r, g, b, a] = p.0;
            ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
        })
        .collect()
}

/// One placeholder frame: torso + head, legs swapping with `phase`.
fn placeholder_frame(phase: usize) -> Vec<u32> {
    const BODY: u32 = 0xFF2E86DE;
    const HEAD: u32 = 0xFFF5CBA7;
    const LEG:  u32 = 0xFF1B4F72;

    let mut buf = vec![0u32; SPRITE_SIZE * SPRITE_SIZE];
    let mut fill = |x0: usize, y0: usize, w: usize, h: usize, color: u32| {
        for y in y0..(y0 + h).min(SPRITE_SIZE) {
            for x in x0..(x0 + w).min(SPRITE_SIZE) {
                buf[y * SPRITE_SIZE + x] = color;
            }
        }
    };

    fill(14, 2, 12, 10, HEAD);
    fill(12, 12, 16, 16, BODY);
    // Legs alternate between two stances.
    if phase % 2 == 0 {
        fill(12, 28, 6, 12, LEG);
        fill(24, 28, 6, 10, LEG);
    } else {
        fill(14, 28, 6, 10, LEG);
        fill(22, 28, 6, 12, LEG);
    }
    buf
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
