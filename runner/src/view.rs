//! The game window — software-rendered with `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────┐
//! │ SCORE: 12            │
//! │ HIGH SCORE: 48       │
//! │                      │
//! │        ▓ player      │
//! │                      │
//! │            ▂ obstacle│
//! └──────────────────────┘
//! ```
//!
//! During the game-over hold the scene is replaced by the final-score card.

use minifb::{Window, WindowOptions};

use anyhow::anyhow;
use framebuf::Frame;

use crate::game::{GameState, PLAY_H, PLAY_W};
use crate::sprite::{SpriteSheet, SPRITE_SIZE};

// ════════════════════════════════════════════════════════════════════════════
// Colors
// ════════════════════════════════════════════════════════════════════════════

const BG_COLOR:       u32 = 0xFF1E1E1E;
const OBSTACLE_COLOR: u32 = 0xFFFFFF00;
const SCORE_COLOR:    u32 = 0xFFFFFFFF;
const HIGH_COLOR:     u32 = 0xFFFFD700;
const OVER_COLOR:     u32 = 0xFFFF0000;

// ════════════════════════════════════════════════════════════════════════════
// GameWindow
// ════════════════════════════════════════════════════════════════════════════

pub struct GameWindow {
    window: Window,
    frame:  Frame,
}

impl GameWindow {
    pub fn new() -> anyhow::Result<Self> {
        let mut window = Window::new(
            "Pad Runner — Gesture Controlled",
            PLAY_W as usize,
            PLAY_H as usize,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| anyhow!("failed to open game window: {}", e))?;

        // The whole state machine is tuned for this cadence.
        window.set_target_fps(15);

        Ok(GameWindow {
            window,
            frame: Frame::new(PLAY_W as usize, PLAY_H as usize, BG_COLOR),
        })
    }

    /// The game exits on window close.
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Render one frame.
    pub fn render(&mut self, state: &GameState, sprites: &SpriteSheet, high_score: u32) {
        self.frame.clear(BG_COLOR);

        if !state.game_over {
            for obs in &state.obstacles {
                self.frame.fill_rect(*obs, OBSTACLE_COLOR);
            }

            self.frame.blit_scaled(
                sprites.frame(state.frame_index),
                SPRITE_SIZE,
                SPRITE_SIZE,
                state.hitbox(),
            );

            let score = format!("SCORE: {}", state.score);
            let high = format!("HIGH SCORE: {}", high_score);
            self.frame.draw_text(&score, 10, 10, SCORE_COLOR, 2);
            self.frame.draw_text(&high, 10, 32, HIGH_COLOR, 2);
        } else {
            let msg = "GAME OVER";
            let x = (PLAY_W - Frame::text_width(msg, 4)) / 2;
            self.frame.draw_text(msg, x, 240, OVER_COLOR, 4);

            let final_score = format!("FINAL SCORE: {}", state.score);
            let x = (PLAY_W - Frame::text_width(&final_score, 2)) / 2;
            self.frame.draw_text(&final_score, x, 290, SCORE_COLOR, 2);

            let high = format!("HIGH SCORE: {}", high_score);
            let x = (PLAY_W - Frame::text_width(&high, 2)) / 2;
            self.frame.draw_text(&high, x, 315, HIGH_COLOR, 2);
        }

        self.window
            .update_with_buffer(&self.frame.buf, PLAY_W as usize, PLAY_H as usize)
            .ok();
    }
}
