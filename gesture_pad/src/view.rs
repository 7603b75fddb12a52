//! The pad window — software-rendered with `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │ GESTURE: JUMP                       │
//! │                                     │
//! │              · fingertip dot        │
//! │      (U)                            │
//! │   (L)   (R)   semi-transparent pad  │
//! │      (D)                            │
//! │ point at a button - q quits         │
//! └─────────────────────────────────────┘
//! ```

use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

use anyhow::anyhow;
use framebuf::Frame;
use pad_link::Command;

use crate::hand::SimInput;
use crate::pad::{DPad, PadButton, ALL_BUTTONS, BUTTON_RADIUS};

use std::sync::mpsc::Sender;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W: usize = 640;
pub const WIN_H: usize = 480;

const BG_COLOR:     u32 = 0xFF1A1A2E;
const BUTTON_IDLE:  u32 = 0xFFC8C8C8;
const BUTTON_HOT:   u32 = 0xFF00FF00;
const FINGER_COLOR: u32 = 0xFFFFFF00;
const STATUS_COLOR: u32 = 0xFF00FF00;
const LEGEND_COLOR: u32 = 0xFF888888;
/// Pad overlay opacity over the background.
const PAD_ALPHA: f32 = 0.4;

// ════════════════════════════════════════════════════════════════════════════
// PadWindow
// ════════════════════════════════════════════════════════════════════════════

pub struct PadWindow {
    window: Window,
    frame:  Frame,
    sim_tx: Sender<SimInput>,
}

impl PadWindow {
    pub fn new(sim_tx: Sender<SimInput>) -> anyhow::Result<Self> {
        let mut window = Window::new(
            "Virtual Gamepad Control",
            WIN_W,
            WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| anyhow!("failed to open pad window: {}", e))?;

        window.set_target_fps(30);

        Ok(PadWindow {
            window,
            frame: Frame::new(WIN_W, WIN_H, BG_COLOR),
            sim_tx,
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Poll window input and translate to [`SimInput`] events.
    /// Returns false when the window should close.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() {
            return false;
        }
        if self.window.is_key_pressed(Key::Q, KeyRepeat::No) {
            let _ = self.sim_tx.send(SimInput::Quit);
            return false;
        }
        // The mouse cursor plays the fingertip in simulation mode.  In
        // camera mode nobody listens on this channel, which is fine.
        match self.window.get_mouse_pos(MouseMode::Discard) {
            Some((mx, my)) => {
                let _ = self.sim_tx.send(SimInput::Pointer(mx, my));
            }
            None => {
                let _ = self.sim_tx.send(SimInput::PointerGone);
            }
        }
        true
    }

    /// Render one frame.
    pub fn render(
        &mut self,
        pad: &DPad,
        finger: Option<(f32, f32)>,
        active: Option<PadButton>,
        last_sent: Command,
    ) {
        self.frame.clear(BG_COLOR);

        // ── Pad buttons, blended over the background ──────────────────────
        for button in ALL_BUTTONS {
            let (bx, by) = pad.button_center(button);
            let color = if active == Some(button) { BUTTON_HOT } else { BUTTON_IDLE };
            self.frame
                .blend_circle(bx as i32, by as i32, BUTTON_RADIUS, color, PAD_ALPHA);
            // Centre the one-letter label (3×5 glyph at scale 2).
            self.frame
                .draw_text(button.label(), bx as i32 - 3, by as i32 - 5, 0xFF000000, 2);
        }

        // ── Fingertip marker ──────────────────────────────────────────────
        if let Some((fx, fy)) = finger {
            self.frame.fill_circle(fx as i32, fy as i32, 8, FINGER_COLOR);
        }

        // ── Status line + legend ──────────────────────────────────────────
        let status = format!("GESTURE: {}", last_sent);
        self.frame.draw_text(&status, 10, 10, STATUS_COLOR, 2);
        self.frame.draw_label(
            "POINT AT A BUTTON TO STEER - Q=QUIT",
            10,
            WIN_H as i32 - 14,
            LEGEND_COLOR,
        );

        self.window
            .update_with_buffer(&self.frame.buf, WIN_W, WIN_H)
            .ok();
    }
}
