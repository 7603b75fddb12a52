//! # gesture_pad
//!
//! The gesture-reader half of the pad runner: a fingertip hovering over a
//! virtual four-button directional pad selects a command, which is published
//! through `pad_link` for the game process to poll.
//!
//! ## Button → Command mapping
//!
//! | Button | Position         | Command |
//! |--------|------------------|---------|
//! | U      | above the centre | JUMP    |
//! | D      | below the centre | SLIDE   |
//! | L      | left of centre   | LEFT    |
//! | R      | right of centre  | RIGHT   |
//!
//! A button is active while the fingertip is within 30 px of its centre;
//! when several qualify, the nearest wins.  While no button is active the
//! previously published command stays put — the pad never writes NONE.
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: the mouse cursor plays the fingertip.
//! * `camera` — **Hardware mode**: the default webcam is captured with
//!   OpenCV, each frame is mirrored, and a MediaPipe subprocess reports the
//!   index-fingertip position.
//!
//! ### Keys
//!
//! | Key | Effect |
//! |-----|--------|
//! | `Q` | Quit (releases the capture device in camera mode) |

pub mod app;
pub mod hand;
pub mod pad;
pub mod view;
