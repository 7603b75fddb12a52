//! # runner
//!
//! The game half of the pad runner: a side-scrolling survival game polled
//! from the gesture command channel each frame.
//!
//! ## Command → Action mapping
//!
//! | Command | Action |
//! |---------|--------|
//! | LEFT    | step 20 px left, clamped to the playfield |
//! | RIGHT   | step 20 px right, clamped to the playfield |
//! | JUMP    | 20-frame eased jump arc (ignored while airborne) |
//! | SLIDE   | 10-frame crouch, height −20 (ignored while sliding) |
//! | NONE    | nothing |
//!
//! Obstacles spawn at the right edge every 100 frames and scroll left at
//! 5 px/frame; touching one ends the round.  Score is survival time
//! (+1 every 5 frames).  After a 2-second game-over hold the round resets;
//! the high score persists through `pad_link::ScoreStore`.

pub mod app;
pub mod game;
pub mod sprite;
pub mod view;
