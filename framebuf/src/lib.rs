//! # framebuf
//!
//! Software-rendered ARGB framebuffer shared by the pad window and the game
//! window.  Everything is direct pixel writes into a `Vec<u32>` suitable for
//! `minifb::Window::update_with_buffer`; no GPU, no asset pipeline.
//!
//! * [`Rect`] — integer rectangle with the overlap test used for collision.
//! * [`Frame`] — the pixel buffer with fill/border/circle/blit/label helpers.
//! * [`blend`] — ARGB linear interpolation, used for semi-transparent overlays.

pub mod font;
pub mod frame;
pub mod rect;

pub use frame::{blend, Frame};
pub use rect::Rect;
