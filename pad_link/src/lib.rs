//! # pad_link
//!
//! The shared intent channel between the gesture reader (`gesture_pad`) and
//! the runner game (`runner`), plus the persisted high-score store.
//!
//! ## Command flow
//!
//! ```text
//! gesture_pad ──▶ CommandSink ──▶ (file | mailbox) ──▶ CommandSource ──▶ runner
//! ```
//!
//! A [`Command`] is one of NONE / JUMP / SLIDE / LEFT / RIGHT.  Transport is
//! last-write-wins with a single writer and a single reader:
//!
//! * [`channel::FileChannel`] — a plain-text file overwritten wholesale on
//!   each send, polled wholesale on each read.  This is the cross-process
//!   transport; a missing or garbled file reads as `Command::None`.
//! * [`channel::Mailbox`] — a lock-free single-slot atomic cell for running
//!   both loops inside one process (and for tests).  Same semantics, no
//!   read/write race.
//!
//! The writer only sends while a pad button is actively selected; it never
//! clears back to NONE, so the last command persists until overwritten.

pub mod channel;
pub mod command;
pub mod score;

pub use channel::{ChannelError, CommandSink, CommandSource, FileChannel, Mailbox};
pub use command::Command;
pub use score::{ScoreStore, StoreError};
