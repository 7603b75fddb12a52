//! Command transport — the glue between the two loops.
//!
//! Two interchangeable carriers of the same [`Command`]:
//!
//! * [`FileChannel`] — a single-line text file, overwritten wholesale by the
//!   writer and polled wholesale by the reader.  Works across processes.
//! * [`Mailbox`] — a single-slot atomic cell for in-process wiring and tests.
//!
//! Both are last-write-wins; both read `Command::None` when nothing has been
//! sent yet.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use thiserror::Error;

use crate::command::Command;

// ════════════════════════════════════════════════════════════════════════════
// Traits
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("failed to write command to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The writing end of a command channel.
pub trait CommandSink {
    fn send(&self, cmd: Command) -> Result<(), ChannelError>;
}

/// The reading end of a command channel.
///
/// `latest` is infallible: a channel that cannot be read (missing file,
/// torn write, nothing sent yet) yields `Command::None`.
pub trait CommandSource {
    fn latest(&self) -> Command;
}

// ════════════════════════════════════════════════════════════════════════════
// FileChannel — the cross-process transport
// ════════════════════════════════════════════════════════════════════════════

/// A command channel backed by a plain-text file.
///
/// The writer overwrites the whole file with the command's wire name; the
/// reader re-reads the whole file each poll.  There is no locking: a read
/// that races a write sees at worst empty or partial text, which decodes to
/// `Command::None` and is simply a stale frame.
#[derive(Clone, Debug)]
pub struct FileChannel {
    path: PathBuf,
}

impl FileChannel {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FileChannel { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CommandSink for FileChannel {
    fn send(&self, cmd: Command) -> Result<(), ChannelError> {
        fs::write(&self.path, cmd.wire_name()).map_err(|source| ChannelError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl CommandSource for FileChannel {
    fn latest(&self) -> Command {
        match fs::read_to_string(&self.path) {
            Ok(text) => Command::from_wire(&text),
            Err(e) => {
                log::debug!("command file {:?} unreadable ({}); treating as NONE", self.path, e);
                Command::None
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Mailbox — lock-free single-slot cell
// ════════════════════════════════════════════════════════════════════════════

/// A cloneable single-slot command cell.
///
/// Replaces the file when both loops live in one process: same last-command-
/// wins semantics, no filesystem and no torn reads.  Clones share the slot.
#[derive(Clone, Debug, Default)]
pub struct Mailbox {
    slot: Arc<AtomicU8>,
}

impl Mailbox {
    pub fn new() -> Self {
        Mailbox::default()
    }
}

impl CommandSink for Mailbox {
    fn send(&self, cmd: Command) -> Result<(), ChannelError> {
        self.slot.store(cmd.to_code(), Ordering::Relaxed);
        Ok(())
    }
}

impl CommandSource for Mailbox {
    fn latest(&self) -> Command {
        Command::from_code(self.slot.load(Ordering::Relaxed))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
