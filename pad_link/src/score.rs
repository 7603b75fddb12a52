//! Persisted high score — a single non-negative integer in a text file.
//!
//! Read once at game startup; rewritten only when a round ends with a score
//! strictly above the stored value.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write high score to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// File-backed high-score store.
#[derive(Clone, Debug)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        ScoreStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored high score.  A missing or malformed file is a fresh
    /// start: zero.
    pub fn load(&self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(text) => match text.trim().parse::<u32>() {
                Ok(n) => n,
                Err(_) => {
                    log::warn!("high-score file {:?} is malformed; starting from 0", self.path);
                    0
                }
            },
            Err(e) => {
                log::debug!("no high-score file at {:?} ({}); starting from 0", self.path, e);
                0
            }
        }
    }

    /// Overwrite the stored high score.
    pub fn save(&self, score: u32) -> Result<(), StoreError> {
        fs::write(&self.path, score.to_string()).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn temp_store(tag: &str) -> ScoreStore {
        static SEQ: AtomicUsize = AtomicUsize::new(0);
        let n = SEQ.fetch_add(1, Ordering::Relaxed);
        ScoreStore::new(
            std::env::temp_dir().join(format!("pad_score_{}_{}_{}", tag, std::process::id(), n)),
        )
    }

    #[test]
    fn missing_file_loads_zero() {
        assert_eq!(temp_store("missing").load(), 0);
    }

    #[test]
    fn save_then_load() {
        let store = temp_store("rt");
        store.save(42).unwrap();
        assert_eq!(store.load(), 42);
        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn malformed_file_loads_zero() {
        let store = temp_store("bad");
        fs::write(store.path(), "forty-two").unwrap();
        assert_eq!(store.load(), 0);
        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn save_overwrites() {
        let store = temp_store("ow");
        store.save(7).unwrap();
        store.save(19).unwrap();
        assert_eq!(store.load(), 19);
        let _ = fs::remove_file(store.path());
    }
}
