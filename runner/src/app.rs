//! Top-level game loop: poll the command channel, step the state machine,
//! settle the high score, render.

use std::path::PathBuf;
use std::time::Instant;

use pad_link::{CommandSource, FileChannel, ScoreStore};

use crate::game::{GameState, StepOutcome};
use crate::sprite::SpriteSheet;
use crate::view::GameWindow;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

pub struct AppConfig {
    /// Command file polled each frame.
    pub command_path: PathBuf,
    /// High-score file.
    pub score_path: PathBuf,
    /// Animated gif for the run cycle.
    pub sprite_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            command_path: PathBuf::from("gesture.txt"),
            score_path:   PathBuf::from("high_score.txt"),
            sprite_path:  PathBuf::from("runner.gif"),
        }
    }
}

impl AppConfig {
    /// `[COMMAND_FILE [SCORE_FILE [SPRITE_GIF]]]`
    pub fn from_args<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut cfg = AppConfig::default();
        if let Some(p) = args.next() {
            cfg.command_path = PathBuf::from(p);
        }
        if let Some(p) = args.next() {
            cfg.score_path = PathBuf::from(p);
        }
        if let Some(p) = args.next() {
            cfg.sprite_path = PathBuf::from(p);
        }
        cfg
    }
}

// ════════════════════════════════════════════════════════════════════════════
// High-score settlement
// ════════════════════════════════════════════════════════════════════════════

/// Update and persist the high score if the round beat it.  Returns true on
/// a new record.  A store write failure keeps the in-memory record and is
/// only logged; the game goes on.
pub fn settle_high_score(store: &ScoreStore, high: &mut u32, final_score: u32) -> bool {
    if final_score > *high {
        *high = final_score;
        if let Err(e) = store.save(*high) {
            log::warn!("could not persist high score: {}", e);
        }
        true
    } else {
        false
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the game until the window closes.
pub fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let sprites = SpriteSheet::load(&cfg.sprite_path);
    let store = ScoreStore::new(&cfg.score_path);
    let mut high_score = store.load();
    let channel = FileChannel::new(&cfg.command_path);

    log::info!(
        "polling {:?}; high score starts at {}",
        cfg.command_path,
        high_score
    );

    let mut window = GameWindow::new()?;
    let mut state = GameState::new();

    while window.is_open() {
        let cmd = channel.latest();

        match state.step(cmd, sprites.len(), Instant::now()) {
            StepOutcome::Running => {}
            StepOutcome::RoundOver { final_score } => {
                if settle_high_score(&store, &mut high_score, final_score) {
                    log::info!("new high score: {}", high_score);
                }
            }
            StepOutcome::ResetDue => {
                state = GameState::new();
            }
        }

        window.render(&state, &sprites, high_score);
    }

    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
