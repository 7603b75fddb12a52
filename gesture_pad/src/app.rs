//! Top-level pad application: wires a hand source, the d-pad hit test, the
//! command sink, and the window into one loop.

use std::path::PathBuf;
use std::sync::mpsc::{self, TryRecvError};

use pad_link::{ChannelError, Command, CommandSink, FileChannel};

use crate::hand::{spawn_hand_source, HandEvent, SimHandSource};
use crate::pad::{DPad, PadButton};
use crate::view::{PadWindow, WIN_H, WIN_W};

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

pub struct AppConfig {
    /// Where selected commands are published.
    pub command_path: PathBuf,
    /// Use the real webcam (requires the `camera` feature).
    pub use_camera: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            command_path: PathBuf::from("gesture.txt"),
            use_camera:   false,
        }
    }
}

impl AppConfig {
    /// `[--camera] [COMMAND_FILE]`
    pub fn from_args<I: Iterator<Item = String>>(args: I) -> Self {
        let mut cfg = AppConfig::default();
        for arg in args {
            if arg == "--camera" {
                cfg.use_camera = true;
            } else {
                cfg.command_path = PathBuf::from(arg);
            }
        }
        cfg
    }
}

// ════════════════════════════════════════════════════════════════════════════
// PadApp — per-frame state
// ════════════════════════════════════════════════════════════════════════════

/// The pad's frame-to-frame state: latest fingertip, active button, and the
/// last command actually published.
pub struct PadApp {
    pub pad:       DPad,
    pub finger:    Option<(f32, f32)>,
    pub active:    Option<PadButton>,
    pub last_sent: Command,
}

impl PadApp {
    pub fn new(win_w: usize, win_h: usize) -> Self {
        PadApp {
            pad:       DPad::anchored(win_w, win_h),
            finger:    None,
            active:    None,
            last_sent: Command::None,
        }
    }

    /// Fold one hand event into the fingertip state.
    pub fn observe(&mut self, event: HandEvent) {
        match event {
            HandEvent::Finger { x, y } => self.finger = Some((x, y)),
            HandEvent::Lost            => self.finger = None,
            HandEvent::Quit            => {} // handled by the run loop
        }
    }

    /// Hit-test the current fingertip and, if a button is active, publish
    /// its command.  No button active means nothing is written: the last
    /// published command stays current for the reader.
    pub fn publish(&mut self, sink: &impl CommandSink) -> Result<Option<Command>, ChannelError> {
        self.active = self.finger.and_then(|(fx, fy)| self.pad.hit_test(fx, fy));
        match self.active {
            Some(button) => {
                let cmd = button.command();
                sink.send(cmd)?;
                self.last_sent = cmd;
                Ok(Some(cmd))
            }
            None => Ok(None),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the pad.  Creates the window, the hand source (simulation by
/// default, webcam with `--camera` under the `camera` feature), and drives
/// the poll/publish/render loop.
pub fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let (sim_tx, sim_rx) = mpsc::channel();

    #[cfg(feature = "camera")]
    let hand_rx = if cfg.use_camera {
        drop(sim_rx);
        spawn_hand_source(crate::hand::CameraHandSource {
            device: 0,
            win_w:  WIN_W,
            win_h:  WIN_H,
        })
    } else {
        spawn_hand_source(SimHandSource { rx: sim_rx })
    };

    #[cfg(not(feature = "camera"))]
    let hand_rx = {
        if cfg.use_camera {
            log::warn!("--camera requested but the `camera` feature is off; using the mouse");
        }
        spawn_hand_source(SimHandSource { rx: sim_rx })
    };

    let sink = FileChannel::new(&cfg.command_path);
    let mut window = PadWindow::new(sim_tx)?;
    let mut app = PadApp::new(WIN_W, WIN_H);

    log::info!("publishing commands to {:?}", cfg.command_path);

    while window.is_open() {
        if !window.poll_input() {
            break;
        }

        // Drain hand events, keeping only the freshest fingertip.
        loop {
            match hand_rx.try_recv() {
                Ok(HandEvent::Quit) => return Ok(()),
                Ok(event) => app.observe(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Ok(()),
            }
        }

        if let Err(e) = app.publish(&sink) {
            log::warn!("dropping command: {}", e);
        }

        window.render(&app.pad, app.finger, app.active, app.last_sent);
    }

    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use pad_link::{CommandSource, Mailbox};

    fn app() -> PadApp {
        PadApp::new(WIN_W, WIN_H)
    }

    #[test]
    fn fingertip_on_up_button_publishes_jump() {
        let mut app = app();
        let mb = Mailbox::new();
        let (bx, by) = app.pad.button_center(PadButton::Up);

        app.observe(HandEvent::Finger { x: bx, y: by });
        assert_eq!(app.publish(&mb).unwrap(), Some(Command::Jump));
        assert_eq!(mb.latest(), Command::Jump);
        assert_eq!(app.active, Some(PadButton::Up));
    }

    #[test]
    fn far_fingertip_publishes_nothing() {
        let mut app = app();
        let mb = Mailbox::new();

        app.observe(HandEvent::Finger { x: 5.0, y: 5.0 });
        assert_eq!(app.publish(&mb).unwrap(), None);
        assert_eq!(mb.latest(), Command::None);
        assert_eq!(app.active, None);
    }

    #[test]
    fn lost_hand_leaves_previous_command_in_place() {
        let mut app = app();
        let mb = Mailbox::new();
        let (bx, by) = app.pad.button_center(PadButton::Right);

        app.observe(HandEvent::Finger { x: bx, y: by });
        app.publish(&mb).unwrap();
        app.observe(HandEvent::Lost);
        app.publish(&mb).unwrap();

        // Nothing cleared the channel; RIGHT is still current.
        assert_eq!(mb.latest(), Command::Right);
        assert_eq!(app.last_sent, Command::Right);
        assert_eq!(app.active, None);
    }

    #[test]
    fn newest_fingertip_wins_within_a_frame() {
        let mut app = app();
        let mb = Mailbox::new();
        let (ux, uy) = app.pad.button_center(PadButton::Up);
        let (dx, dy) = app.pad.button_center(PadButton::Down);

        app.observe(HandEvent::Finger { x: ux, y: uy });
        app.observe(HandEvent::Finger { x: dx, y: dy });
        assert_eq!(app.publish(&mb).unwrap(), Some(Command::Slide));
    }

    #[test]
    fn config_args() {
        let cfg = AppConfig::from_args(
            ["--camera".to_string(), "cmds.txt".to_string()].into_iter(),
        );
        assert!(cfg.use_camera);
        assert_eq!(cfg.command_path, PathBuf::from("cmds.txt"));

        let default = AppConfig::from_args(std::iter::empty());
        assert_eq!(default.command_path, PathBuf::from("gesture.txt"));
        assert!(!default.use_camera);
    }
}
