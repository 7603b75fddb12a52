//! Fingertip position sources — webcam hand landmarks or mouse simulation.
//!
//! The public interface is [`HandEvent`] delivered over a `mpsc` channel.
//! Consumers don't need to know whether positions came from a real hand or
//! the simulated pointer.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

// ════════════════════════════════════════════════════════════════════════════
// HandEvent
// ════════════════════════════════════════════════════════════════════════════

/// A fingertip observation emitted by a source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HandEvent {
    /// Index-fingertip position in window pixel coordinates (mirrored so the
    /// pad behaves like a mirror in camera mode).
    Finger { x: f32, y: f32 },
    /// The hand left the frame (or the pointer left the window).
    Lost,
    /// The source is shutting down the application.
    Quit,
}

// ════════════════════════════════════════════════════════════════════════════
// HandSource trait — unified interface for hw and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`HandEvent`]s over a channel.
pub trait HandSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<HandEvent>);
}

/// Spawn a hand source on its own thread and return the receiving end.
pub fn spawn_hand_source<S: HandSource>(source: S) -> Receiver<HandEvent> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// SimHandSource — mouse simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug)]
pub enum SimInput {
    /// Mouse position inside the window, standing in for the fingertip.
    Pointer(f32, f32),
    /// Mouse left the window.
    PointerGone,
    Quit,
}

/// Hand source driven by [`SimInput`] events from the pad window's event
/// poll.  Decouples the window loop from the consumer exactly like the
/// hardware source does.
pub struct SimHandSource {
    pub rx: Receiver<SimInput>,
}

impl HandSource for SimHandSource {
    fn run(self: Box<Self>, tx: Sender<HandEvent>) {
        for input in self.rx {
            let event = match input {
                SimInput::Pointer(x, y) => HandEvent::Finger { x, y },
                SimInput::PointerGone   => HandEvent::Lost,
                SimInput::Quit => {
                    let _ = tx.send(HandEvent::Quit);
                    return;
                }
            };
            if tx.send(event).is_err() {
                return;
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// CameraHandSource — webcam + MediaPipe landmarks (feature = "camera")
// ════════════════════════════════════════════════════════════════════════════

/// Hand source backed by the default capture device.
///
/// Each frame is mirrored horizontally, then handed to a MediaPipe hand
/// landmarker running as a Python subprocess; landmark 8 (the index
/// fingertip) is scaled to window coordinates and emitted.  Frames with no
/// confident detection emit [`HandEvent::Lost`].
#[cfg(feature = "camera")]
pub struct CameraHandSource {
    /// OpenCV device index; 0 is the default system camera.
    pub device: i32,
    /// Target window size the fingertip is scaled to.
    pub win_w: usize,
    pub win_h: usize,
}

#[cfg(feature = "camera")]
impl HandSource for CameraHandSource {
    fn run(self: Box<Self>, tx: Sender<HandEvent>) {
        if let Err(e) = camera::capture_loop(self.device, self.win_w, self.win_h, &tx) {
            log::error!("camera hand source stopped: {:#}", e);
            let _ = tx.send(HandEvent::Quit);
        }
    }
}

#[cfg(feature = "camera")]
mod camera {
    use super::HandEvent;
    use anyhow::{Context, Result};
    use opencv::core::{flip, Mat};
    use opencv::prelude::*;
    use opencv::videoio::{VideoCapture, CAP_ANY};
    use serde::Deserialize;
    use std::io::{BufRead, BufReader, Write};
    use std::process::{Child, ChildStdout, Command, Stdio};
    use std::sync::mpsc::Sender;

    /// MediaPipe hand-landmark index of the index fingertip.
    const INDEX_FINGER_TIP: usize = 8;
    const CONFIDENCE_MIN: f32 = 0.5;

    // ── JSON structures for parsing detector output ───────────────────────

    #[derive(Deserialize, Debug)]
    struct LandmarkJson {
        x: f32,
        y: f32,
        #[allow(dead_code)]
        z: f32,
    }

    #[derive(Deserialize, Debug)]
    struct HandJson {
        score: f32,
        landmarks: Vec<LandmarkJson>,
    }

    #[derive(Deserialize, Debug)]
    struct DetectionJson {
        hands: Vec<HandJson>,
        #[serde(default)]
        error: Option<String>,
    }

    // ── Landmarker subprocess ─────────────────────────────────────────────

    /// MediaPipe hand landmarker behind a Python subprocess.
    ///
    /// Protocol: after a `READY` line, each request is a 12-byte header
    /// (width, height, channels as little-endian u32) followed by the raw
    /// BGR frame; each response is one JSON line.
    struct Landmarker {
        process: Child,
        stdout:  BufReader<ChildStdout>,
    }

    impl Landmarker {
        fn spawn() -> Result<Self> {
            let script = std::env::current_dir()?.join("hand_landmarks.py");
            let venv_python = std::env::current_dir()?.join(".venv/bin/python");

            if !script.exists() {
                anyhow::bail!("hand landmark script not found at {:?}", script);
            }
            if !venv_python.exists() {
                anyhow::bail!(
                    "Python venv not found; run: python3 -m venv .venv && \
                     .venv/bin/pip install mediapipe numpy"
                );
            }

            log::info!("starting MediaPipe hand landmarker subprocess");

            let mut process = Command::new(&venv_python)
                .arg(&script)
                .stdin(Stdio::piped())
                .stdout(Stdio::piped())
                .stderr(Stdio::inherit())
                .spawn()
                .context("failed to start landmarker subprocess")?;

            let stdout = process.stdout.take().context("landmarker has no stdout")?;
            let mut stdout = BufReader::new(stdout);

            let mut ready = String::new();
            stdout.read_line(&mut ready)?;
            if ready.trim() != "READY" {
                anyhow::bail!("landmarker did not signal ready, got: {}", ready);
            }

            log::info!("hand landmarker ready");
            Ok(Landmarker { process, stdout })
        }

        /// Index-fingertip position normalised to 0.0–1.0, or `None` when no
        /// hand is detected with sufficient confidence.
        fn fingertip(&mut self, frame: &Mat) -> Result<Option<(f32, f32)>> {
            if frame.empty() {
                return Ok(None);
            }

            let width = frame.cols() as u32;
            let height = frame.rows() as u32;
            let channels = frame.channels() as u32;
            let data = frame.data_bytes()?;

            let stdin = self.process.stdin.as_mut().context("landmarker has no stdin")?;
            stdin.write_all(&width.to_le_bytes())?;
            stdin.write_all(&height.to_le_bytes())?;
            stdin.write_all(&channels.to_le_bytes())?;
            stdin.write_all(data)?;
            stdin.flush()?;

            let mut response = String::new();
            self.stdout.read_line(&mut response)?;
            let result: DetectionJson = serde_json::from_str(&response)
                .with_context(|| format!("bad landmarker response: {}", response))?;

            if let Some(error) = result.error {
                log::warn!("landmarker error: {}", error);
                return Ok(None);
            }

            for hand in result.hands {
                if hand.score >= CONFIDENCE_MIN {
                    if let Some(tip) = hand.landmarks.get(INDEX_FINGER_TIP) {
                        return Ok(Some((tip.x, tip.y)));
                    }
                }
            }
            Ok(None)
        }
    }

    impl Drop for Landmarker {
        fn drop(&mut self) {
            let _ = self.process.kill();
            let _ = self.process.wait();
        }
    }

    // ── Capture loop ──────────────────────────────────────────────────────

    pub fn capture_loop(
        device: i32,
        win_w: usize,
        win_h: usize,
        tx: &Sender<HandEvent>,
    ) -> Result<()> {
        let mut cap = VideoCapture::new(device, CAP_ANY)
            .with_context(|| format!("failed to open capture device {}", device))?;
        if !cap.is_opened()? {
            anyhow::bail!("capture device {} is not available", device);
        }
        let mut landmarker = Landmarker::spawn()?;

        let mut raw = Mat::default();
        let mut mirrored = Mat::default();
        loop {
            if !cap.read(&mut raw)? || raw.empty() {
                continue;
            }
            // Mirror so the pad behaves like a mirror.
            flip(&raw, &mut mirrored, 1)?;

            let event = match landmarker.fingertip(&mirrored)? {
                Some((nx, ny)) => HandEvent::Finger {
                    x: nx * win_w as f32,
                    y: ny * win_h as f32,
                },
                None => HandEvent::Lost,
            };
            if tx.send(event).is_err() {
                // Receiver gone: the app quit; release the device.
                return Ok(());
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_source_forwards_pointer() {
        let (sim_tx, sim_rx) = mpsc::channel();
        let rx = spawn_hand_source(SimHandSource { rx: sim_rx });

        sim_tx.send(SimInput::Pointer(12.0, 34.0)).unwrap();
        assert_eq!(rx.recv().unwrap(), HandEvent::Finger { x: 12.0, y: 34.0 });
    }

    #[test]
    fn sim_source_forwards_loss_then_quit() {
        let (sim_tx, sim_rx) = mpsc::channel();
        let rx = spawn_hand_source(SimHandSource { rx: sim_rx });

        sim_tx.send(SimInput::PointerGone).unwrap();
        sim_tx.send(SimInput::Quit).unwrap();
        assert_eq!(rx.recv().unwrap(), HandEvent::Lost);
        assert_eq!(rx.recv().unwrap(), HandEvent::Quit);
        // Source thread exits after Quit.
        assert!(rx.recv().is_err());
    }

    #[test]
    fn dropping_sim_input_ends_source() {
        let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();
        let rx = spawn_hand_source(SimHandSource { rx: sim_rx });
        drop(sim_tx);
        assert!(rx.recv().is_err());
    }
}
