//! gesture_pad — interactive entry point.

use gesture_pad::app::{run, AppConfig};

fn main() {
    env_logger::init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Gesture Pad — Virtual D-Pad Command Publisher         ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "camera")]
    println!("  Mode: webcam hand tracking  (omit --camera for the mouse)");
    #[cfg(not(feature = "camera"))]
    println!("  Mode: mouse simulation  (build with --features camera for hardware)");
    println!();

    let cfg = AppConfig::from_args(std::env::args().skip(1));
    println!("  Command file: {}", cfg.command_path.display());
    println!("  Opening pad window…");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
