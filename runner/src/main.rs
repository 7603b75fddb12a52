//! runner — interactive entry point.

use runner::app::{run, AppConfig};

fn main() {
    env_logger::init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║           Pad Runner — Gesture-Controlled Survival           ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let cfg = AppConfig::from_args(std::env::args().skip(1));
    println!("  Command file:    {}", cfg.command_path.display());
    println!("  High-score file: {}", cfg.score_path.display());
    println!("  Sprite gif:      {}", cfg.sprite_path.display());
    println!("  Opening game window…");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
