//! gesture_cloud: interactive entry point.

use cloud_morph::{MorphConfig, Pacing};
use gesture_cloud::app::{run, AppConfig};
use shape_cloud::Template;
use std::io::{self, Write};

fn main() {
    env_logger::init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Gesture Cloud — Morphing Particle Shape Viewer        ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hardware");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Keyboard simulation  (use --features leap for hardware)");
    println!();

    let cfg = if std::env::args().any(|a| a == "--quick") {
        println!("  Quick-start: 15000 particles, Heart, per-frame pacing\n");
        AppConfig::default()
    } else {
        configure_interactively()
    };

    println!();
    println!("  Opening visualizer window…");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn configure_interactively() -> AppConfig {
    let point_count: usize = read_line("  Particle count (default 15000): ")
        .trim().parse().unwrap_or(15_000);
    let point_count = point_count.max(100).min(200_000);

    let template = pick_template();
    let morph    = pick_morph();

    AppConfig {
        point_count,
        template,
        morph,
        ..AppConfig::default()
    }
}

fn pick_template() -> Template {
    println!("  Starting shape:");
    for (i, t) in Template::ALL.iter().enumerate() {
        println!("    {}. {}", i + 1, t.name());
    }
    read_line("  Choice (1–5, default 1): ").parse().unwrap_or_default()
}

fn pick_morph() -> MorphConfig {
    println!("  Pacing: 1=per frame (60 Hz tuning)  2=time-normalized");
    let pacing = match read_line("  Choice (default 1): ").trim() {
        "2" => {
            let hz: f32 = read_line("  Reference rate Hz (default 60): ")
                .trim().parse().unwrap_or(60.0);
            Pacing::TimeNormalized { reference_hz: hz.max(1.0).min(1000.0) }
        }
        _ => Pacing::PerFrame,
    };
    let jitter = read_line("  Shimmer on? (Y/n): ").trim().to_ascii_lowercase();
    let cfg = MorphConfig { pacing, ..MorphConfig::default() };
    if jitter == "n" || jitter == "no" { cfg.without_jitter() } else { cfg }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
