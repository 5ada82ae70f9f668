//! Interactive morph console: switch templates, run frames, watch the
//! live buffer converge.

use cloud_morph::{GestureState, MorphConfig, MorphEngine, MorphPhase, Pacing};
use shape_cloud::Template;
use std::io::{self, Write};

const SETTLE_EPSILON: f32 = 0.05;

fn main() {
    env_logger::init();

    println!();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║              Particle Morph Step Explorer                ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();

    let count: usize = read_line("  Particle count (default 15000): ")
        .trim().parse().unwrap_or(15_000);
    let count = count.max(1).min(1_000_000);
    let template = pick_template();
    let config = pick_pacing();

    let mut engine = match MorphEngine::new(count, template, config, rand::thread_rng()) {
        Ok(e)  => e,
        Err(e) => { eprintln!("Error: {}", e); std::process::exit(1); }
    };
    let mut gesture = GestureState::NEUTRAL;
    let mut frame: u64 = 0;

    println!("\n  ✓  {}\n", status(&engine, &gesture, frame));

    loop {
        print_ops_menu();
        let choice = read_line("Command: ").trim().to_ascii_lowercase();

        match choice.as_str() {
            "1" => {
                let t = pick_template();
                match engine.set_template(t) {
                    Ok(())  => println!("  Target is now {}.", t),
                    Err(e)  => println!("  ⚠  {}", e),
                }
            }
            "2" => {
                let n: u64 = read_line("  Run N frames (default 10): ").trim().parse().unwrap_or(10);
                for _ in 0..n {
                    if let Err(e) = engine.frame(&gesture, frame as f64 / 60.0) {
                        println!("  ⚠  {}", e);
                        break;
                    }
                    frame += 1;
                    if frame % 5 == 0 || n <= 10 {
                        println!("    [{:>6}]  max deviation {:>9.4}", frame, engine.max_deviation());
                    }
                }
            }
            "3" => {
                let start = frame;
                let limit = start + 2_000;
                while engine.phase(SETTLE_EPSILON) == MorphPhase::Converging && frame < limit {
                    if let Err(e) = engine.frame(&gesture, frame as f64 / 60.0) {
                        println!("  ⚠  {}", e);
                        break;
                    }
                    frame += 1;
                }
                if engine.phase(SETTLE_EPSILON) == MorphPhase::Settled {
                    println!("  Settled after {} frames.", frame - start);
                } else {
                    println!("  Still converging after {} frames (jitter keeps it above {}).",
                             frame - start, SETTLE_EPSILON);
                }
            }
            "4" => {
                let e: f32 = read_line("  Expansion 0–1 (default 0): ").trim().parse().unwrap_or(0.0);
                let r: f32 = read_line("  Rotation −1–1 (default 0): ").trim().parse().unwrap_or(0.0);
                gesture = GestureState::new(e, r, true);
                println!("  Gesture set: expansion={:.2} rotation={:.2}", e, r);
            }
            "5" => {
                gesture = GestureState::NEUTRAL;
                println!("  Gesture cleared (no hand).");
            }
            "6" => {
                let n: usize = read_line("  Show N points (default 5): ").trim().parse().unwrap_or(5);
                for (i, (live, view)) in engine.live().iter()
                    .zip(engine.transformed_points())
                    .take(n)
                    .enumerate()
                {
                    let target = engine.target().point(i);
                    println!(
                        "    [{:>4}]  live ({:>7.3},{:>7.3},{:>7.3})  target ({:>7.3},{:>7.3},{:>7.3})  view ({:>7.3},{:>7.3},{:>7.3})",
                        i, live[0], live[1], live[2],
                        target[0], target[1], target[2],
                        view[0], view[1], view[2],
                    );
                }
            }
            "7" => {
                println!("  {}", status(&engine, &gesture, frame));
            }
            "q" | "quit" => {
                println!("\nGoodbye!\n");
                break;
            }
            _ => println!("  ⚠  Unknown command."),
        }
        println!();
    }
}

fn status<R: shape_cloud::RandomSource>(
    engine:  &MorphEngine<R>,
    gesture: &GestureState,
    frame:   u64,
) -> String {
    let t = engine.transform();
    format!(
        "{} x {}  frame {}  deviation {:.4}  scale {:.2}  spin {:.3}  tilt {:.3}  hand {}",
        engine.template(), engine.point_count(), frame, engine.max_deviation(),
        t.scale, t.spin, t.tilt,
        if gesture.is_detected { "yes" } else { "no" },
    )
}

fn print_ops_menu() {
    println!("  ┌─────────────────────────────────────────────────────────┐");
    println!("  │  1. Switch template           5. Clear gesture          │");
    println!("  │  2. Run N frames              6. Show points            │");
    println!("  │  3. Run until settled         7. Status                 │");
    println!("  │  4. Set gesture               q. Quit                   │");
    println!("  └─────────────────────────────────────────────────────────┘");
}

fn pick_template() -> Template {
    loop {
        println!("  Choose template:");
        for (i, t) in Template::ALL.iter().enumerate() {
            println!("    {}. {}", i + 1, t.name());
        }
        match read_line("  Choice (1–5): ").parse::<Template>() {
            Ok(t)  => break t,
            Err(_) => println!("  ⚠  Please enter 1–5.\n"),
        }
    }
}

fn pick_pacing() -> MorphConfig {
    println!("  Pacing: 1=per frame (60 Hz tuning)  2=time-normalized");
    let pacing = match read_line("  Choice (default 1): ").trim() {
        "2" => {
            let hz: f32 = read_line("  Reference rate Hz (default 60): ")
                .trim().parse().unwrap_or(60.0);
            Pacing::TimeNormalized { reference_hz: hz.max(1.0) }
        }
        _ => Pacing::PerFrame,
    };
    MorphConfig { pacing, ..MorphConfig::default() }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
