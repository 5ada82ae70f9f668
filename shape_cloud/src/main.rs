//! Interactive menu for exploring the five shape templates.

use shape_cloud::{generate, shape_part, ShapePart, Template};
use std::collections::BTreeMap;
use std::io::{self, Write};

fn main() {
    env_logger::init();

    println!();
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║           Particle Shape Template Explorer           ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    loop {
        print_menu();
        let choice = read_line("Select a template (1–5, or q to quit): ");

        if choice.trim().eq_ignore_ascii_case("q") {
            println!("\nGoodbye!\n");
            break;
        }

        let template: Template = match choice.parse() {
            Ok(t)  => t,
            Err(e) => { println!("  ⚠  {}\n", e); continue; }
        };

        let n: usize = read_line("  How many points? (default 15000): ")
            .trim().parse().unwrap_or(15_000);
        let n = n.max(1).min(1_000_000);

        let cloud = match generate(template, n) {
            Ok(c)  => c,
            Err(e) => { println!("  ⚠  {}\n", e); continue; }
        };

        println!();
        println!("  ┌─ {} ({} points) ─", template, n);

        // Per-part breakdown
        let mut parts: BTreeMap<String, (usize, f32)> = BTreeMap::new();
        for (i, p) in cloud.iter().enumerate() {
            let key = format!("{:?}", shape_part(template, i, n));
            let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            let e = parts.entry(key).or_insert((0, 0.0));
            e.0 += 1;
            e.1 = e.1.max(r);
        }
        for (name, (count, max_r)) in &parts {
            println!("  │  {:<8} {:>8} points   max radius {:>7.3}", name, count, max_r);
        }

        let c = cloud.centroid();
        println!("  │");
        println!("  │  centroid        ({:.3}, {:.3}, {:.3})", c[0], c[1], c[2]);
        println!("  │  bounding radius {:.3}", cloud.bounding_radius());

        // A few sample coordinates
        println!("  │");
        for i in sample_indices(n) {
            let p = cloud.point(i);
            let part: ShapePart = shape_part(template, i, n);
            println!(
                "  │    #{:<7} {:<7} ({:>8.3}, {:>8.3}, {:>8.3})",
                i, format!("{:?}", part), p[0], p[1], p[2]
            );
        }
        println!("  └─");
        println!();
    }
}

fn sample_indices(n: usize) -> Vec<usize> {
    let mut v: Vec<usize> = [0, 1, 2, n / 4, n / 2, (3 * n) / 4, n - 1]
        .into_iter()
        .filter(|&i| i < n)
        .collect();
    v.sort_unstable();
    v.dedup();
    v
}

fn print_menu() {
    println!("  ┌──────────────────────────────────────────────────────┐");
    for (i, t) in Template::ALL.iter().enumerate() {
        println!("  │  {}. {:49} │", i + 1, t.name());
    }
    println!("  └──────────────────────────────────────────────────────┘");
    println!();
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
