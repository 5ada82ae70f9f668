//! Top-level application state machine.
//!
//! `AppState` owns the `MorphEngine` and the per-particle colours.  It
//! processes `ControlEvent`s, reads the newest gesture snapshot once per
//! frame and hands the transformed cloud to the visualizer.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Instant;

use cloud_morph::{GestureMailbox, GestureState, MorphConfig, MorphEngine, MorphPhase};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shape_cloud::Template;

use crate::gesture::{spawn_gesture_source, ControlEvent, SimGestureSource, SimInput};
use crate::palette;
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub point_count:    usize,
    pub template:       Template,
    pub morph:          MorphConfig,
    /// Max deviation below which the status bar reports "settled".
    pub settle_epsilon: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            point_count:    15_000,
            template:       Template::Heart,
            morph:          MorphConfig::default(),
            settle_epsilon: 0.5,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    engine:         MorphEngine<StdRng>,
    colors:         Vec<u32>,
    settle_epsilon: f32,
    frames:         u64,
    gesture:        GestureState,
    pub status:     String,
}

impl AppState {
    pub fn new(cfg: AppConfig) -> Result<Self, String> {
        Self::from_rng(cfg, StdRng::from_entropy())
    }

    /// Deterministic state for tests and reproducible runs.
    pub fn with_seed(cfg: AppConfig, seed: u64) -> Result<Self, String> {
        Self::from_rng(cfg, StdRng::seed_from_u64(seed))
    }

    fn from_rng(cfg: AppConfig, rng: StdRng) -> Result<Self, String> {
        let engine = MorphEngine::new(cfg.point_count, cfg.template, cfg.morph, rng)
            .map_err(|e| e.to_string())?;
        let colors = palette::palette_for(cfg.template, cfg.point_count);
        Ok(AppState {
            engine,
            colors,
            settle_epsilon: cfg.settle_epsilon,
            frames:         0,
            gesture:        GestureState::NEUTRAL,
            status:         format!("Ready: {} x {}", cfg.template, cfg.point_count),
        })
    }

    // ── process one ControlEvent ─────────────────────────────────────────

    /// Returns false when the application should quit.
    pub fn handle_control(&mut self, event: ControlEvent) -> bool {
        match event {
            ControlEvent::SelectTemplate(t) => self.select_template(t),
            ControlEvent::NextTemplate      => {
                let next = self.engine.template().next();
                self.select_template(next);
            }
            ControlEvent::Quit => return false,
        }
        true
    }

    /// Retarget the cloud.  Reselecting the current template reshuffles it.
    pub fn select_template(&mut self, template: Template) {
        match self.engine.set_template(template) {
            Ok(()) => {
                self.colors = palette::palette_for(template, self.engine.point_count());
                self.status = format!("Morphing to {}", template);
            }
            Err(e) => self.status = format!("Template switch failed: {}", e),
        }
    }

    // ── per-frame update ──────────────────────────────────────────────────

    /// Advance one frame with the newest gesture snapshot.
    pub fn tick(&mut self, gesture: GestureState, elapsed: f64) {
        self.gesture = gesture;
        if let Err(e) = self.engine.frame(&gesture, elapsed) {
            self.status = format!("Frame failed: {}", e);
            return;
        }
        self.frames += 1;

        let phase = match self.engine.phase(self.settle_epsilon) {
            MorphPhase::Converging => "converging",
            MorphPhase::Settled    => "settled",
        };
        let t = self.engine.transform();
        self.status = format!(
            "{} x {}  {}  dev {:.2}  scale {:.2}  hand {}",
            self.engine.template(),
            self.engine.point_count(),
            phase,
            self.engine.max_deviation(),
            t.scale,
            if gesture.is_detected { "yes" } else { "no" },
        );
    }

    // ── accessors for the visualizer ──────────────────────────────────────

    pub fn engine(&self)   -> &MorphEngine<StdRng> { &self.engine }
    pub fn colors(&self)   -> &[u32]               { &self.colors }
    pub fn template(&self) -> Template             { self.engine.template() }
    pub fn gesture(&self)  -> &GestureState        { &self.gesture }
    pub fn frames(&self)   -> u64                  { self.frames }
}

// ════════════════════════════════════════════════════════════════════════════
// Main loop
// ════════════════════════════════════════════════════════════════════════════

/// Drain every pending control event.  Returns false on quit or when all
/// sources have hung up.
fn drain_controls(app: &mut AppState, sources: &[Receiver<ControlEvent>]) -> bool {
    let mut alive = false;
    for rx in sources {
        loop {
            match rx.try_recv() {
                Ok(ev) => {
                    if !app.handle_control(ev) { return false; }
                }
                Err(TryRecvError::Empty) => { alive = true; break; }
                Err(TryRecvError::Disconnected) => break,
            }
        }
    }
    alive
}

pub fn run(cfg: AppConfig) -> Result<(), String> {
    let mailbox = GestureMailbox::new();

    // ── Sim gesture channel (keyboard; also carries template/quit keys) ──
    let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();
    #[cfg_attr(not(feature = "leap"), allow(unused_mut))]
    let mut sources = vec![spawn_gesture_source(SimGestureSource { rx: sim_rx }, mailbox.clone())];

    #[cfg(feature = "leap")]
    sources.push(spawn_gesture_source(crate::gesture::LeapGestureSource, mailbox.clone()));

    // ── Visualizer (owns the window and the sim input sender) ────────────
    let mut vis = Visualizer::new(sim_tx)?;

    // ── App state ─────────────────────────────────────────────────────────
    let mut app = AppState::new(cfg)?;
    let start = Instant::now();

    // ── Main loop ─────────────────────────────────────────────────────────
    while vis.is_open() {
        // 1. Poll window input → SimInput
        if !vis.poll_input() { break; }

        // 2. Discrete commands
        if !drain_controls(&mut app, &sources) { break; }

        // 3. Newest gesture snapshot, then step
        app.tick(mailbox.latest(), start.elapsed().as_secs_f64());

        // 4. Render
        vis.render(
            app.engine().transformed_points(),
            app.colors(),
            app.template(),
            app.gesture(),
            &app.status,
        );
    }

    info!("viewer closed after {} frames", app.frames());
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn make_app() -> AppState {
        let cfg = AppConfig { point_count: 600, ..AppConfig::default() };
        AppState::with_seed(cfg, 42).unwrap()
    }

    #[test]
    fn zero_points_is_an_error() {
        let cfg = AppConfig { point_count: 0, ..AppConfig::default() };
        assert!(AppState::with_seed(cfg, 1).is_err());
    }

    #[test]
    fn select_template_switches_target() {
        let mut app = make_app();
        assert_eq!(app.template(), Template::Heart);
        assert!(app.handle_control(ControlEvent::SelectTemplate(Template::Saturn)));
        assert_eq!(app.template(), Template::Saturn);
        assert_eq!(app.colors().len(), 600);
        assert!(app.status.contains("Saturn"));
    }

    #[test]
    fn next_template_cycles() {
        let mut app = make_app();
        for expected in [Template::Flower, Template::Saturn, Template::Buddha,
                         Template::Fireworks, Template::Heart] {
            app.handle_control(ControlEvent::NextTemplate);
            assert_eq!(app.template(), expected);
        }
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut app = make_app();
        assert!(!app.handle_control(ControlEvent::Quit));
    }

    #[test]
    fn tick_advances_and_records_gesture() {
        let mut app = make_app();
        let g = GestureState::new(0.5, 0.0, true);
        app.tick(g, 0.0);
        app.tick(g, 1.0 / 60.0);
        assert_eq!(app.frames(), 2);
        assert_eq!(app.gesture(), &g);
        assert!(app.status.contains("hand yes"));
    }

    #[test]
    fn cloud_blooms_from_origin() {
        let mut app = make_app();
        let d0 = app.engine().max_deviation();
        for i in 0..60 {
            app.tick(GestureState::NEUTRAL, i as f64 / 60.0);
        }
        assert!(app.engine().max_deviation() < d0 * 0.1);
    }

    #[test]
    fn drain_controls_handles_queue_and_quit() {
        let mut app = make_app();
        let (tx, rx) = mpsc::channel();
        tx.send(ControlEvent::SelectTemplate(Template::Buddha)).unwrap();
        let sources = vec![rx];
        assert!(drain_controls(&mut app, &sources));
        assert_eq!(app.template(), Template::Buddha);

        tx.send(ControlEvent::Quit).unwrap();
        assert!(!drain_controls(&mut app, &sources));
    }

    #[test]
    fn drain_controls_stops_when_sources_hang_up() {
        let mut app = make_app();
        let (tx, rx) = mpsc::channel::<ControlEvent>();
        drop(tx);
        assert!(!drain_controls(&mut app, &[rx]));
    }
}
