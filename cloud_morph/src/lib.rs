//! # cloud_morph
//!
//! Eases a live particle buffer toward a [`shape_cloud`] template every
//! frame and tracks the whole-cloud scale/rotation driven by gesture input.
//!
//! ## Per-frame update
//!
//! 1. Every coordinate moves a fixed share (default 10%) of the way to its
//!    target.
//! 2. A small per-particle oscillation is added to x and y, phase-shifted
//!    by the particle index.
//! 3. The whole cloud's [`RigidTransform`] advances: scale follows the
//!    gesture expansion, spin follows the gesture rotation on top of a slow
//!    idle spin, and a constant tilt keeps the cloud moving with no hand in
//!    view.
//!
//! Switching template only replaces the target buffer, so the visible
//! effect is a multi-frame morph from whatever is live.
//!
//! ```rust
//! use cloud_morph::{GestureState, MorphConfig, MorphEngine};
//! use rand::{rngs::StdRng, SeedableRng};
//! use shape_cloud::Template;
//!
//! let mut engine = MorphEngine::new(
//!     2_000, Template::Heart, MorphConfig::default(), StdRng::seed_from_u64(1),
//! ).unwrap();
//! engine.frame(&GestureState::default(), 0.0).unwrap();
//! engine.set_template(Template::Saturn).unwrap();
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod step;

pub use config::{MorphConfig, Pacing};
pub use engine::{MorphEngine, MorphPhase};
pub use error::MorphError;
pub use gesture::{GestureMailbox, GestureState};
pub use step::{ease_toward, Animator, RigidTransform};
