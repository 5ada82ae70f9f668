//! # gesture_cloud
//!
//! A particle cloud that morphs between five procedural shapes and is
//! scaled and spun by hand gestures.
//!
//! ## Gesture → Action mapping
//!
//! | Signal | Effect |
//! |---|---|
//! | Expansion 0–1 | Whole-cloud scale 1.0–3.5 |
//! | Rotation −1–1 | Extra spin on top of the idle spin |
//! | Hand detected | Shown in the status bar |
//!
//! Gesture snapshots travel through a [`cloud_morph::GestureMailbox`]: the
//! gesture thread posts, the render loop reads the newest value once per
//! frame.
//!
//! ## Feature flags
//!
//! * (default): **Simulation mode**: keyboard drives the gesture signal.
//! * `leap`: **Hardware mode**: a LeapMotion controller drives it via LeapC.
//!
//! ### Keyboard
//!
//! | Key | Action |
//! |---|---|
//! | `Up` / `Down` | Expand / contract |
//! | `Left` / `Right` (hold) | Rotate |
//! | `H` | Toggle "hand detected" |
//! | `1`–`5` | Heart, Flower, Saturn, Buddha, Fireworks |
//! | `Space` | Next template |
//! | `Q` / `Esc` | Quit |

pub mod app;
pub mod gesture;
pub mod palette;
pub mod visualizer;
