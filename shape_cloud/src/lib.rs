//! # shape_cloud
//!
//! Procedural point clouds for five shape templates.  Every template maps a
//! particle count `N` to a flat buffer of `3·N` coordinates, where particle
//! `i` lives in slots `[3i, 3i+1, 3i+2]`.
//!
//! | Template | Recipe |
//! |---|---|
//! | Heart | parametric heart curve, random angle per point, random depth |
//! | Flower | golden-angle phyllotaxis spiral with radial undulation |
//! | Saturn | low-discrepancy sphere (first 60%) plus a flat ring (last 40%) |
//! | Buddha | torso (30%), crossed legs (40%), half-circle aura (30%) |
//! | Fireworks | sphere directions with `√u` radial falloff |
//!
//! Randomness comes from a [`RandomSource`] so callers can seed it:
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use shape_cloud::{generate_with, Template};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let cloud = generate_with(Template::Flower, 1_000, &mut rng).unwrap();
//! assert_eq!(cloud.as_slice().len(), 3_000);
//! ```

pub mod cloud;
pub mod error;
pub mod generate;
pub mod random;
pub mod template;

pub use cloud::PointCloud;
pub use error::ShapeError;
pub use generate::{generate, generate_into, generate_with, shape_part, ShapePart};
pub use random::RandomSource;
pub use template::Template;
