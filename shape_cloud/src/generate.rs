//! The five shape recipes.
//!
//! Each recipe is evaluated independently per index `i` of `count`.  The
//! multi-part templates (Saturn, Buddha) route indices by position, never
//! by chance, so the share of points per part is exact.

use std::f64::consts::{PI, TAU};
use std::time::Instant;

use log::debug;

use crate::cloud::PointCloud;
use crate::error::ShapeError;
use crate::random::RandomSource;
use crate::template::Template;

// ════════════════════════════════════════════════════════════════════════════
// Recipe constants
// ════════════════════════════════════════════════════════════════════════════

pub const HEART_SCALE:          f64 = 0.5;
pub const HEART_DEPTH:          f64 = 2.5;

pub const FLOWER_RADIUS:        f64 = 15.0;
pub const GOLDEN_ANGLE_DEG:     f64 = 137.5;
pub const FLOWER_WAVE_HEIGHT:   f64 = 2.0;

pub const SATURN_SPHERE_SHARE:  f64 = 0.6;
pub const SATURN_SPHERE_RADIUS: f64 = 10.0;
pub const SATURN_RING_INNER:    f64 = 14.0;
pub const SATURN_RING_OUTER:    f64 = 22.0;
pub const SATURN_RING_HALF_THICKNESS: f64 = 0.25;

pub const BUDDHA_TORSO_SHARE:   f64 = 0.3;
pub const BUDDHA_LEGS_END:      f64 = 0.7;
pub const BUDDHA_LEG_SWEEPS:    f64 = 10.0;
pub const BUDDHA_AURA_INNER:    f64 = 15.0;
pub const BUDDHA_AURA_OUTER:    f64 = 20.0;

pub const FIREWORKS_RADIUS:     f64 = 20.0;

// ════════════════════════════════════════════════════════════════════════════
// ShapePart: which sub-shape an index belongs to
// ════════════════════════════════════════════════════════════════════════════

/// The branch of a recipe that places a given index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapePart {
    Heart,
    Spiral,
    /// Saturn's sphere.
    Planet,
    /// Saturn's flat ring.
    Ring,
    /// Buddha's head and torso column.
    Body,
    /// Buddha's crossed-legs ellipse.
    Legs,
    /// Buddha's half-circle halo.
    Aura,
    Burst,
}

/// First index *not* in the leading `fraction` of `count`.
///
/// Equivalent to routing every `i < count·fraction` to the leading part.
fn segment_end(count: usize, fraction: f64) -> usize {
    ((count as f64 * fraction).ceil() as usize).min(count)
}

/// Which part of `template` places index `i` of `count`.
pub fn shape_part(template: Template, i: usize, count: usize) -> ShapePart {
    match template {
        Template::Heart     => ShapePart::Heart,
        Template::Flower    => ShapePart::Spiral,
        Template::Fireworks => ShapePart::Burst,
        Template::Saturn => {
            if i < segment_end(count, SATURN_SPHERE_SHARE) {
                ShapePart::Planet
            } else {
                ShapePart::Ring
            }
        }
        Template::Buddha => {
            if i < segment_end(count, BUDDHA_TORSO_SHARE) {
                ShapePart::Body
            } else if i < segment_end(count, BUDDHA_LEGS_END) {
                ShapePart::Legs
            } else {
                ShapePart::Aura
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Entry points
// ════════════════════════════════════════════════════════════════════════════

/// Generate `count` points for `template` using the thread-local RNG.
pub fn generate(template: Template, count: usize) -> Result<PointCloud, ShapeError> {
    generate_with(template, count, &mut rand::thread_rng())
}

/// Generate `count` points for `template` drawing from `rng`.
pub fn generate_with<R: RandomSource + ?Sized>(
    template: Template,
    count:    usize,
    rng:      &mut R,
) -> Result<PointCloud, ShapeError> {
    if count == 0 {
        return Err(ShapeError::ZeroCount);
    }
    let mut cloud = PointCloud::zeros(count);
    generate_into(template, &mut cloud, rng)?;
    Ok(cloud)
}

/// Overwrite every point of `cloud` with a fresh `template` shape.
///
/// The cloud keeps its length; only its contents change.
pub fn generate_into<R: RandomSource + ?Sized>(
    template: Template,
    cloud:    &mut PointCloud,
    rng:      &mut R,
) -> Result<(), ShapeError> {
    let count = cloud.len();
    if count == 0 {
        return Err(ShapeError::ZeroCount);
    }

    let started = Instant::now();
    for i in 0..count {
        let p = match shape_part(template, i, count) {
            ShapePart::Heart  => heart_point(rng),
            ShapePart::Spiral => flower_point(i, count),
            ShapePart::Planet => sphere_point(i, count, SATURN_SPHERE_RADIUS),
            ShapePart::Ring   => ring_point(rng),
            ShapePart::Body   => torso_point(i, count, rng),
            ShapePart::Legs   => legs_point(i, count, rng),
            ShapePart::Aura   => aura_point(rng),
            ShapePart::Burst  => {
                let r = FIREWORKS_RADIUS * (rng.next_unit() as f64).sqrt();
                sphere_point(i, count, r)
            }
        };
        cloud.set_point(i, p);
    }
    debug!("generated {} x {} points in {:?}", template, count, started.elapsed());
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Recipes
// ════════════════════════════════════════════════════════════════════════════

fn to_f32(p: [f64; 3]) -> [f32; 3] {
    [p[0] as f32, p[1] as f32, p[2] as f32]
}

fn uniform<R: RandomSource + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    lo + (hi - lo) * rng.next_unit() as f64
}

/// A point inside the classic heart silhouette with random depth.
fn heart_point<R: RandomSource + ?Sized>(rng: &mut R) -> [f32; 3] {
    let t = uniform(rng, 0.0, TAU);
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    let z = uniform(rng, -HEART_DEPTH, HEART_DEPTH);
    to_f32([x * HEART_SCALE, y * HEART_SCALE, z])
}

/// Phyllotaxis: radius grows with `√(i/count)`, angle steps by the golden angle.
fn flower_point(i: usize, count: usize) -> [f32; 3] {
    let r = FLOWER_RADIUS * (i as f64 / count as f64).sqrt();
    let a = (i as f64 * GOLDEN_ANGLE_DEG).to_radians();
    let z = FLOWER_WAVE_HEIGHT * (0.5 * r).sin();
    to_f32([r * a.cos(), r * a.sin(), z])
}

/// Polar and azimuth angles of the low-discrepancy sphere walk.
pub fn sphere_angles(i: usize, count: usize) -> (f64, f64) {
    let phi = (-1.0 + 2.0 * i as f64 / count as f64).acos();
    let theta = phi * (count as f64 * PI).sqrt();
    (phi, theta)
}

fn sphere_point(i: usize, count: usize, radius: f64) -> [f32; 3] {
    let (phi, theta) = sphere_angles(i, count);
    to_f32([
        radius * theta.cos() * phi.sin(),
        radius * theta.sin() * phi.sin(),
        radius * phi.cos(),
    ])
}

/// Thin flat ring in the x/z plane.
fn ring_point<R: RandomSource + ?Sized>(rng: &mut R) -> [f32; 3] {
    let r = uniform(rng, SATURN_RING_INNER, SATURN_RING_OUTER);
    let a = uniform(rng, 0.0, TAU);
    let y = uniform(rng, -SATURN_RING_HALF_THICKNESS, SATURN_RING_HALF_THICKNESS);
    to_f32([r * a.cos(), y, r * a.sin()])
}

/// Column rising from y = −5 to y = 15 over the torso segment.
fn torso_point<R: RandomSource + ?Sized>(i: usize, count: usize, rng: &mut R) -> [f32; 3] {
    let end = segment_end(count, BUDDHA_TORSO_SHARE).max(1);
    let t = i as f64 / end as f64;
    let x = uniform(rng, -3.0, 3.0);
    let z = uniform(rng, -2.0, 2.0);
    to_f32([x, -5.0 + 20.0 * t, z])
}

/// Ellipse of crossed legs around y = −10.
fn legs_point<R: RandomSource + ?Sized>(i: usize, count: usize, rng: &mut R) -> [f32; 3] {
    let start = segment_end(count, BUDDHA_TORSO_SHARE);
    let end = segment_end(count, BUDDHA_LEGS_END);
    let span = end.saturating_sub(start).max(1);
    let t = (i - start) as f64 / span as f64;
    let leg = t * BUDDHA_LEG_SWEEPS;
    let y = -10.0 + uniform(rng, -1.0, 1.0);
    to_f32([12.0 * leg.sin(), y, 8.0 * leg.cos()])
}

/// Upper half-circle halo behind the figure.
fn aura_point<R: RandomSource + ?Sized>(rng: &mut R) -> [f32; 3] {
    let r = uniform(rng, BUDDHA_AURA_INNER, BUDDHA_AURA_OUTER);
    let a = uniform(rng, 0.0, PI);
    to_f32([r * a.cos(), r * a.sin() - 5.0, -5.0])
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
