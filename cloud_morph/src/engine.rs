//! `MorphEngine`: the live and target buffers plus the animator.

use log::info;

use shape_cloud::{generate_into, PointCloud, RandomSource, Template};

use crate::config::MorphConfig;
use crate::error::MorphError;
use crate::gesture::GestureState;
use crate::step::{Animator, RigidTransform};

/// Whether the live buffer is still visibly travelling toward the target.
///
/// This is a threshold judgement on [`MorphEngine::max_deviation`]; easing
/// is asymptotic, so the buffers never become exactly equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MorphPhase {
    Converging,
    Settled,
}

/// Owns one particle system: live buffer, target buffer, current template,
/// animator and random source.
///
/// Both buffers are allocated once with the same length and never resized.
/// Index `i` of the live buffer always tracks index `i` of the target.
pub struct MorphEngine<R: RandomSource> {
    live:     PointCloud,
    target:   PointCloud,
    template: Template,
    animator: Animator,
    rng:      R,
}

impl<R: RandomSource> MorphEngine<R> {
    /// Build an engine with `count` particles morphing toward `template`.
    ///
    /// The live buffer starts at the origin, so the first template blooms
    /// outward over the first frames.
    pub fn new(
        count:    usize,
        template: Template,
        config:   MorphConfig,
        mut rng:  R,
    ) -> Result<Self, MorphError> {
        let animator = Animator::new(config)?;
        let mut target = PointCloud::zeros(count);
        generate_into(template, &mut target, &mut rng)?;
        info!("morph engine ready: {} particles, template {}", count, template);
        Ok(MorphEngine {
            live: PointCloud::zeros(count),
            target,
            template,
            animator,
            rng,
        })
    }

    /// Regenerate the target for `template`.  The live buffer is untouched,
    /// so the cloud morphs over the following frames.
    pub fn set_template(&mut self, template: Template) -> Result<(), MorphError> {
        generate_into(template, &mut self.target, &mut self.rng)?;
        info!("template {} -> {}", self.template, template);
        self.template = template;
        Ok(())
    }

    /// Advance one rendered frame.
    pub fn frame(&mut self, gesture: &GestureState, elapsed: f64) -> Result<(), MorphError> {
        self.animator.step(
            self.live.as_mut_slice(),
            self.target.as_slice(),
            gesture,
            elapsed,
        )
    }

    /// Largest distance between any live point and its target.
    pub fn max_deviation(&self) -> f32 {
        self.live
            .iter()
            .zip(self.target.iter())
            .map(|(l, t)| {
                let d = [t[0] - l[0], t[1] - l[1], t[2] - l[2]];
                (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt()
            })
            .fold(0.0, f32::max)
    }

    pub fn phase(&self, epsilon: f32) -> MorphPhase {
        if self.max_deviation() <= epsilon {
            MorphPhase::Settled
        } else {
            MorphPhase::Converging
        }
    }

    /// Live points with the whole-cloud transform applied.
    pub fn transformed_points(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        let t = *self.animator.transform();
        self.live.iter().map(move |p| t.apply(p))
    }

    /// Snap the live buffer onto the target and clear rotation.
    pub fn settle_now(&mut self) {
        self.live
            .as_mut_slice()
            .copy_from_slice(self.target.as_slice());
        self.animator.reset();
    }

    pub fn live(&self)        -> &PointCloud      { &self.live }
    pub fn target(&self)      -> &PointCloud      { &self.target }
    pub fn template(&self)    -> Template         { self.template }
    pub fn transform(&self)   -> &RigidTransform  { self.animator.transform() }
    pub fn config(&self)      -> &MorphConfig     { self.animator.config() }
    pub fn point_count(&self) -> usize            { self.live.len() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine(count: usize, template: Template) -> MorphEngine<StdRng> {
        MorphEngine::new(count, template, MorphConfig::default(), StdRng::seed_from_u64(11)).unwrap()
    }

    #[test]
    fn zero_particles_rejected() {
        let r = MorphEngine::new(0, Template::Heart, MorphConfig::default(), StdRng::seed_from_u64(0));
        assert!(matches!(r, Err(MorphError::Shape(_))));
    }

    #[test]
    fn live_starts_at_origin() {
        let e = engine(50, Template::Saturn);
        assert!(e.live().iter().all(|p| p == [0.0; 3]));
        assert_eq!(e.phase(0.1), MorphPhase::Converging);
    }

    #[test]
    fn set_template_swaps_target_only() {
        let mut e = engine(100, Template::Heart);
        for i in 0..10 {
            e.frame(&GestureState::NEUTRAL, i as f64 / 60.0).unwrap();
        }
        let live_before = e.live().clone();
        e.set_template(Template::Flower).unwrap();
        assert_eq!(e.template(), Template::Flower);
        assert_eq!(e.live(), &live_before);
        assert_eq!(e.target().len(), 100);
        assert_eq!(e.target().point(0), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn settle_now_reaches_settled() {
        let mut e = engine(64, Template::Fireworks);
        e.settle_now();
        assert_eq!(e.max_deviation(), 0.0);
        assert_eq!(e.phase(1e-6), MorphPhase::Settled);
    }

    #[test]
    fn transformed_points_reflect_expansion() {
        let mut e = engine(32, Template::Saturn);
        e.settle_now();
        let gesture = GestureState::new(1.0, 0.0, true);
        e.frame(&gesture, 0.0).unwrap();
        let r_live = e.live().bounding_radius();
        let r_view = e
            .transformed_points()
            .map(|p| (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt())
            .fold(0.0, f32::max);
        assert!((r_view - 3.5 * r_live).abs() < 1e-2, "{} vs {}", r_view, r_live);
    }
}
