//! The per-frame morph step.
//!
//! [`ease_toward`] moves every live point toward its target and adds the
//! per-particle oscillation.  [`RigidTransform`] is the whole-cloud scale and
//! rotation the renderer applies on top.  [`Animator`] ties both together
//! and handles frame pacing.

use crate::config::{MorphConfig, Pacing};
use crate::error::MorphError;
use crate::gesture::GestureState;

/// Largest number of reference frames one time-normalized step may cover.
const MAX_CATCHUP_FRAMES: f32 = 10.0;

// ════════════════════════════════════════════════════════════════════════════
// ease_toward: per-point update
// ════════════════════════════════════════════════════════════════════════════

/// Ease `live` toward `target` by `rate` and add the index-phased jitter.
///
/// For particle `i`:
///
/// ```text
/// live[c] += (target[c] - live[c]) · rate        for c in x, y, z
/// x       += sin(elapsed + i) · jitter
/// y       += cos(elapsed + i) · jitter
/// ```
///
/// Both slices must have the same length, a multiple of 3.
pub fn ease_toward(
    live:    &mut [f32],
    target:  &[f32],
    elapsed: f64,
    rate:    f32,
    jitter:  f32,
) -> Result<(), MorphError> {
    if live.len() != target.len() {
        return Err(MorphError::LengthMismatch { live: live.len(), target: target.len() });
    }
    if live.len() % 3 != 0 {
        return Err(MorphError::NotTriplets(live.len()));
    }

    for (i, (p, t)) in live.chunks_exact_mut(3).zip(target.chunks_exact(3)).enumerate() {
        for c in 0..3 {
            p[c] += (t[c] - p[c]) * rate;
        }
        if jitter != 0.0 {
            let phase = elapsed + i as f64;
            p[0] += phase.sin() as f32 * jitter;
            p[1] += phase.cos() as f32 * jitter;
        }
    }
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// RigidTransform: whole-cloud scale and rotation
// ════════════════════════════════════════════════════════════════════════════

/// Uniform scale, cumulative spin about Y and cumulative tilt about X.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigidTransform {
    pub scale: f32,
    /// Radians about the Y axis.
    pub spin:  f32,
    /// Radians about the X axis.
    pub tilt:  f32,
}

impl Default for RigidTransform {
    fn default() -> Self {
        RigidTransform { scale: 1.0, spin: 0.0, tilt: 0.0 }
    }
}

impl RigidTransform {
    /// Advance by `frames` frames of motion under `gesture`.
    ///
    /// Scale is set, not accumulated; the two angles accumulate.
    pub fn advance(&mut self, gesture: &GestureState, cfg: &MorphConfig, frames: f32) {
        self.scale = 1.0 + gesture.expansion * cfg.expansion_gain;
        self.spin += (cfg.base_spin + gesture.rotation * cfg.gesture_spin) * frames;
        self.tilt += cfg.tilt_rate * frames;
    }

    /// Map a cloud-space point into view space: scale, then spin, then tilt.
    pub fn apply(&self, p: [f32; 3]) -> [f32; 3] {
        let [x, y, z] = [p[0] * self.scale, p[1] * self.scale, p[2] * self.scale];
        let (ss, cs) = self.spin.sin_cos();
        let (x, z) = (x * cs + z * ss, -x * ss + z * cs);
        let (st, ct) = self.tilt.sin_cos();
        let (y, z) = (y * ct - z * st, y * st + z * ct);
        [x, y, z]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Animator: one call per rendered frame
// ════════════════════════════════════════════════════════════════════════════

/// Runs the full per-frame update and owns the cumulative transform.
///
/// The animator never holds on to the buffers it is given; the caller
/// passes exclusive access to the live buffer for the duration of each call.
#[derive(Clone, Debug)]
pub struct Animator {
    config:       MorphConfig,
    transform:    RigidTransform,
    last_elapsed: Option<f64>,
}

impl Animator {
    pub fn new(config: MorphConfig) -> Result<Self, MorphError> {
        config.validate()?;
        Ok(Animator {
            config,
            transform:    RigidTransform::default(),
            last_elapsed: None,
        })
    }

    pub fn config(&self) -> &MorphConfig { &self.config }

    pub fn transform(&self) -> &RigidTransform { &self.transform }

    /// How many reference frames this call represents.
    fn frames_for(&self, elapsed: f64) -> f32 {
        match self.config.pacing {
            Pacing::PerFrame => 1.0,
            Pacing::TimeNormalized { reference_hz } => match self.last_elapsed {
                None => 1.0,
                Some(prev) => {
                    let dt = (elapsed - prev).max(0.0) as f32;
                    (dt * reference_hz).min(MAX_CATCHUP_FRAMES)
                }
            },
        }
    }

    /// Ease `live` toward `target`, add jitter, then advance the transform.
    ///
    /// On error neither the buffer nor the transform is touched.
    pub fn step(
        &mut self,
        live:    &mut [f32],
        target:  &[f32],
        gesture: &GestureState,
        elapsed: f64,
    ) -> Result<(), MorphError> {
        let frames = self.frames_for(elapsed);
        let (rate, jitter) = match self.config.pacing {
            Pacing::PerFrame => (self.config.easing_rate, self.config.jitter_amplitude),
            Pacing::TimeNormalized { .. } => (
                1.0 - (1.0 - self.config.easing_rate).powf(frames),
                self.config.jitter_amplitude * frames,
            ),
        };

        ease_toward(live, target, elapsed, rate, jitter)?;
        self.transform.advance(gesture, &self.config, frames);
        self.last_elapsed = Some(elapsed);
        Ok(())
    }

    /// Forget accumulated rotation and pacing history.
    pub fn reset(&mut self) {
        self.transform = RigidTransform::default();
        self.last_elapsed = None;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
