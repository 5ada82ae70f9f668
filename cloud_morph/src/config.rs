//! Morph tuning: easing, jitter, spin rates and frame pacing.

use crate::error::MorphError;

/// How per-frame rates relate to wall-clock time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pacing {
    /// Every `step` call is one frame, whatever the real interval.
    /// Visual speed scales with the display refresh rate.
    PerFrame,
    /// Rates are tuned for `reference_hz`; each call advances by
    /// `elapsed_delta · reference_hz` frames' worth of motion.
    TimeNormalized { reference_hz: f32 },
}

impl Default for Pacing {
    fn default() -> Self { Pacing::PerFrame }
}

/// Tuning constants for the morph step and the whole-cloud transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MorphConfig {
    /// Share of the remaining distance covered per frame, in (0, 1].
    pub easing_rate:      f32,
    /// Amplitude of the per-particle x/y oscillation.
    pub jitter_amplitude: f32,
    /// Idle spin about Y, radians per frame.
    pub base_spin:        f32,
    /// Extra spin per frame for a full-scale rotation signal.
    pub gesture_spin:     f32,
    /// Constant tilt about X, radians per frame.
    pub tilt_rate:        f32,
    /// Scale = 1 + expansion · gain.
    pub expansion_gain:   f32,
    pub pacing:           Pacing,
}

impl Default for MorphConfig {
    fn default() -> Self {
        MorphConfig {
            easing_rate:      0.1,
            jitter_amplitude: 0.02,
            base_spin:        0.002,
            gesture_spin:     0.05,
            tilt_rate:        0.001,
            expansion_gain:   2.5,
            pacing:           Pacing::PerFrame,
        }
    }
}

impl MorphConfig {
    /// Same tuning, but with jitter switched off.
    pub fn without_jitter(self) -> Self {
        MorphConfig { jitter_amplitude: 0.0, ..self }
    }

    pub fn validate(&self) -> Result<(), MorphError> {
        if !(self.easing_rate > 0.0 && self.easing_rate <= 1.0) {
            return Err(MorphError::InvalidConfig(format!(
                "easing_rate must be in (0, 1], got {}", self.easing_rate
            )));
        }
        let finite = [
            ("jitter_amplitude", self.jitter_amplitude),
            ("base_spin",        self.base_spin),
            ("gesture_spin",     self.gesture_spin),
            ("tilt_rate",        self.tilt_rate),
            ("expansion_gain",   self.expansion_gain),
        ];
        for (name, v) in finite {
            if !v.is_finite() {
                return Err(MorphError::InvalidConfig(format!("{} must be finite", name)));
            }
        }
        if self.jitter_amplitude < 0.0 {
            return Err(MorphError::InvalidConfig("jitter_amplitude must be ≥ 0".into()));
        }
        if let Pacing::TimeNormalized { reference_hz } = self.pacing {
            if !(reference_hz > 0.0 && reference_hz.is_finite()) {
                return Err(MorphError::InvalidConfig(format!(
                    "reference_hz must be positive, got {}", reference_hz
                )));
            }
        }
        Ok(())
    }
}
