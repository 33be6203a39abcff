//! One configured octave stack of fractal noise.

use serde::{Deserialize, Serialize};

use crate::NoiseSource;

/// Base frequency of the first octave.
const BASE_FREQUENCY: f64 = 0.71;

/// Parameters for a single fractal noise layer.
///
/// A layer sums `octaves` iterations of simplex noise where each octave's
/// frequency grows by `roughness` and its amplitude decays by `persistence`.
/// Unlike plain fBm, each octave is also scaled by the previous octave's
/// weighted value, so contributions collapse toward zero wherever an early
/// octave samples near zero. That feedback produces ridged, masked-looking
/// terrain and is intentional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NoiseLayerParams {
    /// Spatial scale divisor. Larger values spread features wider. Must be > 0.
    pub scale: f64,
    /// Number of octaves to composite, at least 1.
    pub octaves: u32,
    /// Amplitude decay factor between octaves, typically in (0, 1].
    pub persistence: f64,
    /// Frequency growth factor between octaves, typically >= 1.
    pub roughness: f64,
    /// Floor subtracted from the summed height before clamping at zero.
    pub min_value: f64,
    /// Final multiplier on the layer's output.
    pub strength: f64,
    /// Disabled layers contribute nothing to a stack.
    pub enabled: bool,
    /// Multiply this layer's output by the stack's mask source instead of
    /// adding it directly. Ignored on the mask source itself.
    pub use_first_as_mask: bool,
}

impl Default for NoiseLayerParams {
    fn default() -> Self {
        Self {
            scale: 15.0,
            octaves: 4,
            persistence: 0.5,
            roughness: 2.0,
            min_value: 1.0,
            strength: 1.0,
            enabled: true,
            use_first_as_mask: false,
        }
    }
}

impl NoiseLayerParams {
    /// Sample this layer's height at a 3D point.
    ///
    /// Returns a non-negative value: the octave sum is remapped from
    /// `[-1, 1]` to `[0, 1]` per octave, floored by `min_value`, and scaled
    /// by `strength`.
    pub fn sample(&self, source: &NoiseSource, x: f64, y: f64, z: f64) -> f64 {
        let mut amplitude = 1.0;
        let mut frequency = BASE_FREQUENCY;
        let mut height = 0.0;
        let mut weight = 1.0;

        for _ in 0..self.octaves.max(1) {
            let mut v = source.sample(
                x * frequency / self.scale,
                y * frequency / self.scale,
                z * frequency / self.scale,
            );
            v *= weight;
            // Feedback weighting: the next octave is scaled by this octave's
            // signed, already-weighted value.
            weight = v;

            height += (v + 1.0) * 0.5 * amplitude;

            amplitude *= self.persistence;
            frequency *= self.roughness;
        }

        height = (height - self.min_value).max(0.0);
        height * self.strength
    }
}
