//! Ordered collection of noise layers combined into one height field.

use crate::{NoiseLayerParams, NoiseSource};

/// An ordered stack of noise layers sharing one seeded source.
///
/// The first *enabled* layer is the mask source: its value initializes the
/// running total, and layers flagged `use_first_as_mask` have their output
/// multiplied by it instead of added directly. The mask source's own flag is
/// ignored. Disabled layers contribute nothing and never become the mask
/// source.
///
/// Sampling is read-only over the layer parameters, so a stack can be shared
/// freely across concurrent readers.
pub struct NoiseStack {
    source: NoiseSource,
    layers: Vec<NoiseLayerParams>,
}

impl NoiseStack {
    /// Build a stack from layer parameters over a source seeded with `seed`.
    pub fn new(seed: u32, layers: Vec<NoiseLayerParams>) -> Self {
        Self {
            source: NoiseSource::new(seed),
            layers,
        }
    }

    /// The shared noise source, for sampling a layer in isolation.
    pub fn source(&self) -> &NoiseSource {
        &self.source
    }

    /// The configured layers, in stacking order.
    pub fn layers(&self) -> &[NoiseLayerParams] {
        &self.layers
    }

    /// Sample the combined height of all enabled layers at a 3D point.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let mut first_noise = 1.0;
        let mut total = 0.0;
        let mut saw_first = false;

        for layer in &self.layers {
            if !layer.enabled {
                continue;
            }
            let v = layer.sample(&self.source, x, y, z);
            if !saw_first {
                first_noise = v;
                total = v;
                saw_first = true;
            } else if layer.use_first_as_mask {
                total += first_noise * v;
            } else {
                total += v;
            }
        }

        total
    }
}
