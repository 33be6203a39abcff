//! Seeded simplex noise source.

use noise::{NoiseFn, Simplex};

/// Deterministic 3D gradient noise field.
///
/// A thin wrapper over simplex noise that fixes the seed at construction,
/// making every [`sample`](NoiseSource::sample) call a pure function of its
/// coordinates. Output is continuous and bounded to roughly `[-1, 1]`.
pub struct NoiseSource {
    noise: Simplex,
}

impl NoiseSource {
    /// Create a source with the given seed.
    pub fn new(seed: u32) -> Self {
        Self {
            noise: Simplex::new(seed),
        }
    }

    /// Sample the scalar field at an arbitrary real-valued 3D point.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        self.noise.get([x, y, z])
    }
}
