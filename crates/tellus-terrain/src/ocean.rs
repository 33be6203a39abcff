//! Grayscale ocean coverage shading.

use tellus_mesh::Mesh;
use tellus_noise::NoiseStack;

use crate::compositor::NOISE_COORD_SCALE;

/// Color an ocean mesh from a noise stack without displacing it.
///
/// Same height scan as terrain compositing, but each vertex gets the
/// grayscale color `(g, g, g)` where `g` is the normalized height. The
/// renderer draws the mesh as translucent white with `alpha = g`, so dark
/// areas read as open water gaps and bright areas as full coverage.
pub fn shade_ocean(mesh: &mut Mesh, stack: &NoiseStack) {
    let mut heights = Vec::with_capacity(mesh.positions.len());
    let mut min = f64::MAX;
    let mut max: f64 = 0.0;

    for p in &mesh.positions {
        let h = stack.sample(
            p.x as f64 * NOISE_COORD_SCALE,
            p.y as f64 * NOISE_COORD_SCALE,
            p.z as f64 * NOISE_COORD_SCALE,
        );
        min = min.min(h);
        max = max.max(h);
        heights.push(h);
    }

    let range = max - min;
    let colors = heights
        .iter()
        .map(|&h| {
            let g = if range == 0.0 {
                0.0
            } else {
                ((h - min) / range) as f32
            };
            [g, g, g]
        })
        .collect();

    mesh.colors = Some(colors);
}
