//! Two-pass terrain compositor: height scan, then displacement and coloring.

use tellus_mesh::Mesh;
use tellus_noise::NoiseStack;

use crate::Gradient;

/// Fixed multiplier applied to vertex coordinates before noise sampling.
/// Keeps the noise frequency independent of the mesh radius, which is
/// typically <= 1.
pub const NOISE_COORD_SCALE: f64 = 20.0;

/// Displace and color a mesh from a noise stack and a gradient.
///
/// First pass samples the stack at every vertex and tracks the running
/// min/max height; second pass scales each vertex by `1 + height` (radial
/// displacement, since positions are sphere-projected directions from the
/// origin) and assigns the gradient color at the normalized height. Two
/// passes are required because the min/max must be known before colors can
/// be normalized.
///
/// Normals are left untouched: lighting reads the pre-displacement radial
/// normals. Calling this twice on the same mesh re-displaces the already
/// displaced positions, so regenerate the base mesh before re-applying.
pub fn apply_terrain(mesh: &mut Mesh, stack: &NoiseStack, gradient: &Gradient) {
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
    let mut colors = Vec::with_capacity(mesh.positions.len());
    for (p, &h) in mesh.positions.iter_mut().zip(&heights) {
        *p *= 1.0 + h as f32;

        let t = if range == 0.0 { 0.0 } else { (h - min) / range };
        colors.push(gradient.color_at(t as f32));
    }

    mesh.colors = Some(colors);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tellus_mesh::generate_icosphere;
    use tellus_noise::NoiseLayerParams;

    fn test_stack() -> NoiseStack {
        NoiseStack::new(
            42,
            vec![NoiseLayerParams {
                scale: 1.0,
                octaves: 1,
                min_value: 0.0,
                ..Default::default()
            }],
        )
    }

    #[test]
    fn test_colors_cover_every_vertex() {
        let mut mesh = generate_icosphere(1.0, 2);
        apply_terrain(&mut mesh, &test_stack(), &Gradient::black_to_white());
        let colors = mesh.colors.as_ref().expect("compositor must set colors");
        assert_eq!(colors.len(), mesh.positions.len());
    }

    #[test]
    fn test_displacement_scales_radially() {
        let base = generate_icosphere(1.0, 1);
        let mut mesh = generate_icosphere(1.0, 1);
        apply_terrain(&mut mesh, &test_stack(), &Gradient::black_to_white());

        for (before, after) in base.positions.iter().zip(mesh.positions.iter()) {
            let factor = after.length() / before.length();
            assert!(
                factor >= 1.0 - 1e-6,
                "Heights are non-negative, so displacement never shrinks: {factor}"
            );
            // Direction is preserved: displaced vertex is a scalar multiple.
            let cross = before.cross(*after).length();
            assert!(cross < 1e-4, "Displacement must stay radial, cross = {cross}");
        }
    }

    #[test]
    fn test_normals_not_recomputed_after_displacement() {
        let base = generate_icosphere(1.0, 1);
        let mut mesh = generate_icosphere(1.0, 1);
        apply_terrain(&mut mesh, &test_stack(), &Gradient::black_to_white());
        for (a, b) in base.normals.iter().zip(mesh.normals.iter()) {
            assert_eq!(a, b, "Compositing must not touch normals");
        }
    }

    #[test]
    fn test_gray_gradient_yields_gray_colors() {
        // End-to-end: detail 0 icosphere, one simple layer, black-to-white
        // gradient. All 12 colors must be shades of gray.
        let mut mesh = generate_icosphere(1.0, 0);
        assert_eq!(mesh.positions.len(), 12);
        assert_eq!(mesh.indices.len(), 60);

        apply_terrain(&mut mesh, &test_stack(), &Gradient::black_to_white());
        let colors = mesh.colors.as_ref().unwrap();
        assert_eq!(colors.len(), 12);
        for c in colors {
            assert_eq!(c[0], c[1], "Gray ramps must give r == g");
            assert_eq!(c[1], c[2], "Gray ramps must give g == b");
        }
    }

    #[test]
    fn test_color_assignment_is_deterministic() {
        let stack = test_stack();
        let gradient = Gradient::black_to_white();

        let mut a = generate_icosphere(1.0, 2);
        apply_terrain(&mut a, &stack, &gradient);
        // Fresh base mesh: positions are not idempotent across applies, but
        // colors must be bit-identical.
        let mut b = generate_icosphere(1.0, 2);
        apply_terrain(&mut b, &stack, &gradient);

        assert_eq!(a.colors, b.colors, "Colors must be reproducible");
    }

    #[test]
    fn test_constant_field_colors_at_ramp_start() {
        // A stack whose layers are all disabled samples 0 everywhere;
        // max == min, so every normalized ratio is defined as 0.
        let stack = NoiseStack::new(
            42,
            vec![NoiseLayerParams {
                enabled: false,
                ..Default::default()
            }],
        );
        let mut mesh = generate_icosphere(1.0, 1);
        apply_terrain(&mut mesh, &stack, &Gradient::black_to_white());
        for c in mesh.colors.as_ref().unwrap() {
            assert_eq!(*c, [0.0, 0.0, 0.0]);
        }
    }
}
