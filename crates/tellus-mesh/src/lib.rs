//! Base polyhedron mesh generation for planet rendering.
//!
//! Two generators share one contract: an icosphere built by recursive edge
//! subdivision with shared-vertex deduplication, and a parametric UV sphere.
//! Both produce sphere-projected positions, radial normals, and `u16` triangle
//! indices; generator-side clamps keep every mesh inside the 16-bit index
//! range so the renderer never has to widen or reject.

mod icosphere;
mod uv_sphere;

use glam::Vec3;
use serde::{Deserialize, Serialize};

pub use icosphere::generate_icosphere;
pub use uv_sphere::generate_uv_sphere;

/// Vertices below this length are treated as degenerate and left unscaled.
pub const ZERO_LENGTH_TOLERANCE: f32 = 1e-5;

/// A generated triangle mesh.
///
/// `normals` parallels `positions` once generation completes; `colors` stays
/// `None` until terrain compositing runs. Every index is `< positions.len()`.
pub struct Mesh {
    /// Vertex positions, one per subdivision identity.
    pub positions: Vec<Vec3>,
    /// Triangle index triples into `positions`.
    pub indices: Vec<u16>,
    /// Per-vertex normals: the normalized vertex position (sphere-centered
    /// approximation, not a true face normal).
    pub normals: Vec<Vec3>,
    /// Per-vertex linear RGB colors, filled in by terrain compositing.
    pub colors: Option<Vec<[f32; 3]>>,
}

impl Mesh {
    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Geometry selection and parameters, one variant per generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum GeometryParams {
    /// Subdivided icosahedron projected onto a sphere.
    Icosahedron {
        /// Sphere radius after projection.
        radius: f32,
        /// Subdivision iterations, clamped to `0..=6`.
        detail: u32,
    },
    /// Parametric latitude/longitude grid.
    UvSphere {
        radius: f32,
        /// Longitude segments, clamped to `3..=254`.
        width_segments: u32,
        /// Latitude segments, clamped to `2..=254`.
        height_segments: u32,
        /// Start longitude in radians.
        phi_start: f32,
        /// Longitude sweep in radians.
        phi_length: f32,
        /// Start colatitude in radians.
        theta_start: f32,
        /// Colatitude sweep in radians, clamped so the end stays <= pi.
        theta_length: f32,
    },
}

impl GeometryParams {
    /// Sphere radius of either variant.
    pub fn radius(&self) -> f32 {
        match *self {
            GeometryParams::Icosahedron { radius, .. } => radius,
            GeometryParams::UvSphere { radius, .. } => radius,
        }
    }

    /// Generate the mesh for this variant.
    pub fn generate(&self) -> Mesh {
        match *self {
            GeometryParams::Icosahedron { radius, detail } => generate_icosphere(radius, detail),
            GeometryParams::UvSphere {
                radius,
                width_segments,
                height_segments,
                phi_start,
                phi_length,
                theta_start,
                theta_length,
            } => generate_uv_sphere(
                radius,
                width_segments,
                height_segments,
                phi_start,
                phi_length,
                theta_start,
                theta_length,
            ),
        }
    }
}

impl Default for GeometryParams {
    fn default() -> Self {
        GeometryParams::Icosahedron {
            radius: 0.7,
            detail: 3,
        }
    }
}

/// Normalize a vector, returning it unchanged when its length is below
/// [`ZERO_LENGTH_TOLERANCE`]. Avoids division by zero for a vertex sitting at
/// the origin.
pub fn normalize_or_keep(v: Vec3) -> Vec3 {
    let mag = v.length();
    if mag < ZERO_LENGTH_TOLERANCE { v } else { v / mag }
}

/// Project a vector onto the sphere of the given radius, leaving near-zero
/// vectors unscaled.
pub(crate) fn project_to_radius(v: Vec3, radius: f32) -> Vec3 {
    let mag = v.length();
    if mag < ZERO_LENGTH_TOLERANCE {
        v
    } else {
        v / mag * radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_produces_unit_length() {
        let cases = [
            Vec3::new(3.0, 4.0, 0.0),
            Vec3::new(-0.001, 0.002, 0.003),
            Vec3::new(1e6, -2e6, 5e5),
        ];
        for v in cases {
            let n = normalize_or_keep(v);
            assert!(
                (n.length() - 1.0).abs() < 1e-4,
                "normalize({v:?}) should be unit length, got {}",
                n.length()
            );
        }
    }

    #[test]
    fn test_normalize_zero_vector_returns_it_unchanged() {
        let z = normalize_or_keep(Vec3::ZERO);
        assert_eq!(z, Vec3::ZERO);

        let tiny = Vec3::splat(1e-7);
        assert_eq!(normalize_or_keep(tiny), tiny);
    }

    #[test]
    fn test_geometry_params_dispatch() {
        let ico = GeometryParams::Icosahedron {
            radius: 1.0,
            detail: 0,
        }
        .generate();
        assert_eq!(ico.positions.len(), 12);

        let sphere = GeometryParams::UvSphere {
            radius: 1.0,
            width_segments: 8,
            height_segments: 6,
            phi_start: 0.0,
            phi_length: std::f32::consts::TAU,
            theta_start: 0.0,
            theta_length: std::f32::consts::PI,
        }
        .generate();
        assert_eq!(sphere.positions.len(), 9 * 7);
    }
}
