//! Parametric UV sphere generation over a latitude/longitude grid.

use std::f32::consts::PI;

use glam::Vec3;

use crate::{Mesh, normalize_or_keep};

/// Segment clamps. The lower bounds keep the grid non-degenerate; the upper
/// bound keeps `(w+1)*(h+1)` vertices inside the u16 index range.
pub const MIN_WIDTH_SEGMENTS: u32 = 3;
pub const MIN_HEIGHT_SEGMENTS: u32 = 2;
pub const MAX_SEGMENTS: u32 = 254;

/// Generate a UV sphere spanning `[phi_start, phi_start + phi_length]` in
/// longitude and `[theta_start, theta_start + theta_length]` in colatitude.
/// Vertex positions use the raw theta; only the pole-skip treats a range
/// past pi as ending at the pole.
///
/// One vertex per grid intersection, including duplicates along the seam.
/// Degenerate triangles at a closed pole are skipped by omitting one triangle
/// of each quad in the first and last row.
#[allow(clippy::too_many_arguments)]
pub fn generate_uv_sphere(
    radius: f32,
    width_segments: u32,
    height_segments: u32,
    phi_start: f32,
    phi_length: f32,
    theta_start: f32,
    theta_length: f32,
) -> Mesh {
    let width_segments = width_segments.clamp(MIN_WIDTH_SEGMENTS, MAX_SEGMENTS);
    let height_segments = height_segments.clamp(MIN_HEIGHT_SEGMENTS, MAX_SEGMENTS);
    let theta_end = (theta_start + theta_length).min(PI);

    let vertex_count = ((width_segments + 1) * (height_segments + 1)) as usize;
    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    let mut grid: Vec<Vec<u16>> = Vec::with_capacity(height_segments as usize + 1);
    let mut index: u16 = 0;

    for iy in 0..=height_segments {
        let mut row = Vec::with_capacity(width_segments as usize + 1);
        let v = iy as f32 / height_segments as f32;
        let theta = theta_start + v * theta_length;

        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let phi = phi_start + u * phi_length;

            let position = Vec3::new(
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            );
            positions.push(position);
            normals.push(normalize_or_keep(position));
            row.push(index);
            index += 1;
        }
        grid.push(row);
    }

    let mut indices = Vec::new();
    for iy in 0..height_segments as usize {
        for ix in 0..width_segments as usize {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];

            if iy != 0 || theta_start > 0.0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments as usize - 1 || theta_end < PI {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    Mesh {
        positions,
        indices,
        normals,
        colors: None,
    }
}
