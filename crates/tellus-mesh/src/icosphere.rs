//! Icosphere generation by recursive edge subdivision.

use std::collections::HashMap;

use glam::Vec3;

use crate::{Mesh, normalize_or_keep, project_to_radius};

/// Upper clamp on subdivision iterations. Detail 6 yields 40962 vertices,
/// which still fits the u16 index range; detail 7 would not.
pub const MAX_DETAIL: u32 = 6;

/// Generate an icosphere of the given radius and subdivision detail.
///
/// Starts from the 12 canonical icosahedron vertices, subdivides each
/// triangle into four `detail` times with shared midpoint vertices, then
/// projects every vertex onto the sphere. Normals are the normalized vertex
/// positions; lighting relies on that sphere-centered approximation.
pub fn generate_icosphere(radius: f32, detail: u32) -> Mesh {
    let detail = detail.min(MAX_DETAIL);
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;

    let mut positions: Vec<Vec3> = vec![
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ];

    let mut indices: Vec<u16> = vec![
        0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, 1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7,
        1, 8, 3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, 4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9,
        8, 1,
    ];

    for _ in 0..detail {
        subdivide(&mut positions, &mut indices);
    }

    for p in &mut positions {
        *p = project_to_radius(*p, radius);
    }

    let normals: Vec<Vec3> = positions.iter().map(|&p| normalize_or_keep(p)).collect();

    Mesh {
        positions,
        indices,
        normals,
        colors: None,
    }
}

/// Split every triangle into 4 by inserting a vertex at each edge midpoint.
///
/// The midpoint cache is keyed by the unordered vertex-index pair, so the
/// second triangle sharing an edge reuses the vertex the first one created
/// no matter which traversal direction reaches it.
fn subdivide(positions: &mut Vec<Vec3>, indices: &mut Vec<u16>) {
    let mut midpoint_cache: HashMap<(u16, u16), u16> = HashMap::new();
    let mut new_indices = Vec::with_capacity(indices.len() * 4);

    let get_midpoint =
        |a: u16, b: u16, pos: &mut Vec<Vec3>, cache: &mut HashMap<(u16, u16), u16>| -> u16 {
            let key = if a < b { (a, b) } else { (b, a) };
            if let Some(&idx) = cache.get(&key) {
                return idx;
            }
            let mid = (pos[a as usize] + pos[b as usize]) * 0.5;
            let idx = pos.len() as u16;
            pos.push(mid);
            cache.insert(key, idx);
            idx
        };

    for tri in indices.chunks(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        let ab = get_midpoint(a, b, positions, &mut midpoint_cache);
        let bc = get_midpoint(b, c, positions, &mut midpoint_cache);
        let ca = get_midpoint(c, a, positions, &mut midpoint_cache);

        new_indices.extend_from_slice(&[a, ab, ca]);
        new_indices.extend_from_slice(&[b, bc, ab]);
        new_indices.extend_from_slice(&[c, ca, bc]);
        new_indices.extend_from_slice(&[ab, bc, ca]);
    }

    *indices = new_indices;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_base_icosahedron_counts() {
        let mesh = generate_icosphere(1.0, 0);
        assert_eq!(mesh.positions.len(), 12);
        assert_eq!(mesh.triangle_count(), 20);
        assert_eq!(mesh.indices.len(), 60);
        assert_eq!(mesh.normals.len(), mesh.positions.len());
    }

    #[test]
    fn test_triangle_count_quadruples_per_detail() {
        for detail in 0..=4 {
            let mesh = generate_icosphere(1.0, detail);
            let expected = 20 * 4usize.pow(detail);
            assert_eq!(
                mesh.triangle_count(),
                expected,
                "detail {detail} should give {expected} triangles"
            );
        }
    }

    #[test]
    fn test_vertices_lie_on_sphere() {
        let radius = 0.7;
        let mesh = generate_icosphere(radius, 3);
        for p in &mesh.positions {
            assert!(
                (p.length() - radius).abs() < 1e-5,
                "Vertex not on sphere of radius {radius}: length = {}",
                p.length()
            );
        }
    }

    #[test]
    fn test_indices_in_range() {
        let mesh = generate_icosphere(1.0, 4);
        let n = mesh.positions.len() as u16;
        for &idx in &mesh.indices {
            assert!(idx < n, "Index {idx} out of bounds (vertex count = {n})");
        }
    }

    #[test]
    fn test_subdivision_adds_one_vertex_per_unique_edge() {
        // Each subdivision adds exactly one midpoint per unique edge of the
        // prior mesh. Any duplicate midpoint would break this count.
        for detail in 0..3 {
            let before = generate_icosphere(1.0, detail);
            let after = generate_icosphere(1.0, detail + 1);

            let mut edges: HashSet<(u16, u16)> = HashSet::new();
            for tri in before.indices.chunks(3) {
                for &(a, b) in &[(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                    edges.insert(if a < b { (a, b) } else { (b, a) });
                }
            }

            assert_eq!(
                after.positions.len(),
                before.positions.len() + edges.len(),
                "detail {detail}: new vertex count must equal prior unique edge count"
            );
        }
    }

    #[test]
    fn test_normals_are_normalized_positions() {
        let mesh = generate_icosphere(0.5, 2);
        for (p, n) in mesh.positions.iter().zip(mesh.normals.iter()) {
            assert!((n.length() - 1.0).abs() < 1e-5, "Normal must be unit length");
            let expected = *p / p.length();
            assert!(
                (*n - expected).length() < 1e-5,
                "Normal should be the normalized vertex position"
            );
        }
    }

    #[test]
    fn test_detail_clamped_to_max() {
        let at_max = generate_icosphere(1.0, MAX_DETAIL);
        let over = generate_icosphere(1.0, MAX_DETAIL + 3);
        assert_eq!(over.positions.len(), at_max.positions.len());
        assert!(
            at_max.positions.len() <= u16::MAX as usize,
            "Max detail must stay inside the u16 index range"
        );
    }

    #[test]
    fn test_colors_absent_before_compositing() {
        let mesh = generate_icosphere(1.0, 1);
        assert!(mesh.colors.is_none());
    }
}
