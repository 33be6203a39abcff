//! Scene construction: turns configuration into GPU-ready vertex data.

use tellus_config::{OceanConfig, PlanetConfig};
use tellus_mesh::{Mesh, generate_icosphere};
use tellus_noise::NoiseStack;
use tellus_render::VertexPositionNormalColor;
use tellus_terrain::{Gradient, GradientError, apply_terrain, shade_ocean};

/// CPU-side vertex and index data for one mesh.
pub struct SceneMesh {
    pub vertices: Vec<VertexPositionNormalColor>,
    pub indices: Vec<u16>,
}

impl SceneMesh {
    fn from_mesh(mesh: Mesh) -> Self {
        let vertices = (0..mesh.positions.len())
            .map(|i| VertexPositionNormalColor {
                position: mesh.positions[i].to_array(),
                normal: mesh.normals[i].to_array(),
                color: mesh
                    .colors
                    .as_ref()
                    .map(|c| c[i])
                    .unwrap_or([1.0, 1.0, 1.0]),
            })
            .collect();

        Self {
            vertices,
            indices: mesh.indices,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Build the displaced, gradient-colored planet mesh from its config.
pub fn build_planet(config: &PlanetConfig) -> Result<SceneMesh, GradientError> {
    let mut mesh = config.geometry.generate();
    let stack = NoiseStack::new(config.seed, config.layers.clone());
    let gradient = Gradient::new(config.gradient.clone())?;
    apply_terrain(&mut mesh, &stack, &gradient);
    Ok(SceneMesh::from_mesh(mesh))
}

/// Build the ocean overlay mesh: an undisplaced icosphere whose gray
/// channel drives the overlay alpha.
pub fn build_ocean(config: &OceanConfig, seed: u32) -> SceneMesh {
    let mut mesh = generate_icosphere(config.radius, config.detail);
    let stack = NoiseStack::new(seed, vec![config.layer.clone()]);
    shade_ocean(&mut mesh, &stack);
    SceneMesh::from_mesh(mesh)
}
