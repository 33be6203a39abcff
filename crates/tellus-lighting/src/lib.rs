//! Directional lighting for the planet viewer.
//!
//! [`DirectionalLight`] holds the CPU-side light description and
//! [`DirectionalLightUniform`] is its 32-byte GPU form, written to a uniform
//! buffer each frame. The specular exponent travels with the camera
//! constants, not here.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// A single infinitely-distant light source.
#[derive(Clone, Debug)]
pub struct DirectionalLight {
    /// Normalized direction pointing FROM the light toward the surface.
    pub direction: Vec3,
    /// Linear RGB color, not premultiplied by intensity.
    pub color: Vec3,
    /// Scalar intensity multiplier, typically around 1.0.
    pub intensity: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            // Off-axis so the default planet shows a visible terminator.
            direction: Vec3::new(-0.4, -0.8, -0.45).normalize(),
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}

impl DirectionalLight {
    /// Build a light from plain config arrays, normalizing the direction.
    ///
    /// A near-zero direction keeps the default instead of failing: a light
    /// with no direction is a config mistake, not a reason to abort.
    pub fn from_parts(direction: [f32; 3], color: [f32; 3], intensity: f32) -> Self {
        let dir = Vec3::from_array(direction);
        let direction = if dir.length() > 1e-6 {
            dir / dir.length()
        } else {
            Self::default().direction
        };
        Self {
            direction,
            color: Vec3::from_array(color),
            intensity,
        }
    }

    /// Set the light direction, normalizing the input.
    ///
    /// # Panics
    ///
    /// Panics if the input vector has near-zero length.
    pub fn set_direction(&mut self, dir: Vec3) {
        let len = dir.length();
        assert!(len > 1e-6, "directional light direction must not be zero");
        self.direction = dir / len;
    }

    /// Build the GPU-side uniform from this light's properties.
    pub fn to_uniform(&self) -> DirectionalLightUniform {
        DirectionalLightUniform {
            direction_intensity: [
                self.direction.x,
                self.direction.y,
                self.direction.z,
                self.intensity,
            ],
            color_padding: [self.color.x, self.color.y, self.color.z, 0.0],
        }
    }
}

/// GPU-side representation, 32 bytes, std140-compatible.
///
/// Bound at `@group(1) @binding(0)`, visible to the fragment stage.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct DirectionalLightUniform {
    /// xyz = direction (normalized), w = intensity.
    pub direction_intensity: [f32; 4],
    /// xyz = color (linear RGB), w = padding.
    pub color_padding: [f32; 4],
}
