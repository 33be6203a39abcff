//! Terrain compositing: noise-driven displacement and gradient coloring.
//!
//! [`apply_terrain`] walks every mesh vertex, samples a [`NoiseStack`] at a
//! fixed coordinate scale, displaces the vertex along its radius, and maps
//! the normalized height through a [`Gradient`]. [`shade_ocean`] runs the
//! same height scan without displacement to produce a grayscale water
//! coverage channel.
//!
//! [`NoiseStack`]: tellus_noise::NoiseStack

mod compositor;
mod gradient;
mod ocean;

pub use compositor::{NOISE_COORD_SCALE, apply_terrain};
pub use gradient::{Gradient, GradientError, GradientStop};
pub use ocean::shade_ocean;
