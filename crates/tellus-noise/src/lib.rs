//! Layered 3D noise for planet terrain generation.
//!
//! A [`NoiseStack`] composites independently configured [`NoiseLayerParams`]
//! octave stacks over a shared seeded simplex [`NoiseSource`] into one scalar
//! height value per query point. The first enabled layer doubles as a mask
//! source that other layers can multiply against.

mod layer;
mod source;
mod stack;

pub use layer::NoiseLayerParams;
pub use source::NoiseSource;
pub use stack::NoiseStack;
