//! GPU rendering for the planet viewer: device/surface management, reverse-Z
//! depth, camera, mesh buffers, and the planet/ocean pipelines.

mod buffer;
mod camera;
mod depth;
mod gpu;
mod ocean_pipeline;
mod planet_pipeline;

pub use buffer::{BufferAllocator, MeshBuffer, VertexPositionNormalColor};
pub use camera::{Camera, CameraUniform};
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use ocean_pipeline::{OCEAN_SHADER_SOURCE, OceanPipeline};
pub use planet_pipeline::{PLANET_SHADER_SOURCE, PlanetPipeline, draw_planet};
