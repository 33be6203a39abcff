//! Window creation and event handling via winit.
//!
//! Provides [`AppState`] which implements winit's [`ApplicationHandler`]
//! trait, and [`run_with_config`] to start the event loop.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tellus_config::Config;
use tellus_lighting::DirectionalLight;
use tellus_mesh::GeometryParams;
use tellus_render::{
    BufferAllocator, Camera, DepthBuffer, MeshBuffer, OceanPipeline, PlanetPipeline, RenderContext,
    SurfaceError, draw_planet, init_render_context_blocking,
};
use tracing::{error, info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::orbit::OrbitController;
use crate::scene::{build_ocean, build_planet};

/// Initial orbit camera distance.
const INITIAL_DISTANCE: f32 = 10.0;

/// One scroll line in zoom pixels.
const SCROLL_LINE_PIXELS: f32 = 40.0;

/// GPU resources created once the window and device exist.
struct GpuResources {
    gpu: RenderContext,
    depth_buffer: DepthBuffer,
    planet_pipeline: PlanetPipeline,
    ocean_pipeline: OceanPipeline,
    planet_mesh: MeshBuffer,
    ocean_mesh: MeshBuffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    ocean_camera_bind_group: wgpu::BindGroup,
    light_buffer: wgpu::Buffer,
    light_bind_group: wgpu::BindGroup,
}

/// Application state: window, GPU resources, camera, and input tracking.
pub struct AppState {
    window: Option<Arc<Window>>,
    resources: Option<GpuResources>,
    config: Config,
    config_dir: PathBuf,
    camera: Camera,
    orbit: OrbitController,
    light: DirectionalLight,
    ocean_visible: bool,
    dragging: bool,
    cursor: Option<(f64, f64)>,
    last_frame: Instant,
}

impl AppState {
    pub fn new(config: Config, config_dir: PathBuf) -> Self {
        let light = DirectionalLight::from_parts(
            config.light.direction,
            config.light.color,
            config.light.intensity,
        );
        let mut camera = Camera::default();
        camera.shininess = config.light.shininess;
        let ocean_visible = config.ocean.enabled;

        Self {
            window: None,
            resources: None,
            config,
            config_dir,
            camera,
            orbit: OrbitController::new(INITIAL_DISTANCE),
            light,
            ocean_visible,
            dragging: false,
            cursor: None,
            last_frame: Instant::now(),
        }
    }

    fn window_attributes(&self) -> WindowAttributes {
        WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width as f64,
                self.config.window.height as f64,
            ))
    }

    fn surface_size(&self) -> (u32, u32) {
        match &self.resources {
            Some(res) => (res.gpu.surface_config.width, res.gpu.surface_config.height),
            None => (self.config.window.width, self.config.window.height),
        }
    }

    /// Build all GPU resources for the current config.
    fn initialize_rendering(&mut self, gpu: RenderContext) {
        use wgpu::util::DeviceExt;

        let (width, height) = (gpu.surface_config.width, gpu.surface_config.height);
        let depth_buffer = DepthBuffer::new(&gpu.device, width, height);
        self.camera.set_aspect_ratio(width as f32, height as f32);

        let planet_pipeline = PlanetPipeline::new(&gpu.device, gpu.surface_format);
        let ocean_pipeline = OceanPipeline::new(&gpu.device, gpu.surface_format);

        let allocator = BufferAllocator::new(&gpu.device);
        let (planet_mesh, ocean_mesh) = self.build_meshes(&allocator);

        self.orbit.apply_to(&mut self.camera);
        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("camera-uniform"),
                contents: bytemuck::cast_slice(&[self.camera.to_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera-bind-group"),
            layout: &planet_pipeline.camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });
        let ocean_camera_bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("ocean-camera-bind-group"),
            layout: &ocean_pipeline.camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let light_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("directional-light-uniform"),
                contents: bytemuck::cast_slice(&[self.light.to_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let light_bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("directional-light-bind-group"),
            layout: &planet_pipeline.light_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: light_buffer.as_entire_binding(),
            }],
        });

        self.resources = Some(GpuResources {
            gpu,
            depth_buffer,
            planet_pipeline,
            ocean_pipeline,
            planet_mesh,
            ocean_mesh,
            camera_buffer,
            camera_bind_group,
            ocean_camera_bind_group,
            light_buffer,
            light_bind_group,
        });

        info!("Rendering initialized: planet and ocean pipelines ready");
    }

    /// Generate planet and ocean vertex data and upload it to the GPU.
    fn build_meshes(&self, allocator: &BufferAllocator) -> (MeshBuffer, MeshBuffer) {
        let planet = match build_planet(&self.config.planet) {
            Ok(scene) => scene,
            Err(e) => {
                error!("Gradient rejected, falling back to default planet: {e}");
                build_planet(&Default::default()).expect("default gradient has two stops")
            }
        };
        let ocean = build_ocean(&self.config.ocean, self.config.planet.seed);

        info!(
            "Planet: {} triangles, ocean: {} triangles",
            planet.triangle_count(),
            ocean.triangle_count()
        );

        let planet_mesh = allocator.create_mesh(
            "planet",
            bytemuck::cast_slice(&planet.vertices),
            &planet.indices,
        );
        let ocean_mesh = allocator.create_mesh(
            "ocean",
            bytemuck::cast_slice(&ocean.vertices),
            &ocean.indices,
        );
        (planet_mesh, ocean_mesh)
    }

    /// Rebuild both meshes after a config change.
    fn regenerate(&mut self) {
        let Some(res) = self.resources.take() else {
            return;
        };
        let (planet_mesh, ocean_mesh) = {
            let allocator = BufferAllocator::new(&res.gpu.device);
            self.build_meshes(&allocator)
        };
        self.resources = Some(GpuResources {
            planet_mesh,
            ocean_mesh,
            ..res
        });
    }

    /// Push the current light state to the GPU.
    fn upload_light(&self) {
        if let Some(res) = &self.resources {
            res.gpu.queue.write_buffer(
                &res.light_buffer,
                0,
                bytemuck::cast_slice(&[self.light.to_uniform()]),
            );
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Space => {
                self.orbit.auto_rotate = !self.orbit.auto_rotate;
                info!("Auto-rotation {}", on_off(self.orbit.auto_rotate));
            }
            KeyCode::KeyG => {
                self.config.planet.geometry = switch_geometry(&self.config.planet.geometry);
                info!("Switched geometry to {:?}", self.config.planet.geometry);
                self.regenerate();
            }
            KeyCode::KeyO => {
                self.ocean_visible = !self.ocean_visible;
                self.config.ocean.enabled = self.ocean_visible;
                info!("Ocean overlay {}", on_off(self.ocean_visible));
            }
            KeyCode::KeyS => match self.config.save(&self.config_dir) {
                Ok(()) => info!("Config saved to {}", self.config_dir.display()),
                Err(e) => error!("Failed to save config: {e}"),
            },
            KeyCode::KeyR => match self.config.reload(&self.config_dir) {
                Ok(Some(new_config)) => {
                    self.config = new_config;
                    self.light = DirectionalLight::from_parts(
                        self.config.light.direction,
                        self.config.light.color,
                        self.config.light.intensity,
                    );
                    self.camera.shininess = self.config.light.shininess;
                    self.ocean_visible = self.config.ocean.enabled;
                    self.upload_light();
                    self.regenerate();
                }
                Ok(None) => info!("Config unchanged"),
                Err(e) => error!("Failed to reload config: {e}"),
            },
            _ => {}
        }
    }

    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.orbit.tick(dt);
        self.orbit.apply_to(&mut self.camera);

        let ocean_visible = self.ocean_visible;
        let Some(res) = &self.resources else {
            return;
        };

        res.gpu.queue.write_buffer(
            &res.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera.to_uniform()]),
        );

        match res.gpu.get_current_texture() {
            Ok(surface_texture) => {
                let view = surface_texture
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                let mut encoder =
                    res.gpu
                        .device
                        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("frame-encoder"),
                        });

                {
                    let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("planet-pass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: &view,
                            depth_slice: None,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                                store: wgpu::StoreOp::Store,
                            },
                        })],
                        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                            view: &res.depth_buffer.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(DepthBuffer::CLEAR_VALUE),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        }),
                        occlusion_query_set: None,
                        timestamp_writes: None,
                        multiview_mask: None,
                    });

                    draw_planet(
                        &mut pass,
                        &res.planet_pipeline,
                        &res.camera_bind_group,
                        &res.light_bind_group,
                        &res.planet_mesh,
                    );

                    if ocean_visible {
                        res.ocean_pipeline.render(
                            &mut pass,
                            &res.ocean_camera_bind_group,
                            &res.ocean_mesh,
                        );
                    }
                }

                res.gpu.queue.submit(std::iter::once(encoder.finish()));
                surface_texture.present();
            }
            Err(SurfaceError::Lost) => {
                let (w, h) = self.surface_size();
                if let Some(res) = &mut self.resources {
                    res.gpu.resize(w, h);
                }
            }
            Err(SurfaceError::OutOfMemory) => {
                error!("GPU out of memory");
                event_loop.exit();
            }
            Err(SurfaceError::Timeout) => {
                warn!("Surface timeout, skipping frame");
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = self.window_attributes();
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        match init_render_context_blocking(window.clone()) {
            Ok(ctx) => self.initialize_rendering(ctx),
            Err(e) => {
                error!("GPU initialization failed: {e}");
                event_loop.exit();
                return;
            }
        }

        self.last_frame = Instant::now();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                let (w, h) = (new_size.width.max(1), new_size.height.max(1));
                self.camera.set_aspect_ratio(w as f32, h as f32);
                if let Some(res) = &mut self.resources {
                    res.gpu.resize(w, h);
                    res.depth_buffer.resize(&res.gpu.device, w, h);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && !event.repeat
                    && let PhysicalKey::Code(code) = event.physical_key
                {
                    self.handle_key(code);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.dragging = state == ElementState::Pressed;
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.dragging
                    && let Some((px, py)) = self.cursor
                {
                    let (w, h) = self.surface_size();
                    self.orbit
                        .rotate(px - position.x, py - position.y, w, h);
                }
                self.cursor = Some((position.x, position.y));
            }
            WindowEvent::CursorLeft { .. } => {
                self.dragging = false;
                self.cursor = None;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let pixels = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * SCROLL_LINE_PIXELS,
                    MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
                };
                let (_, h) = self.surface_size();
                self.orbit.zoom(pixels, h);
            }
            WindowEvent::RedrawRequested => {
                self.render_frame(event_loop);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Swap between the two geometry variants, keeping the radius.
fn switch_geometry(current: &GeometryParams) -> GeometryParams {
    match *current {
        GeometryParams::Icosahedron { radius, .. } => GeometryParams::UvSphere {
            radius,
            width_segments: 32,
            height_segments: 32,
            phi_start: 0.0,
            phi_length: std::f32::consts::TAU,
            theta_start: 0.0,
            theta_length: std::f32::consts::PI,
        },
        GeometryParams::UvSphere { radius, .. } => {
            GeometryParams::Icosahedron { radius, detail: 3 }
        }
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "disabled" }
}

/// Creates an event loop and runs the viewer with the given config.
///
/// This function blocks until the window is closed.
#[instrument(skip_all)]
pub fn run_with_config(config: Config, config_dir: PathBuf) {
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    let mut app = AppState::new(config, config_dir);
    event_loop.run_app(&mut app).expect("Event loop failed");
}
