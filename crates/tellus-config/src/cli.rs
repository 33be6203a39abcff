//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use tellus_mesh::GeometryParams;

use crate::Config;

/// Tellus planet viewer command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "tellus", about = "Procedural planet viewer")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Geometry variant: "icosahedron" or "uv-sphere".
    #[arg(long)]
    pub geometry: Option<String>,

    /// Icosphere subdivision detail (0-6).
    #[arg(long)]
    pub detail: Option<u32>,

    /// UV sphere segment count (applied to both axes).
    #[arg(long)]
    pub segments: Option<u32>,

    /// Noise seed.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Log filter directives (e.g. "debug,wgpu=warn").
    #[arg(long)]
    pub log_filter: Option<String>,

    /// Path to config directory (overrides the platform default).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(ref name) = args.geometry {
            self.planet.geometry = match name.as_str() {
                "uv-sphere" | "sphere" => {
                    let radius = self.planet.geometry.radius();
                    GeometryParams::UvSphere {
                        radius,
                        width_segments: 32,
                        height_segments: 32,
                        phi_start: 0.0,
                        phi_length: std::f32::consts::TAU,
                        theta_start: 0.0,
                        theta_length: std::f32::consts::PI,
                    }
                }
                _ => GeometryParams::Icosahedron {
                    radius: self.planet.geometry.radius(),
                    detail: 3,
                },
            };
        }
        if let Some(d) = args.detail
            && let GeometryParams::Icosahedron { detail, .. } = &mut self.planet.geometry
        {
            *detail = d;
        }
        if let Some(s) = args.segments
            && let GeometryParams::UvSphere {
                width_segments,
                height_segments,
                ..
            } = &mut self.planet.geometry
        {
            *width_segments = s;
            *height_segments = s;
        }
        if let Some(seed) = args.seed {
            self.planet.seed = seed;
        }
        if let Some(ref filter) = args.log_filter {
            self.log.filter = filter.clone();
        }
    }
}
