//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tellus_mesh::GeometryParams;
use tellus_noise::NoiseLayerParams;
use tellus_terrain::GradientStop;

use crate::error::ConfigError;

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Planet geometry, noise layers, and coloring.
    pub planet: PlanetConfig,
    /// Directional light settings.
    pub light: LightConfig,
    /// Ocean overlay settings.
    pub ocean: OceanConfig,
    /// Logging settings.
    pub log: LogConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
}

/// Planet geometry and terrain configuration.
///
/// Layer identity for persistence is positional: the i-th entry of `layers`
/// is layer i of the stack.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PlanetConfig {
    /// Base geometry variant and its parameters.
    pub geometry: GeometryParams,
    /// Noise seed shared by all layers of the stack.
    pub seed: u32,
    /// Terrain noise layers in stacking order.
    pub layers: Vec<NoiseLayerParams>,
    /// Color ramp stops, at least 2 once sorted by position.
    pub gradient: Vec<GradientStop>,
}

/// Directional light configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LightConfig {
    /// Direction the light shines toward, normalized on use.
    pub direction: [f32; 3],
    /// Linear RGB light color.
    pub color: [f32; 3],
    /// Intensity multiplier.
    pub intensity: f32,
    /// Specular exponent for the planet shader.
    pub shininess: f32,
}

/// Ocean overlay configuration. The ocean is always an icosphere.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OceanConfig {
    /// Draw the ocean overlay.
    pub enabled: bool,
    /// Ocean sphere radius.
    pub radius: f32,
    /// Ocean icosphere subdivision detail.
    pub detail: u32,
    /// Single noise layer shaping the water coverage.
    pub layer: NoiseLayerParams,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Filter directives, e.g. "info" or "debug,wgpu=warn".
    pub filter: String,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Tellus".to_string(),
        }
    }
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            geometry: GeometryParams::default(),
            seed: 0,
            layers: vec![NoiseLayerParams::default()],
            gradient: vec![
                GradientStop {
                    position: 0.0,
                    color: [0.0, 0.0, 0.0],
                },
                GradientStop {
                    position: 1.0,
                    color: [1.0, 1.0, 1.0],
                },
            ],
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            direction: [-0.4, -0.8, -0.45],
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
            shininess: 1.0,
        }
    }
}

impl Default for OceanConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: 0.4,
            detail: 3,
            layer: NoiseLayerParams {
                scale: 2.5,
                min_value: 0.0,
                strength: 1.0,
                ..Default::default()
            },
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info,wgpu=warn,naga=warn".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::Read)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::Parse)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::Write)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::Write)?;
        Ok(())
    }

    /// Re-read the config file. Returns `Some(new_config)` if it differs from
    /// `self`, `None` if nothing changed.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::Read)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::Parse)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Resolve the config directory: an explicit override, or the platform
    /// config dir, or the current directory as a last resort.
    pub fn resolve_config_dir(explicit: Option<&Path>) -> std::path::PathBuf {
        if let Some(dir) = explicit {
            return dir.to_path_buf();
        }
        dirs::config_dir()
            .map(|d| d.join("tellus"))
            .unwrap_or_else(|| std::path::PathBuf::from("."))
    }
}
