//! Configuration for the planet viewer.
//!
//! Settings persist to disk as a RON file with CLI overrides via clap.
//! Missing sections take defaults, so old config files keep loading as the
//! tree grows.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, LightConfig, LogConfig, OceanConfig, PlanetConfig, WindowConfig};
pub use error::ConfigError;
