//! Binary entry point for the Tellus planet viewer.

mod orbit;
mod scene;
mod window;

use clap::Parser;
use tellus_config::{CliArgs, Config};

fn main() {
    let args = CliArgs::parse();

    let config_dir = Config::resolve_config_dir(args.config.as_deref());
    let mut config = match Config::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config from {}: {e}", config_dir.display());
            std::process::exit(1);
        }
    };
    config.apply_cli_overrides(&args);

    tellus_log::init_logging(
        &config.log.filter,
        Some(&config_dir.join("logs")),
        cfg!(debug_assertions),
    );

    window::run_with_config(config, config_dir);
}
