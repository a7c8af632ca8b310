//! Stock technical indicator CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use stockta_chart::setup_logging;
use stockta_config::{load_config, AppConfig};
use tracing::warn;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing file falls back to defaults; a broken one is an error.
    let config_found = cli.config.is_file();
    let config = if cli.command.uses_settings() && config_found {
        load_config(&cli.config)
            .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?
    } else {
        AppConfig::default()
    };

    // Setup logging
    let log_level = cli
        .log_level
        .map(|level| level.as_str().to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    let _log_guard = setup_logging(
        &log_level,
        cli.json_logs || config.logging.is_json(),
        config.logging.file.as_deref().map(Path::new),
    );

    if cli.command.uses_settings() {
        if !config_found {
            warn!(path = %cli.config.display(), "Config file not found, using defaults");
        }
        config.validate().context("Invalid configuration")?;
    }

    // Execute command
    match cli.command {
        Commands::Indicators(args) => cli::commands::indicators::run(args, &config),
        Commands::Bollinger(args) => cli::commands::bollinger::run(args, &config),
        Commands::Summary(args) => cli::commands::summary::run(args, &config),
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config),
        Commands::DefaultConfig => cli::commands::default_config::run(),
    }
}
