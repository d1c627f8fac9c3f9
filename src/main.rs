//! fragkit - batch tools for a page-fragment content pipeline.

mod archive;
mod cli;
mod config;
mod fix;
mod logger;
mod placeholder;

use anyhow::{Context, Result};
use archive::archive_fragments;
use clap::Parser;
use cli::{Cli, Commands};
use config::FragkitConfig;
use fix::FixMode;

fn main() {
    if let Err(err) = run() {
        log!("error"; "{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Zip { .. } => zip_all(&config),
        Commands::Fix { .. } => fix_all(&config, cli.is_check()),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<FragkitConfig> {
    let config = FragkitConfig::load(cli)?;
    if config.config_path.exists() {
        log!("config"; "using {}", config.config_path.display());
    }
    config.validate(cli)?;
    Ok(config)
}

/// Archive every configured fragment.
fn zip_all(config: &FragkitConfig) -> Result<()> {
    log!("zip"; "creating individual fragment archives...");
    archive_fragments(&config.zip.source, &config.zip.output, &config.zip.fragments)
        .context("Failed to create fragment archives")?;
    Ok(())
}

/// Namespace config variables in every matching template.
fn fix_all(config: &FragkitConfig, check: bool) -> Result<()> {
    let mode = if check { FixMode::Check } else { FixMode::Apply };
    fix::fix_all(&config.fix.variables, &config.fix.pattern, mode)?;
    Ok(())
}
