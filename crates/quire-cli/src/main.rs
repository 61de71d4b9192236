//! Quire CLI
//!
//! Builds a blog's search and tag indexes and queries them from the
//! terminal.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use quire_cli::cli::{Cli, Command, ProfileAction};
use quire_cli::config::QuireConfig;
use quire_cli::{commands, config_handlers};
use quire_core::ConfigManager;
use quire_profile::YearMonth;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(config_path: Option<&str>) -> Result<QuireConfig> {
    let config = QuireConfig::load(config_path).context("Failed to load configuration")?;
    tracing::debug!(?config, "Configuration loaded");
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.as_deref();

    match cli.command {
        // runs without loading the config so a broken file can be repaired
        Command::Config { action } => {
            println!("{}", config_handlers::handle_config_command(config_path, action)?);
        }
        Command::Build {
            content_dir,
            if_changed,
        } => {
            let config = load_config(config_path)?;
            let (content_dir, paths) = commands::build_target(&config, content_dir);
            let stats = commands::build(&config, &content_dir, &paths, if_changed).await?;
            println!("{}", commands::render_build(&stats, &paths));
        }
        Command::List {
            tag,
            page,
            page_size,
        } => {
            let config = load_config(config_path)?;
            let catalog = commands::load_catalog(&config)?;
            let page_size = page_size.unwrap_or(config.listing.page_size);
            println!("{}", commands::list(&catalog, tag.as_deref(), page, page_size));
        }
        Command::Tags => {
            let config = load_config(config_path)?;
            let catalog = commands::load_catalog(&config)?;
            println!("{}", commands::tags(&catalog));
        }
        Command::Search { query, page } => {
            let config = load_config(config_path)?;
            let catalog = commands::load_catalog(&config)?;
            println!("{}", commands::search(&catalog, &config, &query, page));
        }
        Command::Toc { slug } => {
            let config = load_config(config_path)?;
            println!("{}", commands::toc(&config.content_dir(), &slug)?);
        }
        Command::Profile { action } => match action {
            ProfileAction::Validate { file } => {
                let summary = commands::profile_validate(&file)?;
                println!("{}", commands::render_validation(&summary));
                if !summary.is_valid {
                    return Ok(ExitCode::FAILURE);
                }
            }
            ProfileAction::Stats { file, json } => {
                let stats = commands::profile_stats(&file, YearMonth::current())?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&stats)?);
                } else {
                    println!("{}", commands::render_stats(&stats));
                }
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}
