pub mod cli;
pub mod core;

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::core::config::{load_layers, ConfigSource, InstallConfig};
use crate::core::downloader::Downloader;
use crate::core::error::InstallResult;
use crate::core::http::build_http_client;
use crate::core::launch::start_server;
use crate::core::loaders::{install_server, InstallContext};
use crate::core::modrinth::ModrinthClient;
use crate::core::process::SystemRunner;

/// Parse arguments, run the chosen command and report the outcome.
pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    // Initialize structured logging
    let default_filter = if cli.options.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    match execute(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Resolve configuration once, then dispatch.
pub async fn execute(cli: &Cli) -> InstallResult<()> {
    let sources = ConfigSource::discover(cli.options.config.as_deref());
    let layer = load_layers(&sources)?.merge(cli.options.to_layer());
    let config = InstallConfig::from_layer(layer)?;
    let runner = SystemRunner;

    match cli.command {
        Command::Install => {
            let http_client = build_http_client()?;
            let downloader = Downloader::new(http_client.clone());
            let modrinth = ModrinthClient::new(http_client.clone(), &config.endpoints.modrinth_api_url);
            let ctx = InstallContext {
                config: &config,
                http_client: &http_client,
                downloader: &downloader,
                modrinth: &modrinth,
                runner: &runner,
            };
            install_server(&ctx).await?;
        }
        Command::Start => start_server(&config, &runner).await?,
    }

    Ok(())
}
