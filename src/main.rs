//! Skyroute CLI entry point.

use clap::Parser;

use skyroute::cli::{Cli, Commands};
use skyroute::infrastructure::logging::{LogConfig, LoggerImpl};
use skyroute::ConfigLoader;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => skyroute::cli::handle_error(err, cli.json),
    };

    let _logger = match LoggerImpl::init(&LogConfig::from(&config.logging)) {
        Ok(logger) => Some(logger),
        Err(err) => {
            eprintln!("Warning: logging disabled: {err:#}");
            None
        }
    };

    let result = match cli.command {
        Commands::Locations(args) => {
            skyroute::cli::commands::locations::execute(args, &config, cli.json).await
        }
        Commands::Flights(args) => {
            skyroute::cli::commands::flights::execute(args, &config, cli.json).await
        }
        Commands::Field(args) => skyroute::cli::commands::field::execute(args, &config, cli.json).await,
    };

    if let Err(err) = result {
        skyroute::cli::handle_error(err, cli.json);
    }
}
