//! CLI argument types.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::field::FieldArgs;
use super::commands::flights::FlightsArgs;
use super::commands::locations::LocationsArgs;

/// Top-level command line.
#[derive(Parser)]
#[command(name = "skyroute")]
#[command(about = "Skyroute - airport lookup and flight search", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .skyroute/config.yaml)
    #[arg(short, long, global = true, env = "SKYROUTE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Skyroute subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Look up airports and cities matching a query
    Locations(LocationsArgs),

    /// Search itineraries between two looked-up locations
    Flights(FlightsArgs),

    /// Interactive search-as-you-type location field driven by stdin
    Field(FieldArgs),
}
