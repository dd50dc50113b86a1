//! Resona CLI - inspect parameter tables, state blobs and presets.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "resona")]
#[command(author, version, about = "Resona parameter tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the resonator parameter table
    Params(commands::params::ParamsArgs),

    /// Decode a state blob and print its values
    Inspect(commands::inspect::InspectArgs),

    /// Convert a state blob into a TOML preset
    Export(commands::export::ExportArgs),

    /// Convert a TOML preset into a state blob
    Import(commands::import::ImportArgs),

    /// List user presets
    Presets(commands::presets::PresetsArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Params(args) => commands::params::run(args),
        Commands::Inspect(args) => commands::inspect::run(args),
        Commands::Export(args) => commands::export::run(args),
        Commands::Import(args) => commands::import::run(args),
        Commands::Presets(args) => commands::presets::run(args),
    }
}
