//! cachepack CLI entrypoint.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod handlers;

use commands::{Commands, ConfigCommands, OptionsCommands};
use config::CliConfig;

#[derive(Parser)]
#[command(name = "cachepack")]
#[command(author, version, about = "Cache archiving support utilities", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::load().unwrap_or_default(),
    };
    tracing::debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::Compression => handlers::compression().await?,
        Commands::Version { app } => handlers::version(&app).await?,
        Commands::Resolve { patterns } => handlers::resolve(&patterns)?,
        Commands::TempDir => handlers::temp_dir().await?,
        Commands::Options { command } => match command {
            OptionsCommands::Upload { json } => handlers::upload_options(&config, json.as_deref())?,
            OptionsCommands::Download { json } => {
                handlers::download_options(&config, json.as_deref())?
            }
        },
        Commands::Size { path } => handlers::size(&path).await?,
        Commands::Rm { path } => handlers::remove(&path).await?,
        Commands::Config { command } => match command {
            ConfigCommands::Show => handlers::show_config(&config)?,
        },
    }

    Ok(())
}
