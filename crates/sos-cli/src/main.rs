//! Command-line SOS beacon
//!
//! Sends an SOS record with the last known location to a realtime database,
//! and reads the collection back for monitoring.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod handlers;

#[derive(Parser)]
#[command(name = "sos")]
#[command(about = "SOS beacon - one-shot emergency dispatch", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, default_value = ".sos/config.toml")]
    config: PathBuf,

    /// Override a config value, e.g. `--set database.collection=drills`
    #[arg(long = "set", global = true, value_name = "KEY=VALUE")]
    overrides: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one SOS record
    Send {
        /// Run against an in-memory store instead of the database
        #[arg(long)]
        dry_run: bool,
    },

    /// List the records in the collection with a summary
    List,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the effective configuration
    Config,

    /// Generate push keys
    Key {
        /// How many keys
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Send { dry_run } => {
            let config = config::load(&cli.config, &cli.overrides)?;
            handlers::send::handle_send(&config, dry_run).await?;
        }

        Commands::List => {
            let config = config::load(&cli.config, &cli.overrides)?;
            handlers::list::handle_list(&config).await?;
        }

        Commands::Init { force } => {
            handlers::init::handle_init(&cli.config, force)?;
        }

        Commands::Config => {
            let config = config::load(&cli.config, &cli.overrides)?;
            print!("{}", config.to_toml()?);
        }

        Commands::Key { count } => {
            handlers::key::handle_key(count);
        }
    }

    Ok(())
}
