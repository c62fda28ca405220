//! drivecuectl - vehicle telemetry polling and driving-state monitor
//!
//! Polls a vehicle data service for one vehicle, keeps a smoothed snapshot
//! on a seekable scenario clock, and classifies driving behaviour from the
//! most recent samples.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod config;
mod error;
mod output;
mod session;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{ConfigCommands, RunArgs, SeekArgs};
use crate::config::{DriveCueConfig, SourceKind};
use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(name = "drivecuectl")]
#[command(about = "Vehicle telemetry poller and driving-state monitor")]
#[command(version)]
#[command(long_about = "
drivecuectl polls a vehicle data service for one vehicle, maps the service's
timestamps onto a seekable scenario clock, smooths implausible position jumps
and classifies the current driving state (STARTUP, STOPPED, CRUISING, ACTIVE,
DEMANDING) from the last five samples.

Use --source sample to run offline against a built-in response.
Use --json for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output in JSON format for machine parsing
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// YAML configuration file
    #[arg(short, long, global = true, env = "DRIVECUE_CONFIG")]
    config: Option<PathBuf>,

    /// Vehicle (user) id to poll
    #[arg(long, global = true)]
    vehicle: Option<String>,

    /// Telemetry source
    #[arg(long, global = true, value_enum)]
    source: Option<SourceKind>,

    /// Service host or base URL
    #[arg(long, global = true)]
    host: Option<String>,

    /// Service API key
    #[arg(long, global = true, env = "DRIVECUE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Poll continuously and report the driving state until Ctrl-C
    Run(RunArgs),

    /// Poll once and show the full vehicle snapshot
    Snapshot,

    /// Jump the scenario clock, then show the snapshot
    Seek(SeekArgs),

    /// List configured scenario bookmarks
    Bookmarks,

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

impl Cli {
    /// Configuration file (or defaults) with command-line overrides applied.
    fn effective_config(&self) -> Result<DriveCueConfig> {
        let mut config = match &self.config {
            Some(path) => DriveCueConfig::load_from_path(path)?,
            None => DriveCueConfig::default(),
        };

        if let Some(vehicle) = &self.vehicle {
            config.vehicle_id = vehicle.clone();
        }
        if let Some(source) = self.source {
            config.source = source;
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(api_key) = &self.api_key {
            config.api_key = Some(api_key.clone());
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "drivecuectl={log_level},drivecue_telemetry={log_level},\
                     drivecue_classifier={log_level},drivecue_source={log_level}"
                )
                .into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let result = execute_command(&cli).await;

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            std::process::exit(exit_code);
        }
    }
}

async fn execute_command(cli: &Cli) -> Result<()> {
    let config = cli.effective_config()?;

    match &cli.command {
        Commands::Run(args) => commands::run::execute(args, &config, cli.json).await,
        Commands::Snapshot => commands::snapshot::execute(&config, cli.json).await,
        Commands::Seek(args) => commands::seek::execute(args, &config, cli.json).await,
        Commands::Bookmarks => commands::bookmarks::execute(&config, cli.json),
        Commands::Config(cmd) => commands::config::execute(cmd, &config, cli.json),
    }
}
