//! folio-sync entry point.
//!
//! `run` executes the named flow(s) once and prints the reports;
//! `serve` starts the timer and, unless disabled, the HTTP trigger.

use anyhow::Result;
use clap::{Parser, Subcommand};
use folio_core::FlowKind;
use folio_sync::{AppConfig, Application, Secrets, CONFIG_ENV};
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

/// Ledger reconciliation service
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via FOLIO_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one reconciliation pass and exit
    Run {
        /// Flow to run: cash, holding or both
        #[arg(long, default_value = "both", value_parser = FlowKind::from_str)]
        flow: FlowKind,
    },
    /// Run on a timer, with the HTTP trigger unless disabled
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Tokens may live in a local .env during development
    dotenvy::dotenv().ok();

    let args = Args::parse();

    folio_telemetry::init_logging()?;
    info!("Starting folio-sync v{}", env!("CARGO_PKG_VERSION"));

    // Determine config path: CLI arg > FOLIO_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var(CONFIG_ENV).ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");
    let config = AppConfig::from_file(&config_path)?;
    config.validate()?;

    let app = Arc::new(Application::new(config, Secrets::from_env())?);

    match args.command {
        Command::Run { flow } => {
            let reports = app.run_flow(flow).await?;
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        Command::Serve => {
            let scheduler = tokio::spawn(Arc::clone(&app).run_scheduler());

            if app.config().trigger.enabled {
                let port = app.config().trigger.port;
                folio_sync::server::run_server(app, port).await?;
            } else {
                scheduler.await?;
            }
        }
    }

    Ok(())
}
