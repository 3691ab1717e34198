//! Contas main entry point

use anyhow::Context;
use clap::{Parser, Subcommand};
use contas_api::start_server;
use contas_config::{Config, ConfigError};
use contas_core::{schedule, DefaultErrorLogger, ErrorContext, ErrorLogger, Tracker, TrackerSettings};
use contas_report::{Exporter, ReportInput};
use contas_store::Store;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::RwLock;

#[derive(Parser, Debug)]
#[command(name = "contas")]
#[command(author = "Contas Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight personal bill tracker with PDF reports", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the local web interface (default)
    Serve,
    /// Write the PDF report without starting the server
    Export {
        /// Output directory, defaults to `report.output_dir`
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the default configuration file
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(Command::InitConfig) = args.command {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let loaded = Config::load(&args.config);
    let config = match &loaded {
        Ok(config) => config.clone(),
        Err(ConfigError::FileNotFound { .. }) => Config::default(),
        Err(e) => return Err(anyhow::anyhow!("{}", e.to_details())),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str())).init();

    match loaded {
        Ok(_) => log::info!("Config loaded from {}", args.config.display()),
        Err(e) => log::warn!("{}, using default configuration", e),
    }

    let store = Store::json_file(config.storage.path.clone());
    let tracker = Tracker::open(store, TrackerSettings::from_config(&config));
    // An unwritable storage.path is fatal at startup.
    if let Err(e) = tracker.flush() {
        DefaultErrorLogger.log_error(&e, &ErrorContext::new("open_store"));
        return Err(anyhow::anyhow!("{}", e.to_details()));
    }

    let rt = Runtime::new()?;
    match args.command {
        Some(Command::Export { output }) => rt.block_on(export(&config, &tracker, output)),
        _ => {
            let tracker = Arc::new(RwLock::new(tracker));
            rt.block_on(start_server(config, tracker))
                .context("server failed")
        }
    }
}

async fn export(config: &Config, tracker: &Tracker, output: Option<PathBuf>) -> anyhow::Result<()> {
    let dir = output.unwrap_or_else(|| config.report.output_dir.clone());
    let input = ReportInput::from_tracker(tracker, schedule::today(), &config.report.author);

    let path = Exporter::new(&config.report)
        .export_to_dir(&input, &dir)
        .await
        .context("could not export the report")?;

    println!("{}", path.display());
    Ok(())
}
