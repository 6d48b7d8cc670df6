//! Alerta notifications - polls Alerta and routes alerts to channels

#![allow(missing_docs)]

use alerta_notifications::utils::logging::{LogFormat, init_tracing};
use alerta_notifications::utils::signal::shutdown_signal;
use alerta_notifications::{Config, Notifier};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "notifications", version, about)]
struct Cli {
    /// Path to the YAML configuration file
    config: PathBuf,

    /// Render and log notifications without sending or updating anything
    #[arg(long)]
    dry_run: bool,

    /// Log level or filter directives; RUST_LOG takes precedence
    #[arg(long, env = "NOTIFICATIONS_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(&cli.log_level, cli.log_format) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> alerta_notifications::Result<()> {
    let config = Config::from_file(&cli.config).await?;
    info!("Configuration loaded from {}", cli.config.display());

    let dry_run = cli.dry_run || config.dry_run();
    let mut notifier = Notifier::new(&config, dry_run)?;
    notifier.run(shutdown_signal()).await;

    info!("Exiting");
    Ok(())
}
