//! UCP Audit command-line shell.
//!
//! Wires raw input to the scanner and prints the result. Scoring logic lives
//! in the `crates/` directory.

pub mod cli;
pub mod output;

use anyhow::Context;
use cli::Cli;
use tracing::info;
use ucp_core::AppConfig;
use ucp_scanner::ScanOrchestrator;

/// Initialize tracing subscriber for logging.
///
/// Logs go to stderr so stdout carries only the report.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_filter = if verbose { "info,ucp=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let config = match &cli.config {
        Some(path) => {
            let mut config = AppConfig::load_from(path)
                .with_context(|| format!("loading config from {}", path.display()))?;
            config.apply_overrides(|key| std::env::var(key).ok())?;
            config
        }
        None => AppConfig::load_with_env().context("loading config")?,
    };
    Ok(config)
}

/// Run one audit for the parsed command line.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    init_tracing(cli.verbose);
    info!("Starting ucp-audit v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    let orchestrator = ScanOrchestrator::from_config(&config)?;

    let report = orchestrator.scan(&cli.url).await?;
    output::print_report(cli.json, &report, &config.disclaimer)
}
