//! Vision Dashboard - Main Entry Point
//!
//! Polls the detection service and shows connection health, detected
//! objects, AI guidance and the service log in the terminal.

mod constants;
mod error;
mod logic;
mod ui;

use std::fs::OpenOptions;

use anyhow::{Context, Result};

use error::DashboardError;
use logic::config::LogSink;
use logic::{DashboardConfig, PollLoop, StatusClient};
use ui::{quit_requested, HeadlessPresenter, TuiPresenter};

fn init_logging(sink: &LogSink) -> Result<(), DashboardError> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    if let LogSink::File(path) = sink {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| DashboardError::LogFile {
                path: path.display().to_string(),
                source,
            })?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

async fn run(config: DashboardConfig) -> Result<()> {
    let client = StatusClient::new(&config).context("failed to create status client")?;
    log::info!("   Status: {}", client.status_url());
    let mut poll = PollLoop::new(client, &config);

    poll.announce("Dashboard initialized");
    poll.announce("Connecting to detection service...");

    if config.headless {
        let mut presenter = HeadlessPresenter::new();
        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::warn!("Cannot listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        };
        poll.run_until(&mut presenter, shutdown).await?;
    } else {
        let mut presenter = TuiPresenter::enter().context("failed to set up terminal")?;
        let result = poll.run_until(&mut presenter, quit_requested()).await;
        presenter.restore().context("failed to restore terminal")?;
        result?;
    }

    let stats = poll.engine().stats();
    log::info!(
        "Dashboard stopped ({:?}): {} polls, {} ok, {} failed, {} stale",
        poll.engine().connection_state(),
        stats.dispatched,
        stats.succeeded,
        stats.failed,
        stats.discarded
    );
    Ok(())
}

fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();

    init_logging(&LogSink::from_env())?;
    if let Ok(path) = &dotenv {
        log::info!("Loaded environment from {}", path.display());
    }

    let config = DashboardConfig::from_env();

    log::info!("Starting {} v{}...", constants::APP_NAME, constants::APP_VERSION);
    log::info!("   Poll interval: {}ms", config.poll_interval.as_millis());
    log::info!("   Profile: {}", config.profile);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    runtime.block_on(run(config))
}
