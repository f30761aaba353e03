use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use train_clock::clock::LocalClock;
use train_clock::config::ClockConfig;
use train_clock::display::TracingDisplay;
use train_clock::jorudan::{JorudanClient, JorudanConfig, MockFetcher};
use train_clock::runner::Coordinator;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("train_clock=info")),
        )
        .init();

    let config = match ClockConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let display = TracingDisplay::new();
    let clock = Arc::new(LocalClock);

    // Offline mode serves canned pages instead of calling the site
    let coordinator = match &config.mock_pages {
        Some(dir) => {
            warn!("serving results pages from {}", dir.display());
            let fetcher = MockFetcher::from_dir(dir).unwrap_or_else(|e| {
                error!("failed to load mock pages: {e}");
                std::process::exit(1);
            });
            Coordinator::spawn(&config, fetcher, display, clock)
        }
        None => {
            let jorudan_config = JorudanConfig::new()
                .with_base_url(&config.base_url)
                .with_timeout(config.request_timeout_secs);
            let fetcher = JorudanClient::new(jorudan_config).unwrap_or_else(|e| {
                error!("failed to create HTTP client: {e}");
                std::process::exit(1);
            });
            Coordinator::spawn(&config, fetcher, display, clock)
        }
    };

    let coordinator = match coordinator {
        Ok(coordinator) => coordinator,
        Err(e) => {
            error!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for Ctrl-C: {e}");
    }
    info!("shutting down");

    if let Err(e) = coordinator.shutdown().await {
        error!("loop ended abnormally: {e}");
    }
}
