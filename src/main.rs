//! Wagerhouse server binary
//!
//! Loads configuration, starts the crash table driver and serves the
//! HTTP API until interrupted.

use clap::Parser;
use std::sync::Arc;
use tracing::info;
use wagerhouse::api::ApiServer;
use wagerhouse::config::{generate_sample_config, ConfigLoader};
use wagerhouse::coordinator::WagerCoordinator;
use wagerhouse::games::crash::spawn_driver;
use wagerhouse::rng::ThreadRngSource;

#[derive(Parser, Debug)]
#[command(name = "wagerhouse", about = "Chance-based wagering engine", version)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Write a sample configuration file to the given path and exit
    #[arg(long)]
    generate_config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wagerhouse=info,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();

    if let Some(path) = args.generate_config {
        generate_sample_config(&path)?;
        info!("sample configuration written to {}", path);
        return Ok(());
    }

    let mut loader = ConfigLoader::new();
    if let Some(ref path) = args.config {
        loader = loader.with_path(path);
    }
    let config = loader.load()?;

    info!(
        cases = config.cases.len(),
        promos = config.promos.len(),
        seed_accounts = config.accounts.len(),
        "configuration loaded"
    );

    let api_config = config.api.clone();
    let coordinator = Arc::new(WagerCoordinator::new(config, Arc::new(ThreadRngSource)));

    // One driver task paces the shared crash table for all players.
    let driver = spawn_driver(Arc::clone(coordinator.crash_table()));

    ApiServer::new(api_config, coordinator).run().await?;

    driver.abort();
    Ok(())
}
