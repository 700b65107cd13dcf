//! botstore - Entry Point
//!
//! Loads configuration, initializes logging, connects the Redis-backed store
//! and runs one command.

use anyhow::Context;
use botstore::cli::{Cli, execute};
use botstore_infrastructure::bootstrap::build_redis_store;
use botstore_infrastructure::config::ConfigLoader;
use botstore_infrastructure::logging::init_logging;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load().context("Failed to load configuration")?;

    init_logging(config.logging.clone()).context("Failed to initialize logging")?;
    loader.log_source();

    let store = build_redis_store(&config.store).context("Failed to set up the state store")?;
    let output = execute(&store, &cli.command).await?;
    println!("{output}");
    Ok(())
}
