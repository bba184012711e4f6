//! VirtualRPG server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p rpg-api
//! ```
//!
//! Configuration is read from the environment and an optional `.env` file.

use rpg_common::{try_init_tracing, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Tracing first, config loading logs warnings
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting VirtualRPG server...");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        address = %config.server.address(),
        "Configuration loaded"
    );

    rpg_api::run(config).await?;

    Ok(())
}
