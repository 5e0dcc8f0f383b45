//! Cute Cats - Entry Point
//!
//! Loads `.env`, the configuration file and secrets, initializes logging and
//! starts the HTTP server.

use cute_cats::{config::Config, run};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; secrets may already be in the environment
    dotenvy::dotenv().ok();

    let config = Config::load_default()?;

    init_logging(&config.logging)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Cute Cats"
    );

    run(config).await
}

/// Initialize logging based on configuration
fn init_logging(config: &cute_cats::config::LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
