//! Coverage submission CLI - main entry point.
//!
//! Reads Istanbul coverage output plus run metadata from the environment and
//! POSTs one normalized coverage record to the backend. Exits 0 on success,
//! 1 when the connectivity check, parse or submission fails.

use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use coverage_reporter::config::Config;
use coverage_reporter::services;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let config = Config::from_env();

    match services::run_report(&config).await {
        Ok(ack) => {
            info!(
                "Coverage data successfully sent to dashboard (id={}, project={})",
                ack.id, ack.project
            );
        }
        Err(e) => {
            error!("Failed to send coverage data: {}", e);
            std::process::exit(1);
        }
    }
}
