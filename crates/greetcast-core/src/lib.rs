pub mod config;

pub use config::{Config, ProviderConfig, ServerConfig, ValidationResult};

use anyhow::Result;

/// Initialize tracing for the service
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("greetcast core initialized");
    Ok(())
}
