//! Medira Server — application entry point.

use medira_db::{DbConfig, DbManager, run_migrations};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("medira=info".parse().unwrap()),
        )
        .json()
        .init();

    tracing::info!("Starting Medira server...");

    let config = DbConfig::from_env();
    let manager = match DbManager::connect(&config).await {
        Ok(m) => m,
        Err(e) => {
            tracing::error!(error = %e, "database connection failed");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(manager.client()).await {
        tracing::error!(error = %e, "migrations failed");
        std::process::exit(1);
    }

    tracing::info!(
        namespace = %config.namespace,
        database = %config.database,
        "Medira server ready"
    );

    // TODO: mount the HTTP transport once the API crate lands.

    tracing::info!("Medira server stopped.");
}
