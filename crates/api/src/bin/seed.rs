//! Replaces the contents of the sample table with the fixed seed batch.
//!
//! Requires `DATABASE_URL`. Runs migrations first so a fresh database can be
//! seeded in one step.

use std::process::ExitCode;

use api::config::Config;
use sample_store::PostgresSampleStore;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let Some(url) = config.database_url.as_deref() else {
        tracing::error!("DATABASE_URL must be set to seed the sample table");
        return ExitCode::FAILURE;
    };

    match run(url, config.database_max_connections).await {
        Ok(count) => {
            tracing::info!(count, "seeding completed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "error seeding database");
            ExitCode::FAILURE
        }
    }
}

async fn run(url: &str, max_connections: u32) -> sample_store::Result<usize> {
    let store = PostgresSampleStore::connect(url, max_connections).await?;
    store.run_migrations().await?;
    let inserted = sample_store::seed(&store).await?;
    Ok(inserted.len())
}
