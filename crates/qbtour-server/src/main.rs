use std::sync::Arc;

use anyhow::Context;
use qbtour::{DbConfig, Executor, connect_pool};
use qbtour_server::{AppState, HttpConfig, serve};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .init();

    let db_config = DbConfig::from_env().context("invalid database settings")?;
    let http_config = HttpConfig::from_env()?;
    let pool = connect_pool(&db_config)
        .await
        .context("failed to connect to database")?;
    let executor = Executor::new(db_config);
    tracing::debug!(config = ?executor.config(), ?http_config, "loaded configuration");

    let state = Arc::new(AppState::new(pool, executor));

    serve(&http_config, state).await
}
