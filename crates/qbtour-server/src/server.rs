//! # HTTP Server
//!
//! Builds the router and serves it until the process exits.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::HttpConfig;
use crate::routes::{AppState, tour_routes};

/// Build the router with request tracing applied.
pub fn build_router(state: Arc<AppState>) -> Router {
    tour_routes(state).layer(TraceLayer::new_for_http())
}

/// Bind to `config` and serve the tour routes.
pub async fn serve(config: &HttpConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.socket_addr()).await?;
    tracing::info!("Server is running on {}", config.port);

    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
