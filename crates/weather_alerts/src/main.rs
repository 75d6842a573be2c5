// Rust guideline compliant 2026-08-22

//! Weather-alert service entry point.
//!
//! Wires the core components (`WeatherClient`, `AlertEvaluator` via the
//! submission workflow) to their production adapters (`SqliteStore`,
//! `JsonlSink`) and serves the HTTP API.
//!
//! # Usage
//!
//! ```text
//! OPEN_WEATHER_MAP_API_KEY=... RUST_LOG=info cargo run
//!
//! # Also show per-request debug output
//! OPEN_WEATHER_MAP_API_KEY=... RUST_LOG=debug cargo run
//! ```
//!
//! `weather_alerts.db` and `alerts.jsonl` are created in the working
//! directory on first use; see `config.rs` for the overriding variables.

mod adapters;
mod api;
mod config;
mod workflow;

use adapters::jsonl_sink::JsonlSink;
use adapters::sqlite_store::SqliteStore;
use anyhow::Context as _;
use api::handlers::AppState;
use api::routes::create_router;
use config::AppConfig;
use std::sync::Arc;
use weather_client::{WeatherClient, WeatherClientConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize the tracing subscriber before any async work.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // A .env file is optional; real environment variables win.
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env().context("failed to load configuration")?;

    let client_config = WeatherClientConfig::builder(config.api_key.clone())
        .base_url(config.base_url.clone())
        .build()
        .context("failed to build weather client config")?;
    let weather = WeatherClient::new(client_config).context("failed to build weather client")?;

    let store = SqliteStore::new(&config.database_url)
        .await
        .context("failed to open record store")?;
    let sink = JsonlSink::new(config.alerts_file.clone());

    let state = Arc::new(AppState { weather, store, sink });
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "weather_alerts.listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

/// Resolve when CTRL+C is received, letting in-flight requests finish.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("main.shutdown: ctrl_c received"),
        Err(e) => tracing::error!(error = %e, "main.shutdown: ctrl_c listener failed"),
    }
}
