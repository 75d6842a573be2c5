// Rust guideline compliant 2026-08-22

//! Router assembly for the weather-record API.

use crate::api::handlers::{AppState, create_weather, get_weather};
use axum::Router;
use axum::routing::{get, post};
use domain::{AlertSink, RecordStore, WeatherApi};
use std::sync::Arc;

/// Build the service router over any combination of port adapters.
pub fn create_router<W, R, S>(state: Arc<AppState<W, R, S>>) -> Router
where
    W: WeatherApi + Send + Sync + 'static,
    R: RecordStore + Send + Sync + 'static,
    S: AlertSink + Send + Sync + 'static,
{
    Router::new()
        .route("/api/v1/weather", post(create_weather::<W, R, S>))
        .route("/api/v1/weather/{id}", get(get_weather::<W, R, S>))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
