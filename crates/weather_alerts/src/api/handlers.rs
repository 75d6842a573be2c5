// Rust guideline compliant 2026-08-22

//! Request handlers for the weather-record API.
//!
//! Handlers are generic over the three hexagonal ports so they can be
//! exercised in tests with in-memory doubles and in production with the
//! reqwest/sqlx/file adapters, without any code change in between.

use crate::api::error::ApiError;
use crate::workflow;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use domain::{
    AlertSink, AlertThresholds, RecordStore, WeatherApi, WeatherQuery, WeatherRecord,
    validate_alerts,
};
use serde::Deserialize;
use std::sync::Arc;

/// Shared application state: one adapter per hexagonal port.
#[derive(Debug)]
pub struct AppState<W, R, S> {
    /// Weather provider adapter.
    pub weather: W,
    /// Record persistence adapter.
    pub store: R,
    /// Notification sink adapter.
    pub sink: S,
}

/// Body of `POST /api/v1/weather`.
#[derive(Debug, Deserialize)]
pub struct CreateWeatherRequest {
    /// Latitude in whole degrees.
    pub lat: i32,
    /// Longitude in whole degrees.
    pub lon: i32,
    /// Free-text notification target.
    pub destination: String,
    /// Alert thresholds; validated against the rule registry.
    pub alerts: AlertThresholds,
}

/// Submit a record: validate, persist, fetch weather, evaluate alerts.
///
/// Responds `201` with the stored record. Alert evaluation runs before the
/// response, so a provider failure surfaces as `502` even though the
/// record was already durably saved.
///
/// # Errors
///
/// Returns [`ApiError`] per the mappings in [`crate::api::error`].
pub async fn create_weather<W, R, S>(
    State(state): State<Arc<AppState<W, R, S>>>,
    Json(request): Json<CreateWeatherRequest>,
) -> Result<(StatusCode, Json<WeatherRecord>), ApiError>
where
    W: WeatherApi + Send + Sync,
    R: RecordStore + Send + Sync,
    S: AlertSink + Send + Sync,
{
    validate_alerts(&request.alerts)?;
    let record = WeatherRecord {
        id: uuid::Uuid::new_v4(),
        query: WeatherQuery { lat: request.lat, lon: request.lon },
        destination: request.destination,
        alerts: request.alerts,
    };
    workflow::process_submission(&record, &state.weather, &state.store, &state.sink).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Fetch a previously submitted record by id.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] for an unknown id, or
/// [`ApiError::Internal`] when the store fails.
pub async fn get_weather<W, R, S>(
    State(state): State<Arc<AppState<W, R, S>>>,
    Path(id): Path<uuid::Uuid>,
) -> Result<Json<WeatherRecord>, ApiError>
where
    W: WeatherApi + Send + Sync,
    R: RecordStore + Send + Sync,
    S: AlertSink + Send + Sync,
{
    let record = state.store.load(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(record))
}
