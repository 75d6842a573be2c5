// Rust guideline compliant 2026-08-22

//! Submission orchestration: save the record, fetch current weather, then
//! evaluate alerts. Strictly sequential, one provider call and at most one
//! sink write per breaching threshold, no internal retry.

use domain::{AlertSink, RecordStore, StoreError, WeatherApi, WeatherError, WeatherRecord};
use evaluator::{AlertEvaluator, EvaluateError};

/// Errors from a submission run. Each step's failure propagates unchanged;
/// earlier steps are not rolled back (a saved record stays saved when the
/// provider call fails).
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// The record could not be persisted.
    #[error("record store error: {0}")]
    Store(#[from] StoreError),
    /// The weather provider call failed.
    #[error("weather fetch error: {0}")]
    Weather(#[from] WeatherError),
    /// Threshold evaluation or notification emission failed.
    #[error("alert evaluation error: {0}")]
    Evaluate(#[from] EvaluateError),
}

/// Run one submission end to end: persist `record`, fetch the temperature
/// for its coordinates, and emit a notification per breaching threshold.
///
/// Returns the number of notifications emitted.
///
/// # Errors
///
/// Returns [`WorkflowError`] for the first failing step; see the enum for
/// the step-to-variant mapping.
pub async fn process_submission<W, R, S>(
    record: &WeatherRecord,
    weather: &W,
    store: &R,
    sink: &S,
) -> Result<usize, WorkflowError>
where
    W: WeatherApi,
    R: RecordStore,
    S: AlertSink,
{
    store.save(record).await?;
    let temperature = weather.fetch_temperature(record.query).await?;
    let emitted = AlertEvaluator::new()
        .evaluate(temperature, &record.alerts, &record.destination, sink)
        .await?;
    tracing::info!(record_id = %record.id, temperature, emitted, "workflow.submission.processed");
    Ok(emitted)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
