// Rust guideline compliant 2026-08-21

//! `WeatherClient` component -- fetches current-weather temperatures from an
//! OpenWeatherMap-compatible provider over HTTP.
//!
//! Entry point: [`WeatherClient::new`], then the `domain::WeatherApi` port.
//! Configuration via [`WeatherClientConfig::builder`].

use domain::{WeatherApi, WeatherError, WeatherQuery};
use std::time::Duration;

/// Default provider base URL (OpenWeatherMap current-weather API).
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/";

// ---------------------------------------------------------------------------
// WeatherClientError
// ---------------------------------------------------------------------------

/// Errors that can occur while constructing a [`WeatherClient`].
///
/// Fetch-time failures are reported through `domain::WeatherError` instead,
/// since they are part of the `WeatherApi` port contract.
#[derive(Debug, thiserror::Error)]
pub enum WeatherClientError {
    /// The supplied configuration is invalid.
    #[error("invalid weather client configuration: {reason}")]
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// WeatherClientConfig + builder
// ---------------------------------------------------------------------------

/// Runtime configuration for a [`WeatherClient`].
///
/// Construct via [`WeatherClientConfig::builder`].
#[derive(Debug)]
pub struct WeatherClientConfig {
    /// Provider base URL; the `weather/` path is appended to it.
    pub base_url: String,
    /// Provider API key credential, sent as the `appid` query parameter.
    pub api_key: String,
    /// Optional transport timeout. `None` leaves the transport default.
    pub timeout: Option<Duration>,
}

/// Builder for [`WeatherClientConfig`].
///
/// Obtain via [`WeatherClientConfig::builder`]; finalize with [`build`](Self::build).
#[derive(Debug)]
pub struct WeatherClientConfigBuilder {
    base_url: String,
    api_key: String,
    timeout: Option<Duration>,
}

impl WeatherClientConfig {
    /// Create a builder. `api_key` is the only required parameter.
    ///
    /// Default values: `base_url = `[`DEFAULT_BASE_URL`], `timeout = None`.
    #[must_use]
    pub fn builder(api_key: impl Into<String>) -> WeatherClientConfigBuilder {
        WeatherClientConfigBuilder {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: api_key.into(),
            timeout: None,
        }
    }
}

impl WeatherClientConfigBuilder {
    /// Override the provider base URL (e.g. to point at a test double).
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set a transport-level timeout. The client itself has no timeout or
    /// retry logic; this is the only place a deadline can be enforced.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherClientError::InvalidConfig`] when `api_key` or
    /// `base_url` is empty.
    #[must_use = "the Result must be checked; use ? or unwrap"]
    pub fn build(self) -> Result<WeatherClientConfig, WeatherClientError> {
        if self.api_key.is_empty() {
            return Err(WeatherClientError::InvalidConfig {
                reason: "api_key must be non-empty".to_owned(),
            });
        }
        if self.base_url.is_empty() {
            return Err(WeatherClientError::InvalidConfig {
                reason: "base_url must be non-empty".to_owned(),
            });
        }
        Ok(WeatherClientConfig {
            base_url: self.base_url,
            api_key: self.api_key,
            timeout: self.timeout,
        })
    }
}

// ---------------------------------------------------------------------------
// WeatherClient
// ---------------------------------------------------------------------------

/// `WeatherApi` adapter backed by `reqwest` against the provider's
/// current-weather endpoint.
///
/// One outbound request per `fetch_temperature` call; no retry, no local
/// state mutation. Credential and endpoint are fixed at construction.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl WeatherClient {
    /// Create a new client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherClientError::InvalidConfig`] when the underlying
    /// HTTP client cannot be constructed.
    pub fn new(config: WeatherClientConfig) -> Result<Self, WeatherClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| WeatherClientError::InvalidConfig {
            reason: format!("http client: {e}"),
        })?;
        let endpoint = format!("{}/weather/", config.base_url.trim_end_matches('/'));
        Ok(Self { http, endpoint, api_key: config.api_key })
    }
}

/// Extract `main.temp` from a provider response body.
fn extract_temperature(body: &serde_json::Value) -> Result<f64, WeatherError> {
    body.get("main")
        .and_then(|main| main.get("temp"))
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(|| WeatherError::MalformedResponse { field: "main.temp".to_owned() })
}

#[async_trait::async_trait]
impl WeatherApi for WeatherClient {
    /// Issue one `GET {base_url}/weather/` request with metric units and the
    /// configured credential, and return the reported temperature verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Transport`] when no response is received,
    /// [`WeatherError::Provider`] on any non-2xx status, or
    /// [`WeatherError::MalformedResponse`] when the body is not JSON or
    /// lacks `main.temp`.
    async fn fetch_temperature(&self, query: WeatherQuery) -> Result<f64, WeatherError> {
        tracing::debug!(lat = query.lat, lon = query.lon, "weather_client.fetch");
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("lat", query.lat.to_string()),
                ("lon", query.lon.to_string()),
                ("units", "metric".to_owned()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Transport { reason: e.to_string() })?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Provider { status: status.as_u16() });
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            tracing::debug!(error = %e, "weather_client.body_decode_failed");
            WeatherError::MalformedResponse { field: "main.temp".to_owned() }
        })?;

        let temperature = extract_temperature(&body)?;
        tracing::debug!(temperature, "weather_client.fetched");
        Ok(temperature)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
