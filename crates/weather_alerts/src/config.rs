// Rust guideline compliant 2026-08-22

//! Environment configuration for the `weather_alerts` binary.
//!
//! The core crates perform no environment lookup themselves; everything
//! they need (credential, endpoints, file locations) is read here once at
//! startup and passed down as plain values.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Default SQLite database, created in the working directory on first run.
const DEFAULT_DATABASE_URL: &str = "sqlite:weather_alerts.db";
/// Default notification sink file.
const DEFAULT_ALERTS_FILE: &str = "alerts.jsonl";
/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Errors reading the service configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required environment variable `{name}`")]
    MissingVar {
        /// Name of the variable.
        name: &'static str,
    },
    /// A variable is set but cannot be parsed.
    #[error("invalid value for `{name}`: {reason}")]
    InvalidVar {
        /// Name of the variable.
        name: &'static str,
        /// Human-readable description of the problem.
        reason: String,
    },
}

/// Startup configuration for the service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to (`BIND_ADDR`).
    pub bind_addr: SocketAddr,
    /// SQLite database URL for the record store (`DATABASE_URL`).
    pub database_url: String,
    /// Weather provider API key (`OPEN_WEATHER_MAP_API_KEY`, required).
    pub api_key: String,
    /// Weather provider base URL (`OPEN_WEATHER_MAP_BASE_URL`).
    pub base_url: String,
    /// Notification sink file path (`ALERTS_FILE`).
    pub alerts_file: PathBuf,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] when `OPEN_WEATHER_MAP_API_KEY`
    /// is unset, or [`ConfigError::InvalidVar`] when `BIND_ADDR` does not
    /// parse as a socket address.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Split out from [`from_env`](Self::from_env) so tests can supply
    /// variables without mutating process state.
    ///
    /// # Errors
    ///
    /// Same conditions as [`from_env`](Self::from_env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("OPEN_WEATHER_MAP_API_KEY")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingVar { name: "OPEN_WEATHER_MAP_API_KEY" })?;
        let base_url = lookup("OPEN_WEATHER_MAP_BASE_URL")
            .unwrap_or_else(|| weather_client::DEFAULT_BASE_URL.to_owned());
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());
        let alerts_file =
            PathBuf::from(lookup("ALERTS_FILE").unwrap_or_else(|| DEFAULT_ALERTS_FILE.to_owned()));
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidVar { name: "BIND_ADDR", reason: e.to_string() })?;

        Ok(Self { bind_addr, database_url, api_key, base_url, alerts_file })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
