// Rust guideline compliant 2026-08-21

//! Shared domain types for the weather-alert service.
//!
//! Defines `WeatherQuery`, `AlertKind` (the alert-rule registry),
//! `AlertThresholds`, `WeatherRecord`, `AlertNotification`, threshold
//! validation, and the hexagonal port traits: `WeatherApi`, `AlertSink`,
//! and `RecordStore`. All service components depend on this crate; no
//! other workspace crate is imported here.

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap as _, SerializeSeq as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ---------------------------------------------------------------------------
// WeatherQuery
// ---------------------------------------------------------------------------

/// A coordinate pair submitted for a current-weather lookup.
///
/// Plain integers by contract; no range validation is performed here --
/// the weather provider is the source of truth for coordinate validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherQuery {
    /// Latitude in whole degrees.
    pub lat: i32,
    /// Longitude in whole degrees.
    pub lon: i32,
}

// ---------------------------------------------------------------------------
// AlertKind -- the alert-rule registry
// ---------------------------------------------------------------------------

/// Fixed, process-wide registry of named threshold comparisons.
///
/// Expressed as an exhaustive enum rather than stored comparator closures
/// so the registry stays serializable and dispatch is checked by the
/// compiler. This enum is the single source of truth for both threshold
/// validation and evaluation; it is read-only by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// Fires when the measured temperature drops below the threshold.
    MinTemp,
    /// Fires when the measured temperature rises above the threshold.
    MaxTemp,
}

impl AlertKind {
    /// Every registered alert kind, in registry order.
    pub const ALL: [Self; 2] = [Self::MinTemp, Self::MaxTemp];

    /// Registry name of this kind, as used in threshold mappings.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::MinTemp => "min_temp",
            Self::MaxTemp => "max_temp",
        }
    }

    /// Look up a kind by its registry name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// `true` only for registry-defined names (`min_temp`, `max_temp`).
    #[must_use]
    pub fn is_known(name: &str) -> bool {
        Self::from_name(name).is_some()
    }

    /// Apply this kind's comparator to a measured temperature.
    #[must_use]
    pub fn breaches(self, measured: f64, threshold: f64) -> bool {
        match self {
            Self::MinTemp => measured < threshold,
            Self::MaxTemp => measured > threshold,
        }
    }
}

// ---------------------------------------------------------------------------
// AlertThresholds
// ---------------------------------------------------------------------------

/// Ordered mapping from alert-kind name to a numeric threshold value.
///
/// Iteration order is insertion order (document order when deserialized
/// from JSON); no other ordering is guaranteed. Setting an existing key
/// overwrites its value without moving it. Keys are not checked against
/// the registry here -- that is [`validate_alerts`]' job, so an invalid
/// mapping can still be represented, reported, and logged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertThresholds {
    entries: Vec<(String, f64)>,
}

impl AlertThresholds {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, overwriting in place if `name` is present.
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Threshold configured for `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Number of configured thresholds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no threshold is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for AlertThresholds {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut thresholds = Self::new();
        for (name, value) in iter {
            thresholds.set(name, value);
        }
        thresholds
    }
}

impl Serialize for AlertThresholds {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AlertThresholds {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ThresholdsVisitor;

        impl<'de> Visitor<'de> for ThresholdsVisitor {
            type Value = AlertThresholds;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of alert-kind names to numeric thresholds")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut thresholds = AlertThresholds::new();
                while let Some((name, value)) = access.next_entry::<String, f64>()? {
                    thresholds.set(name, value);
                }
                Ok(thresholds)
            }
        }

        deserializer.deserialize_map(ThresholdsVisitor)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Errors reported by [`validate_alerts`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The thresholds mapping contains no entries.
    #[error("alerts mapping is empty")]
    EmptyAlerts,
    /// A key does not name any registered alert kind.
    #[error("unknown alert kind `{name}`")]
    UnknownAlertKind {
        /// The offending key.
        name: String,
    },
}

/// Check that `alerts` is non-empty and every key names a registered kind.
///
/// Called by the request-validation layer before a record is persisted, so
/// evaluation never sees an unknown key through the normal path.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyAlerts`] for an empty mapping, or
/// [`ValidationError::UnknownAlertKind`] for the first unregistered key.
pub fn validate_alerts(alerts: &AlertThresholds) -> Result<(), ValidationError> {
    if alerts.is_empty() {
        return Err(ValidationError::EmptyAlerts);
    }
    for (name, _) in alerts.iter() {
        if !AlertKind::is_known(name) {
            return Err(ValidationError::UnknownAlertKind { name: name.to_owned() });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// WeatherRecord
// ---------------------------------------------------------------------------

/// A stored submission: coordinates, notification target, and thresholds.
///
/// Created once on submission with a fresh UUID, immutable thereafter, and
/// read back by id. Serializes flat (`{id, lat, lon, destination, alerts}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// Opaque unique identifier (UUID v4).
    pub id: uuid::Uuid,
    /// Coordinates for the weather lookup.
    #[serde(flatten)]
    pub query: WeatherQuery,
    /// Free-text notification target (e.g. an email address).
    pub destination: String,
    /// Configured alert thresholds.
    pub alerts: AlertThresholds,
}

// ---------------------------------------------------------------------------
// AlertNotification
// ---------------------------------------------------------------------------

/// One triggered alert, as appended to the notification sink.
///
/// Carries the measured temperature, the *entire* thresholds mapping of the
/// record (not just the breaching entry), and the destination. Serializes
/// as the flat row `[temperature, alerts, destination]` and round-trips
/// exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertNotification {
    /// Measured temperature (metric units, as reported by the provider).
    pub temperature: f64,
    /// Full thresholds mapping of the originating record.
    pub alerts: AlertThresholds,
    /// Notification target copied from the record.
    pub destination: String,
}

impl Serialize for AlertNotification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut row = serializer.serialize_seq(Some(3))?;
        row.serialize_element(&self.temperature)?;
        row.serialize_element(&self.alerts)?;
        row.serialize_element(&self.destination)?;
        row.end()
    }
}

impl<'de> Deserialize<'de> for AlertNotification {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = AlertNotification;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a `[temperature, alerts, destination]` row")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let temperature = seq
                    .next_element::<f64>()?
                    .ok_or_else(|| serde::de::Error::invalid_length(0, &self))?;
                let alerts = seq
                    .next_element::<AlertThresholds>()?
                    .ok_or_else(|| serde::de::Error::invalid_length(1, &self))?;
                let destination = seq
                    .next_element::<String>()?
                    .ok_or_else(|| serde::de::Error::invalid_length(2, &self))?;
                Ok(AlertNotification { temperature, alerts, destination })
            }
        }

        deserializer.deserialize_seq(RowVisitor)
    }
}

// ---------------------------------------------------------------------------
// Port errors
// ---------------------------------------------------------------------------

/// Errors from the `WeatherApi` hexagonal port.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WeatherError {
    /// The provider responded with a non-success HTTP status.
    #[error("weather provider returned status {status}")]
    Provider {
        /// HTTP status code reported by the provider.
        status: u16,
    },
    /// The request never produced a provider response.
    #[error("weather provider request failed: {reason}")]
    Transport {
        /// Human-readable description of the transport failure.
        reason: String,
    },
    /// The provider response body lacks the expected temperature field.
    #[error("malformed provider response: missing `{field}`")]
    MalformedResponse {
        /// Dotted path of the missing field.
        field: String,
    },
}

/// Errors from the `AlertSink` hexagonal port.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SinkError {
    /// The notification could not be durably recorded.
    #[error("sink write failed: {reason}")]
    WriteFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

/// Errors from the `RecordStore` hexagonal port.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backing store rejected or could not complete the operation.
    #[error("record store unavailable: {reason}")]
    Unavailable {
        /// Human-readable description of the failure.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Hexagonal ports
// ---------------------------------------------------------------------------

/// Hexagonal port: current-weather acquisition from a remote provider.
///
/// Implementations make exactly one outbound call per invocation and hold
/// no mutable state, so repeated calls against an unchanged provider yield
/// identical results. Retry policy, if any, belongs to the caller.
#[async_trait::async_trait]
pub trait WeatherApi {
    /// Fetch the current temperature (metric units) for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Provider`] on a non-2xx provider status,
    /// [`WeatherError::Transport`] when the call itself fails, or
    /// [`WeatherError::MalformedResponse`] when the body lacks the
    /// temperature field.
    async fn fetch_temperature(&self, query: WeatherQuery) -> Result<f64, WeatherError>;
}

/// Hexagonal port: append-only notification sink.
///
/// Each append is one durable row. Appends are not transactional with the
/// weather fetch that caused them; a crash in between simply loses the
/// notification.
#[async_trait::async_trait]
pub trait AlertSink {
    /// Append one notification row to the sink.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::WriteFailed`] when the row cannot be recorded.
    async fn append(&self, notification: &AlertNotification) -> Result<(), SinkError>;
}

/// Hexagonal port: persistence for submitted weather records.
#[async_trait::async_trait]
pub trait RecordStore {
    /// Durably save `record`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when the write fails.
    async fn save(&self, record: &WeatherRecord) -> Result<(), StoreError>;

    /// Load a record by id; `Ok(None)` when no such record exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when the read fails.
    async fn load(&self, id: uuid::Uuid) -> Result<Option<WeatherRecord>, StoreError>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn thresholds(pairs: &[(&str, f64)]) -> AlertThresholds {
        pairs.iter().map(|&(n, v)| (n, v)).collect()
    }

    // ------------------------------------------------------------------
    // AlertKind registry
    // ------------------------------------------------------------------

    #[test]
    fn registry_names_are_fixed() {
        assert_eq!(AlertKind::MinTemp.name(), "min_temp");
        assert_eq!(AlertKind::MaxTemp.name(), "max_temp");
        assert_eq!(AlertKind::ALL.len(), 2);
    }

    #[test]
    fn from_name_resolves_registered_kinds_only() {
        assert_eq!(AlertKind::from_name("min_temp"), Some(AlertKind::MinTemp));
        assert_eq!(AlertKind::from_name("max_temp"), Some(AlertKind::MaxTemp));
        assert_eq!(AlertKind::from_name("humidity"), None);
    }

    #[test]
    fn is_known_true_only_for_registry_names() {
        assert!(AlertKind::is_known("min_temp"));
        assert!(AlertKind::is_known("max_temp"));
        assert!(!AlertKind::is_known(""));
        assert!(!AlertKind::is_known("MIN_TEMP"));
        assert!(!AlertKind::is_known("min_temp "));
    }

    #[test]
    fn min_temp_fires_below_threshold() {
        assert!(AlertKind::MinTemp.breaches(9.9_f64, 10.0_f64));
        assert!(!AlertKind::MinTemp.breaches(10.0_f64, 10.0_f64));
        assert!(!AlertKind::MinTemp.breaches(10.1_f64, 10.0_f64));
    }

    #[test]
    fn max_temp_fires_above_threshold() {
        assert!(AlertKind::MaxTemp.breaches(30.1_f64, 30.0_f64));
        assert!(!AlertKind::MaxTemp.breaches(30.0_f64, 30.0_f64));
        assert!(!AlertKind::MaxTemp.breaches(29.9_f64, 30.0_f64));
    }

    // ------------------------------------------------------------------
    // AlertThresholds
    // ------------------------------------------------------------------

    #[test]
    fn iteration_preserves_insertion_order() {
        let t = thresholds(&[("max_temp", 30.0), ("min_temp", 0.0)]);
        let order: Vec<&str> = t.iter().map(|(n, _)| n).collect();
        assert_eq!(order, ["max_temp", "min_temp"]);
    }

    #[test]
    fn set_overwrites_in_place() {
        let mut t = thresholds(&[("min_temp", 0.0), ("max_temp", 30.0)]);
        t.set("min_temp", -5.0);
        assert_eq!(t.get("min_temp"), Some(-5.0));
        assert_eq!(t.len(), 2);
        let order: Vec<&str> = t.iter().map(|(n, _)| n).collect();
        assert_eq!(order, ["min_temp", "max_temp"], "overwrite must not reorder");
    }

    #[test]
    fn json_round_trip_preserves_order() {
        let t: AlertThresholds =
            serde_json::from_str(r#"{"max_temp": 30, "min_temp": 0}"#).unwrap();
        let order: Vec<&str> = t.iter().map(|(n, _)| n).collect();
        assert_eq!(order, ["max_temp", "min_temp"]);

        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"{"max_temp":30.0,"min_temp":0.0}"#);

        let back: AlertThresholds = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn deserialize_rejects_non_numeric_threshold() {
        let result = serde_json::from_str::<AlertThresholds>(r#"{"min_temp": "cold"}"#);
        assert!(result.is_err());
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    #[test]
    fn validate_accepts_known_non_empty() {
        let t = thresholds(&[("min_temp", 0.0), ("max_temp", 30.0)]);
        assert_eq!(validate_alerts(&t), Ok(()));
    }

    #[test]
    fn validate_rejects_empty_mapping() {
        assert_eq!(validate_alerts(&AlertThresholds::new()), Err(ValidationError::EmptyAlerts));
    }

    #[test]
    fn validate_rejects_unknown_key() {
        let t = thresholds(&[("min_temp", 0.0), ("wind_speed", 12.0)]);
        assert_eq!(
            validate_alerts(&t),
            Err(ValidationError::UnknownAlertKind { name: "wind_speed".to_owned() })
        );
    }

    // ------------------------------------------------------------------
    // WeatherRecord wire shape
    // ------------------------------------------------------------------

    #[test]
    fn record_serializes_flat() {
        let record = WeatherRecord {
            id: uuid::Uuid::new_v4(),
            query: WeatherQuery { lat: 1, lon: 2 },
            destination: "person@place.com".to_owned(),
            alerts: thresholds(&[("min_temp", 0.0)]),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["lat"], 1);
        assert_eq!(value["lon"], 2);
        assert_eq!(value["destination"], "person@place.com");
        assert_eq!(value["alerts"]["min_temp"], 0.0);

        let back: WeatherRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    // ------------------------------------------------------------------
    // AlertNotification row shape
    // ------------------------------------------------------------------

    #[test]
    fn notification_serializes_as_row() {
        let notification = AlertNotification {
            temperature: 10.0,
            alerts: thresholds(&[("min_temp", 11.0)]),
            destination: "person@place.com".to_owned(),
        };
        let json = serde_json::to_string(&notification).unwrap();
        assert_eq!(json, r#"[10.0,{"min_temp":11.0},"person@place.com"]"#);
    }

    #[test]
    fn notification_row_round_trips() {
        let notification = AlertNotification {
            temperature: -3.5,
            alerts: thresholds(&[("max_temp", 30.0), ("min_temp", 0.0)]),
            destination: "ops@example.org".to_owned(),
        };
        let json = serde_json::to_string(&notification).unwrap();
        let back: AlertNotification = serde_json::from_str(&json).unwrap();
        assert_eq!(back, notification);
    }

    #[test]
    fn notification_rejects_short_row() {
        let result = serde_json::from_str::<AlertNotification>(r"[10.0]");
        assert!(result.is_err());
    }

    // ------------------------------------------------------------------
    // Error display
    // ------------------------------------------------------------------

    #[test]
    fn weather_error_display() {
        let e = WeatherError::Provider { status: 503 };
        assert_eq!(e.to_string(), "weather provider returned status 503");
        let e = WeatherError::MalformedResponse { field: "main.temp".to_owned() };
        assert_eq!(e.to_string(), "malformed provider response: missing `main.temp`");
    }

    #[test]
    fn sink_and_store_error_display() {
        let e = SinkError::WriteFailed { reason: "disk full".to_owned() };
        assert_eq!(e.to_string(), "sink write failed: disk full");
        let e = StoreError::Unavailable { reason: "locked".to_owned() };
        assert_eq!(e.to_string(), "record store unavailable: locked");
    }

    // ------------------------------------------------------------------
    // Port traits -- compile check with minimal implementations
    // ------------------------------------------------------------------

    /// Verify that all three port traits compile with a minimal implementation.
    #[tokio::test]
    async fn port_traits_compile_with_minimal_impl() {
        struct AllPorts {
            sunk: Mutex<Vec<AlertNotification>>,
        }

        #[async_trait::async_trait]
        impl WeatherApi for AllPorts {
            async fn fetch_temperature(&self, _query: WeatherQuery) -> Result<f64, WeatherError> {
                Ok(21.5)
            }
        }

        #[async_trait::async_trait]
        impl AlertSink for AllPorts {
            async fn append(&self, notification: &AlertNotification) -> Result<(), SinkError> {
                self.sunk.lock().unwrap().push(notification.clone());
                Ok(())
            }
        }

        #[async_trait::async_trait]
        impl RecordStore for AllPorts {
            async fn save(&self, _record: &WeatherRecord) -> Result<(), StoreError> {
                Ok(())
            }

            async fn load(&self, _id: uuid::Uuid) -> Result<Option<WeatherRecord>, StoreError> {
                Ok(None)
            }
        }

        let ports = AllPorts { sunk: Mutex::new(vec![]) };
        let temp = ports.fetch_temperature(WeatherQuery { lat: 1, lon: 2 }).await.unwrap();
        assert!((temp - 21.5).abs() < f64::EPSILON);
        ports
            .append(&AlertNotification {
                temperature: temp,
                alerts: thresholds(&[("min_temp", 30.0)]),
                destination: "t".to_owned(),
            })
            .await
            .unwrap();
        assert_eq!(ports.sunk.lock().unwrap().len(), 1);
        let missing = ports.load(uuid::Uuid::new_v4()).await.unwrap();
        assert!(missing.is_none());
    }
}
