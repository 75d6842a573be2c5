// Rust guideline compliant 2026-08-21

//! `AlertEvaluator` component -- compares a fetched temperature against a
//! record's configured thresholds and emits notifications through the
//! `domain::AlertSink` port.
//!
//! Entry point: [`AlertEvaluator::evaluate`].

use domain::{AlertKind, AlertNotification, AlertSink, AlertThresholds, SinkError};

// ---------------------------------------------------------------------------
// EvaluateError
// ---------------------------------------------------------------------------

/// Errors that can occur during threshold evaluation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluateError {
    /// An alert kind in the thresholds mapping has no registered rule.
    ///
    /// Upstream validation makes this unreachable through the normal path;
    /// it is still a defined, non-silent failure rather than a skip.
    #[error("no alert rule registered for kind `{name}`")]
    UnknownKind {
        /// The unregistered kind name.
        name: String,
    },
    /// A sink append failed. Notifications already appended stay appended.
    #[error("sink write error: {0}")]
    Sink(#[from] SinkError),
}

// ---------------------------------------------------------------------------
// AlertEvaluator
// ---------------------------------------------------------------------------

/// Decides whether a temperature breaches any configured threshold and, per
/// breach, appends one notification to the sink.
///
/// Stateless; the rule registry is the read-only `domain::AlertKind` enum
/// and the sink is injected per call for zero-cost static dispatch.
#[derive(Debug, Default)]
pub struct AlertEvaluator;

impl AlertEvaluator {
    /// Create a new evaluator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Evaluate `temperature` against every configured threshold, in the
    /// mapping's insertion order, and append one notification per breach.
    ///
    /// Each notification carries the temperature, the *entire* thresholds
    /// mapping verbatim (not just the breaching entry), and `destination`.
    /// Several breaching kinds therefore produce several near-identical
    /// rows; downstream consumers may depend on that shape, so it is kept.
    ///
    /// The registry lookup runs before the comparator, so an unknown kind
    /// fails the call even when its threshold would not have breached.
    ///
    /// Returns the number of notifications emitted (zero when nothing
    /// breached).
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError::UnknownKind`] for the first kind missing
    /// from the registry, or [`EvaluateError::Sink`] when an append fails.
    /// Either error aborts the remaining thresholds; rows already appended
    /// are not rolled back.
    pub async fn evaluate<S: AlertSink>(
        &self,
        temperature: f64,
        alerts: &AlertThresholds,
        destination: &str,
        sink: &S,
    ) -> Result<usize, EvaluateError> {
        tracing::debug!(temperature, kinds = alerts.len(), "evaluator.evaluate");

        let mut emitted = 0_usize;
        for (name, threshold) in alerts.iter() {
            let kind = AlertKind::from_name(name)
                .ok_or_else(|| EvaluateError::UnknownKind { name: name.to_owned() })?;
            if kind.breaches(temperature, threshold) {
                tracing::warn!(
                    kind = kind.name(),
                    temperature,
                    threshold,
                    destination,
                    "evaluator.alert.emitted"
                );
                let notification = AlertNotification {
                    temperature,
                    alerts: alerts.clone(),
                    destination: destination.to_owned(),
                };
                sink.append(&notification).await?;
                emitted += 1;
            }
        }
        Ok(emitted)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::{AlertEvaluator, EvaluateError};
    use domain::{
        AlertKind, AlertNotification, AlertSink, AlertThresholds, SinkError, validate_alerts,
    };
    use std::sync::Mutex;

    const DESTINATION: &str = "person@place.com";

    fn thresholds(pairs: &[(&str, f64)]) -> AlertThresholds {
        pairs.iter().map(|&(n, v)| (n, v)).collect()
    }

    // ------------------------------------------------------------------
    // Mock sink
    // ------------------------------------------------------------------

    struct MockSink {
        appended: Mutex<Vec<AlertNotification>>,
        fail: Option<SinkError>,
    }

    impl MockSink {
        fn new() -> Self {
            Self { appended: Mutex::new(vec![]), fail: None }
        }

        fn always_failing() -> Self {
            Self {
                appended: Mutex::new(vec![]),
                fail: Some(SinkError::WriteFailed { reason: "mock failure".to_owned() }),
            }
        }

        fn rows(&self) -> Vec<AlertNotification> {
            self.appended.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl AlertSink for MockSink {
        async fn append(&self, notification: &AlertNotification) -> Result<(), SinkError> {
            if let Some(e) = &self.fail {
                return Err(e.clone());
            }
            self.appended.lock().unwrap().push(notification.clone());
            Ok(())
        }
    }

    // ------------------------------------------------------------------
    // No breach -> no emission
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn no_notification_when_no_threshold_breaches() {
        // 10 < 0 is false -> nothing fires.
        let sink = MockSink::new();
        let emitted = AlertEvaluator::new()
            .evaluate(10.0, &thresholds(&[("min_temp", 0.0)]), DESTINATION, &sink)
            .await
            .unwrap();
        assert_eq!(emitted, 0);
        assert!(sink.rows().is_empty());
    }

    #[tokio::test]
    async fn no_notification_when_all_comparators_false() {
        let sink = MockSink::new();
        let alerts = thresholds(&[("min_temp", 0.0), ("max_temp", 30.0)]);
        let emitted =
            AlertEvaluator::new().evaluate(15.0, &alerts, DESTINATION, &sink).await.unwrap();
        assert_eq!(emitted, 0);
        assert!(sink.rows().is_empty());
    }

    // ------------------------------------------------------------------
    // Single breach -> exactly one emission, payload verbatim
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn single_breach_emits_one_notification_verbatim() {
        // 10 < 11 is true -> row [10, {"min_temp": 11}, destination].
        let sink = MockSink::new();
        let alerts = thresholds(&[("min_temp", 11.0)]);
        let emitted =
            AlertEvaluator::new().evaluate(10.0, &alerts, DESTINATION, &sink).await.unwrap();

        assert_eq!(emitted, 1);
        let rows = sink.rows();
        assert_eq!(rows.len(), 1);
        assert!((rows[0].temperature - 10.0).abs() < f64::EPSILON);
        assert_eq!(rows[0].alerts, alerts, "full mapping recorded, not just the breach");
        assert_eq!(rows[0].destination, DESTINATION);
    }

    #[tokio::test]
    async fn breaching_notification_carries_non_breaching_entries_too() {
        let sink = MockSink::new();
        let alerts = thresholds(&[("min_temp", 11.0), ("max_temp", 30.0)]);
        AlertEvaluator::new().evaluate(10.0, &alerts, DESTINATION, &sink).await.unwrap();

        let rows = sink.rows();
        assert_eq!(rows.len(), 1, "only min_temp breached");
        assert_eq!(rows[0].alerts.get("max_temp"), Some(30.0));
    }

    // ------------------------------------------------------------------
    // Multiple breaches -> one emission per breach, insertion order
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn each_breaching_kind_emits_independently() {
        // min_temp 20 and max_temp 5 both fire at 10 degrees.
        let sink = MockSink::new();
        let alerts = thresholds(&[("min_temp", 20.0), ("max_temp", 5.0)]);
        let emitted =
            AlertEvaluator::new().evaluate(10.0, &alerts, DESTINATION, &sink).await.unwrap();

        assert_eq!(emitted, 2, "one emission per breaching threshold, no dedup");
        let rows = sink.rows();
        assert_eq!(rows.len(), 2);
        // Both rows carry the identical full mapping.
        assert_eq!(rows[0].alerts, alerts);
        assert_eq!(rows[1].alerts, alerts);
    }

    // ------------------------------------------------------------------
    // Unknown kinds -> UnknownKind, never a silent skip
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn unknown_kind_fails_even_without_breach() {
        // Lookup precedes the comparator, so the value never matters.
        let sink = MockSink::new();
        let alerts = thresholds(&[("wind_speed", 999.0)]);
        let result = AlertEvaluator::new().evaluate(10.0, &alerts, DESTINATION, &sink).await;
        assert_eq!(result, Err(EvaluateError::UnknownKind { name: "wind_speed".to_owned() }));
        assert!(sink.rows().is_empty());
    }

    #[tokio::test]
    async fn unknown_kind_after_breach_keeps_earlier_rows() {
        // First entry breaches and is appended; second entry aborts the call.
        // Rows already appended are not rolled back.
        let sink = MockSink::new();
        let alerts = thresholds(&[("min_temp", 20.0), ("humidity", 80.0)]);
        let result = AlertEvaluator::new().evaluate(10.0, &alerts, DESTINATION, &sink).await;
        assert_eq!(result, Err(EvaluateError::UnknownKind { name: "humidity".to_owned() }));
        assert_eq!(sink.rows().len(), 1);
    }

    // ------------------------------------------------------------------
    // Sink failure -> surfaced, not swallowed
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn sink_failure_surfaces_as_evaluate_error() {
        let sink = MockSink::always_failing();
        let alerts = thresholds(&[("min_temp", 20.0)]);
        let result = AlertEvaluator::new().evaluate(10.0, &alerts, DESTINATION, &sink).await;
        assert!(
            matches!(result, Err(EvaluateError::Sink(SinkError::WriteFailed { .. }))),
            "sink failure must map to EvaluateError::Sink: {result:?}"
        );
    }

    #[tokio::test]
    async fn sink_untouched_when_nothing_breaches() {
        // A failing sink is never reached when no comparator fires.
        let sink = MockSink::always_failing();
        let alerts = thresholds(&[("min_temp", 0.0)]);
        let emitted =
            AlertEvaluator::new().evaluate(10.0, &alerts, DESTINATION, &sink).await.unwrap();
        assert_eq!(emitted, 0);
    }

    // ------------------------------------------------------------------
    // Validation / evaluation round-trip
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn validated_thresholds_never_hit_unknown_kind() {
        // Every non-empty subset of registry names passes validation and
        // evaluates without UnknownKind.
        let subsets: [&[&str]; 3] = [&["min_temp"], &["max_temp"], &["min_temp", "max_temp"]];
        for names in subsets {
            let alerts: AlertThresholds = names.iter().map(|&n| (n, 15.0)).collect();
            validate_alerts(&alerts).unwrap();

            let sink = MockSink::new();
            let result =
                AlertEvaluator::new().evaluate(15.0, &alerts, DESTINATION, &sink).await;
            assert!(result.is_ok(), "validated mapping must evaluate cleanly: {result:?}");
        }
    }

    #[tokio::test]
    async fn registry_and_evaluator_agree_on_known_names() {
        for kind in AlertKind::ALL {
            assert!(AlertKind::is_known(kind.name()));
        }
        assert!(!AlertKind::is_known("pressure"));
    }
}
