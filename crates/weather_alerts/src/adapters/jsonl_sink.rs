// Rust guideline compliant 2026-08-22

//! Flat-file adapter for the `AlertSink` port.
//!
//! Appends one serialized `[temperature, alerts, destination]` row per line
//! (JSON lines). The file is opened in append mode on every write, so the
//! adapter holds no open handle and is freely shareable across requests.
//! Appends are not transactional with the weather fetch that triggered
//! them; a crash in between loses that notification (accepted risk).

use domain::{AlertNotification, AlertSink, SinkError};
use std::path::PathBuf;
use tokio::io::AsyncWriteExt as _;

/// `AlertSink` adapter backed by an append-only JSON-lines file.
#[derive(Debug, Clone)]
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    /// Create a sink writing to `path`. The file is created on first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl AlertSink for JsonlSink {
    /// Append one notification row and flush it.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::WriteFailed`] when the file cannot be opened or
    /// the row cannot be written. A row interrupted mid-write may leave a
    /// partial line in the file; that is reported as the same error.
    async fn append(&self, notification: &AlertNotification) -> Result<(), SinkError> {
        let mut row = serde_json::to_vec(notification)
            .map_err(|e| SinkError::WriteFailed { reason: format!("serialize: {e}") })?;
        row.push(b'\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                tracing::error!(path = %self.path.display(), error = %e, "jsonl_sink.open_failed");
                SinkError::WriteFailed { reason: format!("open {}: {e}", self.path.display()) }
            })?;
        file.write_all(&row).await.map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "jsonl_sink.write_failed");
            SinkError::WriteFailed { reason: format!("write {}: {e}", self.path.display()) }
        })?;
        file.flush()
            .await
            .map_err(|e| SinkError::WriteFailed { reason: format!("flush: {e}") })?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
