// Rust guideline compliant 2026-08-22

//! SQLite adapter for the `RecordStore` port.
//!
//! Persists `WeatherRecord` rows to a SQLite file via `sqlx`. The alerts
//! mapping is stored as its JSON text verbatim, so threshold insertion
//! order survives a save/load round trip.
//!
//! Records are immutable after submission, so writes use plain `INSERT`;
//! a duplicate UUID is a constraint violation and surfaces as an error.

use domain::{AlertThresholds, RecordStore, StoreError, WeatherQuery, WeatherRecord};
use sqlx::Row as _;

/// `RecordStore` adapter backed by a SQLite database file via `sqlx`.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: sqlx::SqlitePool,
}

impl SqliteStore {
    /// Open or create a SQLite database and initialize the schema.
    ///
    /// Passes `create_if_missing(true)` so the database file is created on
    /// first run without manual setup. The `weather_records` table is
    /// created via `CREATE TABLE IF NOT EXISTS`, making repeated calls safe.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` when the connection or schema creation fails.
    pub async fn new(db_url: &str) -> Result<Self, sqlx::Error> {
        // create_if_missing: sqlx defaults to false for file databases;
        // enable explicitly so the service works out of the box on first run.
        let opts = db_url
            .parse::<sqlx::sqlite::SqliteConnectOptions>()?
            .create_if_missing(true);
        let pool = sqlx::SqlitePool::connect_with(opts).await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS weather_records (
                id          TEXT    PRIMARY KEY,
                lat         INTEGER NOT NULL,
                lon         INTEGER NOT NULL,
                destination TEXT    NOT NULL,
                alerts      TEXT    NOT NULL  -- JSON mapping, insertion order preserved
            )",
        )
        .execute(&pool)
        .await?;
        Ok(Self { pool })
    }
}

fn unavailable(e: impl std::fmt::Display) -> StoreError {
    StoreError::Unavailable { reason: e.to_string() }
}

#[async_trait::async_trait]
impl RecordStore for SqliteStore {
    /// Persist `record` as one row in `weather_records`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` on any `sqlx` error (connection
    /// failure, duplicate id, disk full, etc.). The underlying error is
    /// logged at `error` level before mapping.
    async fn save(&self, record: &WeatherRecord) -> Result<(), StoreError> {
        let alerts_json = serde_json::to_string(&record.alerts).map_err(unavailable)?;
        sqlx::query(
            "INSERT INTO weather_records (id, lat, lon, destination, alerts)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(record.id.to_string())
        .bind(i64::from(record.query.lat))
        .bind(i64::from(record.query.lon))
        .bind(&record.destination)
        .bind(alerts_json)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(record_id = %record.id, error = %e, "sqlite_store.save_failed");
            unavailable(e)
        })?;
        Ok(())
    }

    /// Load a record by id; `Ok(None)` when no row matches.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` on any `sqlx` error or when a
    /// stored row fails to decode.
    async fn load(&self, id: uuid::Uuid) -> Result<Option<WeatherRecord>, StoreError> {
        let row = sqlx::query(
            "SELECT lat, lon, destination, alerts FROM weather_records WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(record_id = %id, error = %e, "sqlite_store.load_failed");
            unavailable(e)
        })?;

        let Some(row) = row else {
            return Ok(None);
        };

        let lat: i64 = row.try_get("lat").map_err(unavailable)?;
        let lon: i64 = row.try_get("lon").map_err(unavailable)?;
        let destination: String = row.try_get("destination").map_err(unavailable)?;
        let alerts_json: String = row.try_get("alerts").map_err(unavailable)?;
        let alerts: AlertThresholds = serde_json::from_str(&alerts_json).map_err(unavailable)?;

        Ok(Some(WeatherRecord {
            id,
            query: WeatherQuery {
                lat: i32::try_from(lat).map_err(unavailable)?,
                lon: i32::try_from(lon).map_err(unavailable)?,
            },
            destination,
            alerts,
        }))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
