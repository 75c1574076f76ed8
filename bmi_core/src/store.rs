//! Append-only measurement store backed by SQLite.
//!
//! The store starts `Uninitialized`. [`MeasurementStore::initialize`] opens
//! the database and creates the `measurements` table if it is missing, moving
//! the store to `Ready`. Every other operation requires `Ready` and fails with
//! [`Error::StorageUnavailable`] otherwise.
//!
//! Records are never updated or deleted.

use crate::{
    BmiCategory, Error, MeasurementRecord, PendingMeasurement, RecordId, Result,
    TIMESTAMP_FORMAT,
};
use chrono::{Local, NaiveDateTime};
use rusqlite::{params, Connection, Row};
use std::path::{Path, PathBuf};

/// Default database file name inside the data directory
pub const DEFAULT_DATABASE_FILE: &str = "bmi_records.db";

const MEASUREMENTS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS measurements (
    record_id INTEGER PRIMARY KEY AUTOINCREMENT,
    date_time TEXT NOT NULL,
    weight_kg REAL NOT NULL,
    height_m REAL NOT NULL,
    bmi_value REAL NOT NULL,
    bmi_category TEXT NOT NULL
);
"#;

/// Measurement store trait for persisting and listing records
pub trait MeasurementStore {
    /// Ensure the backing schema exists. Safe to call repeatedly.
    fn initialize(&mut self) -> Result<()>;

    /// Whether [`MeasurementStore::initialize`] has succeeded
    fn is_ready(&self) -> bool;

    /// Persist a measurement stamped with `timestamp` (whole seconds kept)
    fn append_at(
        &mut self,
        timestamp: NaiveDateTime,
        measurement: &PendingMeasurement,
    ) -> Result<RecordId>;

    /// Persist a measurement stamped with the local clock
    fn append(&mut self, measurement: &PendingMeasurement) -> Result<RecordId> {
        self.append_at(Local::now().naive_local(), measurement)
    }

    /// Snapshot of every record, newest first
    fn list_all(&self) -> Result<Vec<MeasurementRecord>>;
}

/// SQLite-backed measurement store
pub struct SqliteStore {
    /// `None` targets an in-memory database
    path: Option<PathBuf>,
    conn: Option<Connection>,
}

impl SqliteStore {
    /// Create an uninitialized store for the database file at `path`.
    ///
    /// Nothing is opened until [`MeasurementStore::initialize`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            conn: None,
        }
    }

    /// Create an uninitialized store over a private in-memory database
    pub fn in_memory() -> Self {
        Self {
            path: None,
            conn: None,
        }
    }

    /// Database file path, if file-backed
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn open_connection(&self) -> Result<Connection> {
        match &self.path {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        Error::StorageUnavailable(format!(
                            "Failed to create {:?}: {}",
                            parent, e
                        ))
                    })?;
                }
                tracing::info!("Opening SQLite database at {:?}", path);
                Ok(Connection::open(path)?)
            }
            None => {
                tracing::debug!("Opening in-memory SQLite database");
                Ok(Connection::open_in_memory()?)
            }
        }
    }

    fn ready_conn(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or_else(|| {
            Error::StorageUnavailable("measurement store is not initialized".into())
        })
    }
}

impl MeasurementStore for SqliteStore {
    fn initialize(&mut self) -> Result<()> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => self.open_connection()?,
        };

        // A corrupt file only surfaces here, on first real access
        conn.execute_batch(MEASUREMENTS_SCHEMA)?;
        tracing::info!("Measurement schema ready");

        self.conn = Some(conn);
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.conn.is_some()
    }

    fn append_at(
        &mut self,
        timestamp: NaiveDateTime,
        measurement: &PendingMeasurement,
    ) -> Result<RecordId> {
        let conn = self.ready_conn()?;
        let date_time = timestamp.format(TIMESTAMP_FORMAT).to_string();

        conn.execute(
            "INSERT INTO measurements (date_time, weight_kg, height_m, bmi_value, bmi_category)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                date_time,
                measurement.weight_kg,
                measurement.height_m,
                measurement.bmi_value,
                measurement.category.label(),
            ],
        )?;
        let record_id = conn.last_insert_rowid();

        tracing::debug!("Appended measurement {} at {}", record_id, date_time);
        Ok(record_id)
    }

    fn list_all(&self) -> Result<Vec<MeasurementRecord>> {
        let conn = self.ready_conn()?;

        let mut stmt = conn.prepare(
            "SELECT record_id, date_time, weight_kg, height_m, bmi_value, bmi_category
             FROM measurements
             ORDER BY date_time DESC, record_id DESC",
        )?;
        let rows = stmt
            .query_map([], MeasurementRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let records = rows
            .into_iter()
            .map(MeasurementRecord::try_from)
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!("Listed {} measurements", records.len());
        Ok(records)
    }
}

/// Raw row as stored, before text columns are parsed
#[derive(Debug)]
struct MeasurementRow {
    record_id: i64,
    date_time: String,
    weight_kg: f64,
    height_m: f64,
    bmi_value: f64,
    bmi_category: String,
}

impl MeasurementRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            record_id: row.get(0)?,
            date_time: row.get(1)?,
            weight_kg: row.get(2)?,
            height_m: row.get(3)?,
            bmi_value: row.get(4)?,
            bmi_category: row.get(5)?,
        })
    }
}

impl TryFrom<MeasurementRow> for MeasurementRecord {
    type Error = Error;

    fn try_from(row: MeasurementRow) -> Result<Self> {
        let timestamp = NaiveDateTime::parse_from_str(&row.date_time, TIMESTAMP_FORMAT)
            .map_err(|e| {
                Error::StorageUnavailable(format!(
                    "Record {} has invalid date_time {:?}: {}",
                    row.record_id, row.date_time, e
                ))
            })?;

        let bmi_category = BmiCategory::from_label(&row.bmi_category).ok_or_else(|| {
            Error::StorageUnavailable(format!(
                "Record {} has unknown bmi_category {:?}",
                row.record_id, row.bmi_category
            ))
        })?;

        Ok(MeasurementRecord {
            record_id: row.record_id,
            timestamp,
            weight_kg: row.weight_kg,
            height_m: row.height_m,
            bmi_value: row.bmi_value,
            bmi_category,
        })
    }
}
