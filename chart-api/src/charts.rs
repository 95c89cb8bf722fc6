//! Chart store
//!
//! Chart records are kept as a single pretty-printed JSON array in one file.
//! Every push rewrites the whole array through a temporary file that is
//! renamed over the original, and pushes are serialized by a mutex so
//! concurrent requests never lose each other's records.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;

/// Format of record ids: ISO-8601 UTC with microseconds
const ID_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// A stored chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRecord {
    /// Creation timestamp, unique within the process
    pub id: String,

    pub name: String,

    /// Opaque chart payload
    pub data: Value,

    #[serde(default)]
    pub meta: Map<String, Value>,
}

/// Chart store error type
#[derive(Debug, Error)]
pub enum ChartStoreError {
    #[error("Chart file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Chart file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Chart file does not contain a JSON array")]
    NotAnArray,
}

/// Append-only chart storage backed by a JSON file
pub struct ChartStore {
    path: PathBuf,
    /// Timestamp of the last issued id; the lock also guards the file
    last_issued: Mutex<Option<DateTime<Utc>>>,
}

impl ChartStore {
    /// Create a store writing to `path`; the file is created on first push
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_issued: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a chart record and persist the whole array
    ///
    /// # Arguments
    ///
    /// * `name` - Chart name
    /// * `data` - Opaque payload
    /// * `meta` - Optional metadata, stored as `{}` when absent
    pub async fn push_chart(
        &self,
        name: String,
        data: Value,
        meta: Option<Map<String, Value>>,
    ) -> Result<ChartRecord, ChartStoreError> {
        let mut last_issued = self.last_issued.lock().await;

        let mut records = self.read_array().await?;

        let timestamp = next_timestamp(Utc::now(), *last_issued);
        let record = ChartRecord {
            id: timestamp.format(ID_FORMAT).to_string(),
            name,
            data,
            meta: meta.unwrap_or_default(),
        };

        records.push(serde_json::to_value(&record)?);
        self.write_array(&records).await?;

        *last_issued = Some(timestamp);

        tracing::info!(
            id = %record.id,
            name = %record.name,
            total = records.len(),
            "Saved chart record"
        );

        Ok(record)
    }

    /// Read every stored chart record
    pub async fn list_charts(&self) -> Result<Vec<ChartRecord>, ChartStoreError> {
        let _guard = self.last_issued.lock().await;

        let records = self.read_array().await?;
        records
            .into_iter()
            .map(|record| serde_json::from_value(record).map_err(ChartStoreError::from))
            .collect()
    }

    /// Read the raw array, treating a missing or empty file as `[]`
    async fn read_array(&self) -> Result<Vec<Value>, ChartStoreError> {
        let contents = match tokio::fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(error.into()),
        };

        if contents.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let parsed: Value = serde_json::from_slice(&contents)?;
        match parsed {
            Value::Array(records) => Ok(records),
            _ => Err(ChartStoreError::NotAnArray),
        }
    }

    /// Write the array to a sibling temporary file and rename it into place
    async fn write_array(&self, records: &[Value]) -> Result<(), ChartStoreError> {
        let contents = serde_json::to_vec_pretty(records)?;

        let mut temporary: OsString = self.path.clone().into_os_string();
        temporary.push(".tmp");
        let temporary = PathBuf::from(temporary);

        tokio::fs::write(&temporary, contents).await?;
        tokio::fs::rename(&temporary, &self.path).await?;

        Ok(())
    }
}

/// Pick a timestamp strictly after the previous one
fn next_timestamp(now: DateTime<Utc>, previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = truncate_to_micros(now);

    match previous {
        Some(previous) if now <= previous => previous + Duration::microseconds(1),
        _ => now,
    }
}

fn truncate_to_micros(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    let excess_nanos = i64::from(timestamp.timestamp_subsec_nanos() % 1_000);
    timestamp - Duration::nanoseconds(excess_nanos)
}
