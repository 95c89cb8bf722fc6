//! Request and response types for the HTTP API
//!
//! Field names follow the wire format (snake_case) exactly.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::charts::ChartRecord;

/// A single result row: column name to value, in select order
pub type QueryRow = Map<String, Value>;

/// Response from `GET /db-info`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbInfoResponse {
    /// Active connection string with the password masked
    pub database_url: String,

    /// Tables visible to the connection (empty if introspection failed)
    pub tables: Vec<String>,
}

/// Request body for `POST /connect`
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectRequest {
    /// Connection string of the database to switch to
    pub database_url: String,
}

/// Response from `POST /connect`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectResponse {
    pub connected: bool,
    pub tables: Vec<String>,
}

/// Request body for `POST /query`
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    /// Table to select from
    pub table: String,

    /// Column subset, in the order the caller wants them back
    #[serde(default)]
    pub select: Option<Vec<String>>,

    /// Raw SQL filter expression appended after `WHERE`
    #[serde(default, rename = "where")]
    pub where_clause: Option<String>,
}

/// Request body for `POST /push-chart`
#[derive(Debug, Clone, Deserialize)]
pub struct PushChartRequest {
    pub name: String,

    /// Opaque chart payload
    pub data: Value,

    #[serde(default)]
    pub meta: Option<Map<String, Value>>,
}

/// Response from `POST /push-chart`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushChartResponse {
    pub saved: bool,
    pub record: ChartRecord,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
