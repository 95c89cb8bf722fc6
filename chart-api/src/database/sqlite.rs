//! SQLite database provider implementation

use crate::database::query::quote_identifier;
use crate::database::traits::{DatabaseError, DatabaseProvider};
use crate::schema::QueryRow;
use async_trait::async_trait;
use base64::Engine;
use serde_json::Value;
use sqlx::sqlite::{SqliteColumn, SqliteRow};
use sqlx::{Column, Row, SqlitePool, TypeInfo, ValueRef};

/// Number of BLOB bytes rendered in the base64 preview
const BLOB_PREVIEW_BYTES: usize = 64;

/// SQLite database provider
pub struct SqliteProvider {
    pool: SqlitePool,
}

impl SqliteProvider {
    /// Create a new SQLite provider
    ///
    /// # Arguments
    ///
    /// * `pool` - SQLite connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Convert a SQLite row to an ordered JSON object
    ///
    /// Keys follow the column order of the statement.
    fn row_to_json(row: &SqliteRow) -> Result<QueryRow, DatabaseError> {
        let mut map = QueryRow::new();

        for column in row.columns() {
            let value = Self::extract_column_value(row, column)?;
            map.insert(column.name().to_string(), value);
        }

        Ok(map)
    }

    /// Extract a column value from a SQLite row and convert to JSON
    fn extract_column_value(row: &SqliteRow, column: &SqliteColumn) -> Result<Value, DatabaseError> {
        let index = column.ordinal();

        if row
            .try_get_raw(index)
            .map_err(|e| DatabaseError::Query(e.to_string()))?
            .is_null()
        {
            return Ok(Value::Null);
        }

        // SQLite has dynamic typing, so the declared type is only a hint
        match column.type_info().name() {
            "INTEGER" | "BIGINT" | "INT8" => {
                if let Ok(value) = row.try_get::<i64, _>(index) {
                    return Ok(Value::Number(value.into()));
                }
            }
            "REAL" | "FLOAT" | "DOUBLE" | "NUMERIC" => {
                if let Ok(value) = row.try_get::<f64, _>(index) {
                    return Ok(float_to_json(value));
                }
            }
            "TEXT" | "VARCHAR" | "CHAR" | "CLOB" | "DATE" | "TIME" | "DATETIME" | "TIMESTAMP" => {
                if let Ok(value) = row.try_get::<String, _>(index) {
                    return Ok(Value::String(value));
                }
            }
            "BLOB" => {
                if let Ok(value) = row.try_get::<Vec<u8>, _>(index) {
                    return Ok(blob_preview(&value));
                }
            }
            "BOOLEAN" | "BOOL" => {
                if let Ok(value) = row.try_get::<bool, _>(index) {
                    return Ok(Value::Bool(value));
                }
            }
            _ => {}
        }

        // Fallback: try common types in order
        if let Ok(value) = row.try_get::<i64, _>(index) {
            return Ok(Value::Number(value.into()));
        }
        if let Ok(value) = row.try_get::<f64, _>(index) {
            return Ok(float_to_json(value));
        }
        if let Ok(value) = row.try_get::<String, _>(index) {
            return Ok(Value::String(value));
        }
        if let Ok(value) = row.try_get::<Vec<u8>, _>(index) {
            return Ok(blob_preview(&value));
        }

        Ok(Value::Null)
    }
}

#[async_trait]
impl DatabaseProvider for SqliteProvider {
    async fn list_tables(&self) -> Result<Vec<String>, DatabaseError> {
        let query = "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name";

        let tables: Vec<String> = sqlx::query_scalar(query).fetch_all(&self.pool).await?;

        Ok(tables)
    }

    async fn list_columns(&self, table: &str) -> Result<Vec<String>, DatabaseError> {
        // PRAGMA table_info returns: cid, name, type, notnull, dflt_value, pk
        let table_info_query = format!("PRAGMA table_info({})", quote_identifier(table));
        let column_rows = sqlx::query(&table_info_query).fetch_all(&self.pool).await?;

        if column_rows.is_empty() {
            return Err(DatabaseError::TableNotFound(table.to_string()));
        }

        column_rows
            .iter()
            .map(|row| row.try_get::<String, _>("name").map_err(DatabaseError::from))
            .collect()
    }

    async fn fetch_rows(&self, sql: &str) -> Result<Vec<QueryRow>, DatabaseError> {
        let rows = sqlx::query(sql).fetch_all(&self.pool).await?;

        rows.iter().map(Self::row_to_json).collect()
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

fn float_to_json(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Render a BLOB as a short, JSON friendly preview
fn blob_preview(data: &[u8]) -> Value {
    let limited = &data[..data.len().min(BLOB_PREVIEW_BYTES)];
    let mut encoded = base64::engine::general_purpose::STANDARD.encode(limited);

    if data.len() > BLOB_PREVIEW_BYTES {
        encoded.push_str("...");
    }

    Value::String(format!("[BLOB: {} bytes, base64: {}]", data.len(), encoded))
}
