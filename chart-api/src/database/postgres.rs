//! PostgreSQL database provider implementation

use crate::database::traits::{DatabaseError, DatabaseProvider};
use crate::schema::QueryRow;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::types::chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::types::{Decimal, Uuid};
use sqlx::{postgres::PgRow, Column, PgPool, Row, TypeInfo, ValueRef};

/// PostgreSQL database provider
pub struct PostgresProvider {
    pool: PgPool,
}

impl PostgresProvider {
    /// Create a new PostgreSQL provider
    ///
    /// # Arguments
    ///
    /// * `pool` - PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert a PostgreSQL row to an ordered JSON object
    fn row_to_json(row: &PgRow) -> Result<QueryRow, DatabaseError> {
        let mut map = QueryRow::new();

        for column in row.columns() {
            let index = column.ordinal();

            let value: Value = match column.type_info().name() {
                "BOOL" => {
                    let val: Option<bool> = row.try_get(index)?;
                    val.map(Value::Bool).unwrap_or(Value::Null)
                }
                "INT2" => {
                    let val: Option<i16> = row.try_get(index)?;
                    val.map(|v| Value::Number(v.into())).unwrap_or(Value::Null)
                }
                "INT4" => {
                    let val: Option<i32> = row.try_get(index)?;
                    val.map(|v| Value::Number(v.into())).unwrap_or(Value::Null)
                }
                "INT8" => {
                    let val: Option<i64> = row.try_get(index)?;
                    val.map(|v| Value::Number(v.into())).unwrap_or(Value::Null)
                }
                "FLOAT4" => {
                    let val: Option<f32> = row.try_get(index)?;
                    val.and_then(|v| serde_json::Number::from_f64(v as f64))
                        .map(Value::Number)
                        .unwrap_or(Value::Null)
                }
                "FLOAT8" => {
                    let val: Option<f64> = row.try_get(index)?;
                    val.and_then(serde_json::Number::from_f64)
                        .map(Value::Number)
                        .unwrap_or(Value::Null)
                }
                "TEXT" | "VARCHAR" | "CHAR" | "NAME" | "BPCHAR" => {
                    let val: Option<String> = row.try_get(index)?;
                    val.map(Value::String).unwrap_or(Value::Null)
                }
                "BYTEA" => {
                    let val: Option<Vec<u8>> = row.try_get(index)?;
                    val.map(|bytes| Value::String(format!("[BLOB: {} bytes]", bytes.len())))
                        .unwrap_or(Value::Null)
                }
                "TIMESTAMPTZ" => {
                    let val: Option<DateTime<Utc>> = row.try_get(index)?;
                    val.map(|v| Value::String(v.to_rfc3339()))
                        .unwrap_or(Value::Null)
                }
                "TIMESTAMP" => {
                    let val: Option<NaiveDateTime> = row.try_get(index)?;
                    val.map(|v| Value::String(v.format("%Y-%m-%dT%H:%M:%S%.f").to_string()))
                        .unwrap_or(Value::Null)
                }
                "DATE" => {
                    let val: Option<NaiveDate> = row.try_get(index)?;
                    val.map(|v| Value::String(v.to_string())).unwrap_or(Value::Null)
                }
                "TIME" => {
                    let val: Option<NaiveTime> = row.try_get(index)?;
                    val.map(|v| Value::String(v.to_string())).unwrap_or(Value::Null)
                }
                "JSON" | "JSONB" => {
                    let val: Option<Value> = row.try_get(index)?;
                    val.unwrap_or(Value::Null)
                }
                "UUID" => {
                    let val: Option<Uuid> = row.try_get(index)?;
                    val.map(|v| Value::String(v.to_string())).unwrap_or(Value::Null)
                }
                "NUMERIC" => match row.try_get::<Option<Decimal>, _>(index) {
                    Ok(val) => val.map(decimal_to_json).unwrap_or(Value::Null),
                    // Outside the decoder's precision, or NaN
                    Err(_) => raw_text(row, index)?,
                },
                _ => raw_text(row, index)?,
            };

            map.insert(column.name().to_string(), value);
        }

        Ok(map)
    }
}

/// Render a NUMERIC value as a JSON number
fn decimal_to_json(value: Decimal) -> Value {
    let text = value.to_string();

    text.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::String(text))
}

/// Read a column without a typed decoder as the text of its raw value
///
/// Enum labels come through as-is; binary encodings (arrays, ranges, NaN
/// numerics, ...) are not readable text and become null.
fn raw_text(row: &PgRow, index: usize) -> Result<Value, DatabaseError> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }

    match raw.as_str() {
        Ok(text) if !text.chars().any(char::is_control) => Ok(Value::String(text.to_string())),
        _ => Ok(Value::Null),
    }
}

#[async_trait]
impl DatabaseProvider for PostgresProvider {
    async fn list_tables(&self) -> Result<Vec<String>, DatabaseError> {
        let query = r#"
            SELECT table_name::text
            FROM information_schema.tables
            WHERE table_schema = 'public'
              AND table_type = 'BASE TABLE'
            ORDER BY table_name
        "#;

        let tables: Vec<String> = sqlx::query_scalar(query).fetch_all(&self.pool).await?;

        Ok(tables)
    }

    async fn list_columns(&self, table: &str) -> Result<Vec<String>, DatabaseError> {
        let column_query = r#"
            SELECT column_name::text
            FROM information_schema.columns
            WHERE table_schema = 'public'
              AND table_name = $1
            ORDER BY ordinal_position
        "#;

        let columns: Vec<String> = sqlx::query_scalar(column_query)
            .bind(table)
            .fetch_all(&self.pool)
            .await?;

        if columns.is_empty() {
            return Err(DatabaseError::TableNotFound(table.to_string()));
        }

        Ok(columns)
    }

    async fn fetch_rows(&self, sql: &str) -> Result<Vec<QueryRow>, DatabaseError> {
        let rows = sqlx::query(sql).fetch_all(&self.pool).await?;

        rows.iter().map(Self::row_to_json).collect()
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
