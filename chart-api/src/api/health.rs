//! Liveness endpoint

use axum::response::Json;
use serde_json::{json, Value};

/// Handler for GET /health
///
/// Only reports that the process is serving; the database is not touched.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
