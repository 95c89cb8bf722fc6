//! Filtered select endpoint

use axum::{extract::State, response::Json};

use crate::api::error::ApiError;
use crate::database::DatabaseError;
use crate::schema::{QueryRequest, QueryRow};
use crate::state::AppState;

/// Handler for POST /query
///
/// Selects rows from a table, optionally restricted to a column subset and
/// filtered by a raw SQL expression.
///
/// # Security Warning
///
/// `where` is concatenated into the statement verbatim. Anyone who can reach
/// this endpoint can run arbitrary SQL against the connected database.
///
/// Request body:
/// ```json
/// {
///   "table": "users",
///   "select": ["name", "email"],
///   "where": "created_at > '2024-01-01'"
/// }
/// ```
///
/// Response: every matching row, keys in select order
/// ```json
/// [{ "name": "Alice", "email": "alice@example.com" }]
/// ```
///
/// An unknown table or column is a 400; any other failure, including a
/// malformed filter, is a 500 with the database's message.
pub async fn execute_query_handler(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<Vec<QueryRow>>, ApiError> {
    let connection = state
        .connections()
        .get_connection()
        .await
        .map_err(ApiError::internal)?;

    let rows = connection
        .provider()
        .run_query(
            &request.table,
            request.select.as_deref(),
            request.where_clause.as_deref(),
        )
        .await
        .map_err(|error| match error {
            DatabaseError::TableNotFound(_) | DatabaseError::InvalidColumn(_) => {
                ApiError::bad_request(error)
            }
            _ => ApiError::internal(error),
        })?;

    tracing::debug!(table = %request.table, rows = rows.len(), "Query executed");

    Ok(Json(rows))
}
