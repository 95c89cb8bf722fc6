//! Table listing and column introspection endpoints

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::api::error::ApiError;
use crate::database::DatabaseError;
use crate::state::AppState;

/// Handler for GET /tables
///
/// Returns the names of all tables visible to the active connection.
pub async fn list_tables_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, ApiError> {
    let connection = state
        .connections()
        .get_connection()
        .await
        .map_err(ApiError::internal)?;

    let tables = connection
        .provider()
        .list_tables()
        .await
        .map_err(ApiError::internal)?;

    Ok(Json(tables))
}

/// Handler for GET /tables/{table}/columns
///
/// Returns the column names of a table in declaration order, or 404 if the
/// table does not exist.
pub async fn list_columns_handler(
    State(state): State<AppState>,
    Path(table_name): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    let connection = state
        .connections()
        .get_connection()
        .await
        .map_err(ApiError::internal)?;

    match connection.provider().list_columns(&table_name).await {
        Ok(columns) => Ok(Json(columns)),
        Err(error @ DatabaseError::TableNotFound(_)) => Err(ApiError::not_found(error)),
        Err(error) => Err(ApiError::internal(error)),
    }
}
