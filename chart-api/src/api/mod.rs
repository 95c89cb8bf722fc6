//! REST API endpoints
//!
//! This module contains all endpoint handlers and the router that mounts them.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod charts;
pub mod connection;
pub mod error;
pub mod health;
pub mod query;
pub mod tables;

// Re-export handlers for convenience
pub use charts::{list_charts_handler, push_chart_handler};
pub use connection::{connect_handler, db_info_handler};
pub use error::ApiError;
pub use health::health_handler;
pub use query::execute_query_handler;
pub use tables::{list_columns_handler, list_tables_handler};

/// Create the router with all endpoints
///
/// The returned router includes:
/// - `GET /db-info`, `POST /connect`
/// - `GET /tables`, `GET /tables/{table}/columns`
/// - `POST /query`
/// - `POST /push-chart`, `GET /charts`
/// - `GET /health`
/// - Permissive CORS and request tracing
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/db-info", get(db_info_handler))
        .route("/connect", post(connect_handler))
        .route("/tables", get(list_tables_handler))
        .route("/tables/{table}/columns", get(list_columns_handler))
        .route("/query", post(execute_query_handler))
        .route("/push-chart", post(push_chart_handler))
        .route("/charts", get(list_charts_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
