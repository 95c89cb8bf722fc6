//! # chart-api
//!
//! A small HTTP API for introspecting SQL databases, running filtered selects
//! and storing named chart records.
//!
//! ## Features
//!
//! - Switch the active database at runtime by connection string
//! - Table and column discovery for SQLite and PostgreSQL
//! - Column-projected selects with an optional raw filter clause
//! - Chart records appended to a single JSON file
//!
//! ## Security Warning
//!
//! **This is not a security boundary!**
//!
//! - The `where` filter of `POST /query` is raw SQL passed through unchecked
//! - `POST /connect` is open unless `CONNECT_REQUIRES_KEY` is set
//! - Error messages from the database are returned to the caller as-is
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chart_api::{create_router, AppState, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let app = create_router(AppState::from_config(&config));
//!
//!     let listener = tokio::net::TcpListener::bind(config.socket_addr()?).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

// Public modules
pub mod api;
pub mod charts;
pub mod config;
pub mod connection;
pub mod database;
pub mod schema;
pub mod state;

// Public exports
pub use api::{create_router, ApiError};
pub use charts::{ChartRecord, ChartStore, ChartStoreError};
pub use config::Config;
pub use connection::{Connection, ConnectionManager};
pub use schema::QueryRow;
pub use state::AppState;

// Re-export database providers
pub use database::traits::{DatabaseError, DatabaseProvider};

#[cfg(feature = "sqlite")]
pub use database::sqlite::SqliteProvider;

#[cfg(feature = "postgres")]
pub use database::postgres::PostgresProvider;
