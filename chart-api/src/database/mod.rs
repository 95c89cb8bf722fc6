//! Database abstraction layer
//!
//! This module provides a database-agnostic interface for table introspection
//! and filtered selects, plus the logic that turns a connection string into a
//! live provider.

pub mod query;
pub mod traits;
pub mod url;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "postgres")]
pub mod postgres;

use std::sync::Arc;

// Re-export the main trait
pub use traits::{DatabaseError, DatabaseProvider};
pub use url::{mask_database_url, normalize_database_url, DatabaseKind};

/// Open a provider for a connection string
///
/// The backend is picked from the URL scheme and the pool is connected
/// eagerly, so an unreachable server or a malformed URL fails here.
pub async fn open_provider(url: &str) -> Result<Arc<dyn DatabaseProvider>, DatabaseError> {
    let normalized = normalize_database_url(url);
    if normalized.is_empty() {
        return Err(DatabaseError::EmptyUrl);
    }

    match DatabaseKind::from_url(&normalized)? {
        #[cfg(feature = "sqlite")]
        DatabaseKind::Sqlite => {
            use sqlx::sqlite::SqliteConnectOptions;
            use std::str::FromStr;

            let options = SqliteConnectOptions::from_str(&normalized)?.create_if_missing(true);
            let in_memory = normalized.contains(":memory:") || normalized.contains("mode=memory");

            let pool = sqlite_pool_options(in_memory)
                .connect_with(options)
                .await?;

            Ok(Arc::new(sqlite::SqliteProvider::new(pool)))
        }

        #[cfg(feature = "postgres")]
        DatabaseKind::Postgres => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .connect(&normalized)
                .await?;

            Ok(Arc::new(postgres::PostgresProvider::new(pool)))
        }

        #[allow(unreachable_patterns)]
        _ => Err(DatabaseError::UnsupportedUrl(mask_database_url(url))),
    }
}

/// Pool settings for a SQLite database
///
/// Every connection to `:memory:` is a separate database, so an in-memory
/// database lives on exactly one connection that is never reaped.
#[cfg(feature = "sqlite")]
fn sqlite_pool_options(in_memory: bool) -> sqlx::sqlite::SqlitePoolOptions {
    let options = sqlx::sqlite::SqlitePoolOptions::new();

    if in_memory {
        options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        options.max_connections(10)
    }
}
