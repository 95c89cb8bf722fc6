//! Connection manager
//!
//! Holds the single active database connection. A new connection string
//! replaces the connection wholesale; until one is supplied the default URL
//! is opened lazily on first use.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::database::{mask_database_url, open_provider, DatabaseError, DatabaseProvider};

/// A live database connection and the URL it was opened from
pub struct Connection {
    url: String,
    provider: Arc<dyn DatabaseProvider>,
}

impl Connection {
    /// Connection string exactly as supplied
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Connection string with the password replaced by `****`
    pub fn masked_url(&self) -> String {
        mask_database_url(&self.url)
    }

    pub fn provider(&self) -> &dyn DatabaseProvider {
        self.provider.as_ref()
    }
}

/// Owner of the single active connection
///
/// Callers clone an `Arc<Connection>` out of the manager and run their
/// queries outside the lock, so a reconnect never interrupts an in-flight
/// request.
pub struct ConnectionManager {
    default_url: String,
    current: RwLock<Option<Arc<Connection>>>,
}

impl ConnectionManager {
    /// Create a manager that falls back to `default_url` on first use
    pub fn new(default_url: impl Into<String>) -> Self {
        Self {
            default_url: default_url.into(),
            current: RwLock::new(None),
        }
    }

    /// Connection string opened when no connection has been set
    pub fn default_url(&self) -> &str {
        &self.default_url
    }

    /// Replace the active connection
    ///
    /// On failure the previous connection stays active.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::EmptyUrl`] for a blank URL, or the error
    /// raised while opening the new connection.
    pub async fn set_connection(&self, url: &str) -> Result<Arc<Connection>, DatabaseError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(DatabaseError::EmptyUrl);
        }

        let connection = Arc::new(Self::open(url).await?);

        let previous = self.current.write().await.replace(connection.clone());

        if let Some(previous) = previous {
            tracing::info!(
                from = %previous.masked_url(),
                to = %connection.masked_url(),
                "Replaced database connection"
            );
            // Pool close waits for checked-out connections, keep it off the request path
            tokio::spawn(async move {
                previous.provider.close().await;
            });
        }

        Ok(connection)
    }

    /// Return the active connection, opening the default URL if none is set
    pub async fn get_connection(&self) -> Result<Arc<Connection>, DatabaseError> {
        if let Some(connection) = self.current.read().await.as_ref() {
            return Ok(connection.clone());
        }

        let mut slot = self.current.write().await;

        // Another request may have opened it while we waited for the lock
        if let Some(connection) = slot.as_ref() {
            return Ok(connection.clone());
        }

        let connection = Arc::new(Self::open(&self.default_url).await?);
        *slot = Some(connection.clone());

        Ok(connection)
    }

    /// URL of the active connection, opening the default URL if none is set
    pub async fn current_url(&self) -> Result<String, DatabaseError> {
        Ok(self.get_connection().await?.url().to_string())
    }

    async fn open(url: &str) -> Result<Connection, DatabaseError> {
        let provider = open_provider(url).await?;

        tracing::info!(database_url = %mask_database_url(url), "Opened database connection");

        Ok(Connection {
            url: url.to_string(),
            provider,
        })
    }
}
