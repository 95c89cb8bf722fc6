//! Application state module.
//!
//! Defines the shared application state that is passed to route handlers.

use axum::http::HeaderMap;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::charts::ChartStore;
use crate::config::Config;
use crate::connection::ConnectionManager;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    connections: Arc<ConnectionManager>,
    charts: Arc<ChartStore>,
    api_key: Option<Arc<str>>,
    connect_requires_key: bool,
}

impl AppState {
    /// Creates a new application state without an API key.
    pub fn new(connections: ConnectionManager, charts: ChartStore) -> Self {
        Self {
            connections: Arc::new(connections),
            charts: Arc::new(charts),
            api_key: None,
            connect_requires_key: false,
        }
    }

    /// Creates the application state described by a configuration.
    ///
    /// No connection is opened here; the default URL is opened on first use.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ConnectionManager::new(config.database_url.clone()),
            ChartStore::new(config.charts_file.clone()),
        )
        .with_api_key(config.api_key.clone(), config.connect_requires_key)
    }

    /// Sets the API key and whether `POST /connect` checks it.
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>, connect_requires_key: bool) -> Self {
        self.api_key = api_key.map(Arc::from);
        self.connect_requires_key = connect_requires_key;
        self
    }

    pub fn connections(&self) -> &ConnectionManager {
        self.connections.as_ref()
    }

    pub fn charts(&self) -> &ChartStore {
        self.charts.as_ref()
    }

    pub fn connect_requires_key(&self) -> bool {
        self.connect_requires_key
    }

    /// Checks the `X-API-KEY` header against the configured key.
    ///
    /// Always passes when no key is configured; a missing header is a mismatch.
    pub fn check_api_key(&self, headers: &HeaderMap) -> Result<(), ApiError> {
        let Some(expected) = self.api_key.as_deref() else {
            return Ok(());
        };

        let supplied = headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok());

        if supplied == Some(expected) {
            Ok(())
        } else {
            Err(ApiError::unauthorized("Missing or invalid X-API-KEY"))
        }
    }
}
