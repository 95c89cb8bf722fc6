//! Server configuration module.
//!
//! Handles loading configuration from environment variables with sensible defaults.

use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Connection string used until a client connects elsewhere.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./test.db?mode=rwc";

/// Server configuration.
///
/// Configuration values can be set via environment variables (a `.env` file
/// in the working directory is loaded first):
/// - `DATABASE_URL`: default connection string (default: `sqlite:./test.db?mode=rwc`)
/// - `CONNECT_API_KEY`: API key expected in `X-API-KEY` (default: unset)
/// - `CONNECT_REQUIRES_KEY`: also check the key on `POST /connect` (default: false)
/// - `CHARTS_FILE`: chart record file (default: `charts.json`)
/// - `CHART_API_HOST`: the host address to bind to (default: "0.0.0.0")
/// - `CHART_API_PORT`: the port to listen on (default: 8000)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// `None` disables the API key check entirely.
    pub api_key: Option<String>,
    pub connect_requires_key: bool,
    pub charts_file: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Creates a new configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `CHART_API_PORT` is set but cannot be parsed as a valid port number
    /// - `CONNECT_REQUIRES_KEY` is set but is not a boolean
    pub fn from_env() -> Result<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(defaults.database_url);

        let api_key = lookup("CONNECT_API_KEY").filter(|key| !key.is_empty());

        let connect_requires_key = lookup("CONNECT_REQUIRES_KEY")
            .map(|value| parse_bool(&value))
            .transpose()
            .context("CONNECT_REQUIRES_KEY must be a boolean")?
            .unwrap_or(defaults.connect_requires_key);

        let charts_file = lookup("CHARTS_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.charts_file);

        let host = lookup("CHART_API_HOST").unwrap_or(defaults.host);

        let port = lookup("CHART_API_PORT")
            .map(|p| p.parse::<u16>())
            .transpose()
            .context("CHART_API_PORT must be a port number")?
            .unwrap_or(defaults.port);

        Ok(Self {
            database_url,
            api_key,
            connect_requires_key,
            charts_file,
            host,
            port,
        })
    }

    /// Returns the socket address for binding.
    ///
    /// # Errors
    ///
    /// Returns an error if the host and port do not form a valid socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            api_key: None,
            connect_requires_key: false,
            charts_file: PathBuf::from("charts.json"),
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("not a boolean: {other}"),
    }
}
