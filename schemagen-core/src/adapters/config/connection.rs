//! Catalog connection configuration.
//!
//! Every provider holds exactly one connection for the whole run, so there is
//! no pool sizing here: the pool is always capped at [`SINGLE_CONNECTION`].

use crate::error::SchemaGenError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Pool size used by every provider: one query in flight at a time.
pub const SINGLE_CONNECTION: u32 = 1;

/// Configuration for the catalog connection.
///
/// # Security
/// This struct intentionally does NOT store passwords or credentials.
///
/// # Example
/// ```rust
/// use schemagen_core::adapters::ConnectionConfig;
///
/// let config = ConnectionConfig::new("localhost".to_string())
///     .with_port(5432)
///     .with_database("app".to_string());
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Database host address
    pub host: String,
    /// Optional port number
    pub port: Option<u16>,
    /// Optional database name (file name for SQLite)
    pub database: Option<String>,
    /// Optional username (password handled by the driver only)
    pub username: Option<String>,
    /// How long to wait for the single connection to open
    pub connect_timeout: Duration,
    /// Whether to open the session read-only
    pub read_only: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: None,
            database: None,
            username: None,
            connect_timeout: Duration::from_secs(30),
            read_only: true,
        }
    }
}

impl std::fmt::Display for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ConnectionConfig({}{}{})",
            self.host,
            self.port.map_or_else(String::new, |p| format!(":{}", p)),
            self.database
                .as_ref()
                .map_or_else(String::new, |db| format!("/{}", db))
        )
        // Username and credentials are never displayed
    }
}

impl ConnectionConfig {
    /// Validates connection configuration parameters.
    ///
    /// # Errors
    /// Returns a configuration error if values are invalid
    pub fn validate(&self) -> crate::Result<()> {
        if self.host.is_empty() {
            return Err(SchemaGenError::configuration("host cannot be empty"));
        }

        if self.port == Some(0) {
            return Err(SchemaGenError::configuration(
                "port must be greater than 0",
            ));
        }

        if self.connect_timeout.is_zero() {
            return Err(SchemaGenError::configuration(
                "connect_timeout must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Creates a new connection config with safe defaults.
    pub fn new(host: String) -> Self {
        Self {
            host,
            ..Default::default()
        }
    }

    /// Derives a config from a server URL (`mysql://`, `postgres://`).
    ///
    /// # Errors
    /// Returns a configuration error if the URL cannot be parsed or carries
    /// port 0.
    pub fn from_url(connection_string: &str) -> crate::Result<Self> {
        let url = Url::parse(connection_string).map_err(|e| {
            SchemaGenError::configuration(format!("Invalid connection string format: {}", e))
        })?;

        let mut config = Self::new(url.host_str().unwrap_or("localhost").to_string());

        if let Some(port) = url.port() {
            config = config.with_port(port);
        }

        let database = url.path().trim_start_matches('/');
        if !database.is_empty() {
            config = config.with_database(database.to_string());
        }

        if !url.username().is_empty() {
            config = config.with_username(url.username().to_string());
        }

        config.validate()?;
        Ok(config)
    }

    /// Builder method to set port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Builder method to set database.
    pub fn with_database(mut self, database: String) -> Self {
        self.database = Some(database);
        self
    }

    /// Builder method to set username.
    pub fn with_username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    /// Builder method to set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Builder method to toggle read-only sessions.
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }
}
