//! SQLite connection handling.
//!
//! # Connection Modes
//! - File-based: `sqlite:///path/to/database.db`, `sqlite://./relative.db`,
//!   `file:app.db` or a bare path
//! - In-memory: `sqlite::memory:` or `:memory:`
//!
//! File databases are opened read-only by default and are never created.

use super::SqliteProvider;
use crate::Result;
use crate::adapters::ConnectionConfig;
use crate::adapters::config::SINGLE_CONNECTION;
use crate::adapters::helpers::connection_error;
use crate::error::SchemaGenError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

impl SqliteProvider {
    /// Opens a SQLite provider from a connection string or file path.
    ///
    /// # Errors
    /// Returns error if:
    /// - Connection string format is invalid
    /// - Database file does not exist
    /// - Database cannot be opened
    pub async fn new(connection_string: &str) -> Result<Self> {
        let config = parse_sqlite_connection_config(connection_string)?;
        Self::with_config(connection_string, config).await
    }

    /// Opens a SQLite provider with a custom configuration.
    pub async fn with_config(connection_string: &str, config: ConnectionConfig) -> Result<Self> {
        config.validate()?;
        let pool = create_sqlite_connection(connection_string, &config).await?;
        tracing::debug!("Opened SQLite catalog connection to {}", config);
        Ok(Self { pool, config })
    }

    /// Wraps an already-open pool, e.g. an in-memory database built by a test.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            pool,
            config: ConnectionConfig::new("localhost".to_string())
                .with_database(":memory:".to_string()),
        }
    }
}

/// Parses a SQLite connection string into a [`ConnectionConfig`].
///
/// The host is always `localhost`; the database is the file name.
pub fn parse_sqlite_connection_config(connection_string: &str) -> Result<ConnectionConfig> {
    validate_sqlite_connection_string(connection_string)?;
    Ok(ConnectionConfig::new("localhost".to_string())
        .with_database(extract_database_name(connection_string)))
}

/// Validates SQLite connection string format.
///
/// # Errors
/// Returns error for empty strings and for URLs of other databases.
pub fn validate_sqlite_connection_string(connection_string: &str) -> Result<()> {
    if connection_string.trim().is_empty() {
        return Err(SchemaGenError::configuration(
            "SQLite connection string cannot be empty",
        ));
    }

    if connection_string.contains("://") && !connection_string.starts_with("sqlite://") {
        return Err(SchemaGenError::configuration(
            "Invalid SQLite connection string format: expected sqlite:// URL, file path, or :memory:",
        ));
    }

    Ok(())
}

fn is_in_memory(connection_string: &str) -> bool {
    connection_string.contains(":memory:") || connection_string.contains("mode=memory")
}

/// Extracts the database file name from a connection string.
fn extract_database_name(connection_string: &str) -> String {
    if is_in_memory(connection_string) {
        return ":memory:".to_string();
    }

    let path = connection_string
        .strip_prefix("sqlite://")
        .or_else(|| connection_string.strip_prefix("sqlite:"))
        .or_else(|| connection_string.strip_prefix("file:"))
        .unwrap_or(connection_string);
    let path = path.split('?').next().unwrap_or(path);

    match path.rsplit('/').next() {
        Some(filename) if !filename.is_empty() => filename.to_string(),
        _ => "main".to_string(),
    }
}

/// Normalizes connection string to the `sqlite:` URL form the driver parses.
fn normalize_connection_string(connection_string: &str) -> String {
    if connection_string == ":memory:" {
        return "sqlite::memory:".to_string();
    }

    if connection_string.starts_with("sqlite:") {
        return connection_string.to_string();
    }

    let path = connection_string
        .strip_prefix("file:")
        .unwrap_or(connection_string);
    format!("sqlite://{}", path)
}

async fn create_sqlite_connection(
    connection_string: &str,
    config: &ConnectionConfig,
) -> Result<SqlitePool> {
    let normalized = normalize_connection_string(connection_string);

    let mut options = SqliteConnectOptions::from_str(&normalized).map_err(|e| {
        SchemaGenError::configuration(format!("Invalid SQLite connection string: {}", e))
    })?;

    if config.read_only && !is_in_memory(connection_string) {
        options = options.read_only(true);
    }

    SqlitePoolOptions::new()
        .max_connections(SINGLE_CONNECTION)
        .acquire_timeout(config.connect_timeout)
        .connect_with(options)
        .await
        .map_err(|e| connection_error("SQLite", e))
}
