//! MySQL single-connection setup and validation.
//!
//! The pool is capped at one connection and opened eagerly, so an unreachable
//! server fails here as a connection error instead of on the first query.

use super::MySqlProvider;
use crate::Result;
use crate::adapters::config::SINGLE_CONNECTION;
use crate::adapters::helpers::connection_error;
use crate::adapters::{ConnectionConfig, redact_database_url};
use crate::error::SchemaGenError;
use sqlx::MySqlPool;
use tracing::debug;
use url::Url;

/// MySQL default port, used when the URL names none.
pub const MYSQL_DEFAULT_PORT: u16 = 3306;

impl MySqlProvider {
    /// Opens a MySQL provider.
    ///
    /// # Arguments
    /// * `connection_string` - `mysql://` or `mariadb://` URL (credentials
    ///   sanitized in errors)
    ///
    /// # Errors
    /// Returns error if:
    /// - Connection string format is invalid
    /// - The server cannot be reached
    pub async fn new(connection_string: &str) -> Result<Self> {
        let config = parse_mysql_connection_config(connection_string)?;
        Self::with_config(connection_string, config).await
    }

    /// Opens a MySQL provider with a custom configuration.
    pub async fn with_config(connection_string: &str, config: ConnectionConfig) -> Result<Self> {
        config.validate()?;
        let url = mysql_driver_url(connection_string)?;
        let pool = create_mysql_connection(&url, &config).await?;

        debug!(
            "Opened MySQL catalog connection to {}",
            redact_database_url(connection_string)
        );
        Ok(Self { pool, config })
    }
}

/// Parses a MySQL connection string into a [`ConnectionConfig`].
pub fn parse_mysql_connection_config(connection_string: &str) -> Result<ConnectionConfig> {
    validate_mysql_connection_string(connection_string)?;

    let mut config = ConnectionConfig::from_url(connection_string)?;
    if config.port.is_none() {
        config = config.with_port(MYSQL_DEFAULT_PORT);
    }
    Ok(config)
}

/// Validates MySQL connection string format.
///
/// # Errors
/// Returns a configuration error for a non-MySQL scheme or a missing host.
pub fn validate_mysql_connection_string(connection_string: &str) -> Result<()> {
    let url = Url::parse(connection_string).map_err(|e| {
        SchemaGenError::configuration(format!("Invalid MySQL connection string format: {}", e))
    })?;

    if !matches!(url.scheme(), "mysql" | "mariadb") {
        return Err(SchemaGenError::configuration(
            "Connection string must use mysql:// or mariadb:// scheme",
        ));
    }

    if url.host_str().is_none() {
        return Err(SchemaGenError::configuration(
            "Connection string must specify a host",
        ));
    }

    Ok(())
}

/// Rewrites a `mariadb://` URL to the scheme the driver understands.
fn mysql_driver_url(connection_string: &str) -> Result<String> {
    validate_mysql_connection_string(connection_string)?;
    Ok(match connection_string.strip_prefix("mariadb://") {
        Some(rest) => format!("mysql://{}", rest),
        None => connection_string.to_string(),
    })
}

async fn create_mysql_connection(url: &str, config: &ConnectionConfig) -> Result<MySqlPool> {
    use sqlx::Executor;

    let read_only = config.read_only;

    sqlx::mysql::MySqlPoolOptions::new()
        .max_connections(SINGLE_CONNECTION)
        .min_connections(0)
        .acquire_timeout(config.connect_timeout)
        .after_connect(move |conn, _meta| {
            Box::pin(async move {
                if read_only {
                    conn.execute("SET SESSION TRANSACTION READ ONLY").await?;
                }
                Ok(())
            })
        })
        .connect(url)
        .await
        .map_err(|e| connection_error("MySQL", e))
}
