//! PostgreSQL connection setup and validation.
//!
//! # Session Settings
//! - `default_transaction_read_only = on` when the config asks for read-only
//! - `application_name` tags the session for `pg_stat_activity`

use super::PostgresProvider;
use crate::Result;
use crate::adapters::config::SINGLE_CONNECTION;
use crate::adapters::helpers::connection_error;
use crate::adapters::{ConnectionConfig, redact_database_url};
use crate::error::SchemaGenError;
use sqlx::PgPool;
use url::Url;

/// PostgreSQL default port, used when the URL names none.
pub const POSTGRES_DEFAULT_PORT: u16 = 5432;

impl PostgresProvider {
    /// Opens a PostgreSQL provider.
    ///
    /// # Arguments
    /// * `connection_string` - `postgres://` or `postgresql://` URL
    ///
    /// # Errors
    /// Returns a configuration error for a malformed URL, or a connection
    /// error if the server cannot be reached.
    pub async fn new(connection_string: &str) -> Result<Self> {
        let config = Self::parse_connection_config(connection_string)?;
        Self::with_config(connection_string, config).await
    }

    /// Opens a PostgreSQL provider with a custom configuration.
    pub async fn with_config(connection_string: &str, config: ConnectionConfig) -> Result<Self> {
        config.validate()?;
        let pool = Self::create_connection(connection_string, &config).await?;

        tracing::debug!(
            "Opened PostgreSQL catalog connection to {}",
            redact_database_url(connection_string)
        );
        Ok(Self { pool, config })
    }

    /// Parses a PostgreSQL connection string into a [`ConnectionConfig`].
    pub fn parse_connection_config(connection_string: &str) -> Result<ConnectionConfig> {
        Self::validate_connection_string(connection_string)?;

        let mut config = ConnectionConfig::from_url(connection_string)?;
        if config.port.is_none() {
            config = config.with_port(POSTGRES_DEFAULT_PORT);
        }
        Ok(config)
    }

    /// Validates connection string format.
    ///
    /// # Errors
    /// Returns error if the scheme is not `postgres`/`postgresql` or no host
    /// is given.
    pub fn validate_connection_string(connection_string: &str) -> Result<()> {
        let url = Url::parse(connection_string).map_err(|e| {
            SchemaGenError::configuration(format!(
                "Invalid PostgreSQL connection string format: {}",
                e
            ))
        })?;

        if !matches!(url.scheme(), "postgres" | "postgresql") {
            return Err(SchemaGenError::configuration(
                "Connection string must use postgres:// or postgresql:// scheme",
            ));
        }

        if url.host_str().is_none() {
            return Err(SchemaGenError::configuration(
                "Connection string must specify a host",
            ));
        }

        Ok(())
    }

    async fn create_connection(connection_string: &str, config: &ConnectionConfig) -> Result<PgPool> {
        use sqlx::Executor;

        let read_only = config.read_only;

        sqlx::postgres::PgPoolOptions::new()
            .max_connections(SINGLE_CONNECTION)
            .min_connections(0)
            .acquire_timeout(config.connect_timeout)
            .after_connect(move |conn, _meta| {
                Box::pin(async move {
                    let app_name = format!("schemagen-{}", env!("CARGO_PKG_VERSION"));
                    conn.execute(format!("SET application_name = '{}'", app_name).as_str())
                        .await?;

                    if read_only {
                        conn.execute("SET default_transaction_read_only = on")
                            .await?;
                    }
                    Ok(())
                })
            })
            .connect(connection_string)
            .await
            .map_err(|e| connection_error("PostgreSQL", e))
    }
}
