//! Metadata providers: one catalog dialect per backend behind a single trait.
//!
//! Every provider composes the shared normalization leaves
//! ([`crate::normalize`]) with its own catalog queries. The three
//! implementations share no behavior beyond the trait; each one owns its SQL,
//! its type table and its default/nullability rules.
//!
//! # Module Structure
//! - `config`: Connection configuration
//! - `helpers`: Row decoding and sqlx error classification
//! - Backend modules (`mysql`, `postgres`, `sqlite`), each gated by its feature

use crate::{
    Result,
    models::{Backend, Column, Table},
};
use async_trait::async_trait;

pub mod config;

pub use config::ConnectionConfig;

/// Capability contract every catalog dialect implements.
///
/// # Guarantees
/// - All catalog access is read-only
/// - At most one query is in flight; the provider holds exactly one connection
/// - Results are freshly built, ordered and never cached between calls
///
/// # Object Safety
/// This trait is object-safe, allowing dynamic dispatch through
/// `Box<dyn MetadataProvider>`.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Lists user tables with empty column sequences.
    ///
    /// Views and backend bookkeeping tables are excluded.
    ///
    /// # Errors
    /// Returns a connection error if catalog access cannot be prepared, or a
    /// query error if execution or row scanning fails.
    async fn list_tables(&self) -> Result<Vec<Table>>;

    /// Lists the columns of one table in catalog ordinal order.
    ///
    /// The implicit `id` column is never returned.
    ///
    /// # Arguments
    /// * `table` - The table's original catalog identifier
    ///
    /// # Errors
    /// Same failure modes as [`MetadataProvider::list_tables`].
    async fn list_columns(&self, table: &str) -> Result<Vec<Column>>;

    /// Returns the catalog dialect this provider speaks.
    fn backend(&self) -> Backend;

    /// Gets the connection configuration (credentials never included).
    fn connection_config(&self) -> ConnectionConfig;

    /// Releases the underlying connection. Safe to call more than once.
    async fn close(&self);
}

/// Opens a provider for an explicitly selected backend.
///
/// # Arguments
/// * `backend` - Catalog dialect (usually parsed from a configuration key)
/// * `connection_string` - Connection URL or, for SQLite, a file path
///
/// # Errors
/// Returns error if:
/// - The backend was not compiled in
/// - The connection string is malformed
/// - The database cannot be reached
///
/// # Example
/// ```rust,no_run
/// use schemagen_core::adapters::connect;
/// use schemagen_core::models::Backend;
///
/// # async fn example() -> schemagen_core::Result<()> {
/// let provider = connect(Backend::Sqlite, "sqlite://app.db").await?;
/// for table in provider.list_tables().await? {
///     println!("{}", table.name);
/// }
/// provider.close().await;
/// # Ok(())
/// # }
/// ```
pub async fn connect(
    backend: Backend,
    connection_string: &str,
) -> Result<Box<dyn MetadataProvider>> {
    match backend {
        #[cfg(feature = "mysql")]
        Backend::MySql => {
            let provider = mysql::MySqlProvider::new(connection_string).await?;
            Ok(Box::new(provider))
        }
        #[cfg(not(feature = "mysql"))]
        Backend::MySql => Err(crate::error::SchemaGenError::configuration(
            "MySQL support not compiled in. Use --features mysql",
        )),
        #[cfg(feature = "postgresql")]
        Backend::Postgres => {
            let provider = postgres::PostgresProvider::new(connection_string).await?;
            Ok(Box::new(provider))
        }
        #[cfg(not(feature = "postgresql"))]
        Backend::Postgres => Err(crate::error::SchemaGenError::configuration(
            "PostgreSQL support not compiled in. Use --features postgresql",
        )),
        #[cfg(feature = "sqlite")]
        Backend::Sqlite => {
            let provider = sqlite::SqliteProvider::new(connection_string).await?;
            Ok(Box::new(provider))
        }
        #[cfg(not(feature = "sqlite"))]
        Backend::Sqlite => Err(crate::error::SchemaGenError::configuration(
            "SQLite support not compiled in. Use --features sqlite",
        )),
    }
}

/// Opens a provider, inferring the backend from the connection string.
///
/// # Errors
/// Returns a configuration error if the format is unrecognized, otherwise the
/// same errors as [`connect`].
pub async fn connect_url(connection_string: &str) -> Result<Box<dyn MetadataProvider>> {
    let backend = detect_backend(connection_string)?;
    connect(backend, connection_string).await
}

/// Infers the catalog dialect from a connection string.
///
/// # Errors
/// Returns a configuration error if the format is unrecognized.
pub fn detect_backend(connection_string: &str) -> Result<Backend> {
    Backend::detect(connection_string)
}

/// Safely redacts credentials from database connection URLs.
#[inline]
pub fn redact_database_url(url: &str) -> String {
    crate::error::redact_database_url(url)
}

#[cfg(any(feature = "postgresql", feature = "mysql", feature = "sqlite"))]
pub mod helpers;

#[cfg(feature = "mysql")]
pub mod mysql;

#[cfg(feature = "postgresql")]
pub mod postgres;

#[cfg(feature = "sqlite")]
pub mod sqlite;
