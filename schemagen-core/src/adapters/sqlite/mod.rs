//! SQLite metadata provider.
//!
//! # Module Structure
//! - `connection`: File and in-memory connection handling
//! - `type_mapping`: Declared type to semantic type conversion
//! - `schema_collection`: Table listing via `sqlite_master`, columns via
//!   `pragma_table_info`
//!
//! # SQLite-Specific Rules
//! - Nullability is the raw `notnull` flag, not type-gated
//! - Defaults are quote-trimmed but never cast-stripped
//! - Column length is never reported
//! - Internal `sqlite_*` tables are skipped

pub mod connection;
pub mod schema_collection;
pub mod type_mapping;

#[cfg(test)]
mod tests;

use super::{ConnectionConfig, MetadataProvider};
use crate::Result;
use crate::models::{Backend, Column, Table};
use async_trait::async_trait;
use sqlx::SqlitePool;

pub use type_mapping::{SQLITE_TYPES, map_sqlite_type};

/// SQLite metadata provider holding exactly one connection.
pub struct SqliteProvider {
    /// Single-connection pool
    pub pool: SqlitePool,
    /// Connection configuration
    pub config: ConnectionConfig,
}

impl std::fmt::Debug for SqliteProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MetadataProvider for SqliteProvider {
    async fn list_tables(&self) -> Result<Vec<Table>> {
        schema_collection::list_tables(&self.pool).await
    }

    async fn list_columns(&self, table: &str) -> Result<Vec<Column>> {
        schema_collection::list_columns(&self.pool, table).await
    }

    fn backend(&self) -> Backend {
        Backend::Sqlite
    }

    fn connection_config(&self) -> ConnectionConfig {
        self.config.clone()
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
