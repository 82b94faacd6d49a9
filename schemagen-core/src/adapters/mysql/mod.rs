//! MySQL-family metadata provider.
//!
//! # Module Structure
//! - `connection`: Single-connection pool setup
//! - `type_mapping`: MySQL to semantic type conversion
//! - `schema_collection`: Table and column listing via `INFORMATION_SCHEMA`
//!
//! # Catalog Rules
//! - Only `BASE TABLE` entries are listed (views and sequences are skipped)
//! - Defaults go through the full cast-suffix rule
//! - Nullability is gated to String and Bytes columns
//! - Every column is reported updatable

pub mod connection;
pub mod schema_collection;
pub mod type_mapping;


use super::{ConnectionConfig, MetadataProvider};
use crate::Result;
use crate::models::{Backend, Column, Table};
use async_trait::async_trait;
use sqlx::MySqlPool;

pub use type_mapping::{MYSQL_TYPES, map_mysql_type};

/// MySQL metadata provider holding exactly one connection.
pub struct MySqlProvider {
    /// Single-connection pool
    pub pool: MySqlPool,
    /// Connection configuration (credentials never included)
    pub config: ConnectionConfig,
}

impl std::fmt::Debug for MySqlProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlProvider")
            .field("config", &self.config)
            .field("pool_size", &self.pool.size())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MetadataProvider for MySqlProvider {
    async fn list_tables(&self) -> Result<Vec<Table>> {
        schema_collection::list_tables(&self.pool).await
    }

    async fn list_columns(&self, table: &str) -> Result<Vec<Column>> {
        schema_collection::list_columns(&self.pool, table).await
    }

    fn backend(&self) -> Backend {
        Backend::MySql
    }

    fn connection_config(&self) -> ConnectionConfig {
        self.config.clone()
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
