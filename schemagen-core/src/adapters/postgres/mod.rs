//! PostgreSQL metadata provider.
//!
//! # Module Structure
//! - `connection`: Single-connection pool setup and URL validation
//! - `type_mapping`: PostgreSQL to semantic type conversion
//! - `schema_collection`: Table and column listing for the `public` schema

pub mod connection;
pub mod schema_collection;
pub mod type_mapping;


use super::{ConnectionConfig, MetadataProvider};
use crate::Result;
use crate::models::{Backend, Column, Table};
use async_trait::async_trait;
use sqlx::PgPool;

pub use type_mapping::{POSTGRES_TYPES, map_postgres_type};

/// PostgreSQL metadata provider holding exactly one connection.
pub struct PostgresProvider {
    pub pool: PgPool,
    pub config: ConnectionConfig,
}

impl std::fmt::Debug for PostgresProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MetadataProvider for PostgresProvider {
    async fn list_tables(&self) -> Result<Vec<Table>> {
        schema_collection::list_tables(&self.pool).await
    }

    async fn list_columns(&self, table: &str) -> Result<Vec<Column>> {
        schema_collection::list_columns(&self.pool, table).await
    }

    fn backend(&self) -> Backend {
        Backend::Postgres
    }

    fn connection_config(&self) -> ConnectionConfig {
        self.config.clone()
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
