//! PostgreSQL catalog queries.
//!
//! Tables come from `pg_stat_user_tables` and columns from
//! `information_schema.columns`; both are restricted to the `public` schema
//! of the current database.

use super::type_mapping::map_postgres_type;
use crate::Result;
use crate::adapters::helpers::{RowExt, classify_query_error};
use crate::models::{CatalogValue, Column, Table, is_implicit_id};
use crate::normalize::{DefaultRule, normalize_default};
use sqlx::PgPool;

const TABLES_QUERY: &str = r#"
    SELECT relname::text AS relname
    FROM pg_stat_user_tables
    WHERE schemaname = 'public'
    ORDER BY relname
"#;

const COLUMNS_QUERY: &str = r#"
    SELECT
        column_name::text AS column_name,
        data_type::text AS data_type,
        column_default::text AS column_default,
        character_maximum_length::int4 AS character_maximum_length,
        is_nullable::text AS is_nullable,
        is_updatable::text AS is_updatable
    FROM information_schema.columns
    WHERE table_catalog = $1
      AND table_schema = 'public'
      AND table_name = $2
    ORDER BY ordinal_position
"#;

/// One row of `information_schema.columns`, exactly as scanned.
#[derive(Debug, Clone, PartialEq)]
pub struct PostgresColumnRow {
    pub column_name: String,
    pub data_type: String,
    pub column_default: Option<String>,
    pub character_maximum_length: Option<i32>,
    pub is_nullable: String,
    pub is_updatable: String,
}

impl PostgresColumnRow {
    /// Converts the catalog row into a normalized column; `None` for `id`.
    pub fn into_column(self) -> Option<Column> {
        if is_implicit_id(&self.column_name) {
            return None;
        }

        let semantic_type = map_postgres_type(&self.data_type);
        let mut column = Column::new(self.column_name, semantic_type);
        column.default_value = self
            .column_default
            .map(|raw| normalize_default(CatalogValue::Text(raw), DefaultRule::CastSuffix));
        column.max_length = self
            .character_maximum_length
            .map(|length| u32::try_from(length).unwrap_or(0));
        // Type-gated: a nullable integer is still reported NOT NULL.
        column.nullable = self.is_nullable == "YES" && semantic_type.admits_null();
        column.updatable = self.is_updatable == "YES";
        Some(column)
    }
}

/// Lists user tables in the `public` schema, ordered by name.
pub(crate) async fn list_tables(pool: &PgPool) -> Result<Vec<Table>> {
    let rows = sqlx::query(TABLES_QUERY)
        .fetch_all(pool)
        .await
        .map_err(|e| classify_query_error("Failed to list PostgreSQL tables", e))?;

    let mut tables = Vec::with_capacity(rows.len());
    for row in &rows {
        let name: String = row.get_field("relname", None)?;
        tables.push(Table::new(name));
    }

    tracing::debug!("Found {} PostgreSQL tables", tables.len());
    Ok(tables)
}

/// Lists the columns of `table` in ordinal order, excluding `id`.
pub(crate) async fn list_columns(pool: &PgPool, table: &str) -> Result<Vec<Column>> {
    let database: String = sqlx::query_scalar("SELECT current_database()::text")
        .fetch_one(pool)
        .await
        .map_err(|e| classify_query_error("Failed to resolve current PostgreSQL database", e))?;

    let rows = sqlx::query(COLUMNS_QUERY)
        .bind(&database)
        .bind(table)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            classify_query_error(
                format!("Failed to list columns of PostgreSQL table '{}'", table),
                e,
            )
        })?;

    let mut columns = Vec::with_capacity(rows.len());
    for row in &rows {
        let catalog_row = PostgresColumnRow {
            column_name: row.get_field("column_name", Some(table))?,
            data_type: row.get_field("data_type", Some(table))?,
            column_default: row.get_field("column_default", Some(table))?,
            character_maximum_length: row.get_field("character_maximum_length", Some(table))?,
            is_nullable: row.get_field("is_nullable", Some(table))?,
            is_updatable: row.get_field("is_updatable", Some(table))?,
        };
        columns.extend(catalog_row.into_column());
    }

    tracing::trace!("Table '{}' has {} PostgreSQL columns", table, columns.len());
    Ok(columns)
}
