//! SQLite catalog queries.

use super::type_mapping::map_sqlite_type;
use crate::Result;
use crate::adapters::helpers::{RowExt, classify_query_error};
use crate::models::{CatalogValue, Column, Table, is_implicit_id};
use crate::normalize::{DefaultRule, normalize_default};
use sqlx::SqlitePool;

const TABLES_QUERY: &str = r#"
    SELECT tbl_name
    FROM sqlite_master
    WHERE type = 'table'
      AND tbl_name NOT LIKE 'sqlite\_%' ESCAPE '\'
    ORDER BY tbl_name
"#;

const COLUMNS_QUERY: &str = r#"
    SELECT cid, name, type, "notnull", dflt_value, pk
    FROM pragma_table_info(?)
    ORDER BY cid
"#;

// Positions in COLUMNS_QUERY.
const NAME: usize = 1;
const DECLARED_TYPE: usize = 2;
const NOT_NULL: usize = 3;
const DEFAULT_VALUE: usize = 4;

/// One row of `pragma_table_info`, exactly as scanned.
#[derive(Debug, Clone, PartialEq)]
pub struct SqliteColumnRow {
    pub name: String,
    pub declared_type: String,
    pub not_null: i64,
    /// `dflt_value` is the default's SQL text, whatever its storage class
    pub default_value: Option<String>,
}

impl SqliteColumnRow {
    /// Converts the catalog row into a normalized column; `None` for `id`.
    pub fn into_column(self) -> Option<Column> {
        if is_implicit_id(&self.name) {
            return None;
        }

        let semantic_type = map_sqlite_type(&self.declared_type);
        let mut column = Column::new(self.name, semantic_type);
        column.default_value = self
            .default_value
            .map(|raw| normalize_default(CatalogValue::Text(raw), DefaultRule::QuoteOnly));
        column.nullable = self.not_null == 0;
        column.updatable = true;
        Some(column)
    }
}

/// Lists user tables, skipping `sqlite_*` internals.
pub(crate) async fn list_tables(pool: &SqlitePool) -> Result<Vec<Table>> {
    let rows = sqlx::query(TABLES_QUERY)
        .fetch_all(pool)
        .await
        .map_err(|e| classify_query_error("Failed to list SQLite tables", e))?;

    let mut tables = Vec::with_capacity(rows.len());
    for row in &rows {
        let name: String = row.get_field("tbl_name", None)?;
        tables.push(Table::new(name));
    }

    tracing::debug!("Found {} SQLite tables", tables.len());
    Ok(tables)
}

/// Lists the columns of `table` in declaration order, excluding `id`.
pub(crate) async fn list_columns(pool: &SqlitePool, table: &str) -> Result<Vec<Column>> {
    let rows = sqlx::query(COLUMNS_QUERY)
        .bind(table)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            classify_query_error(format!("Failed to list columns of SQLite table '{}'", table), e)
        })?;

    let mut columns = Vec::with_capacity(rows.len());
    for row in &rows {
        let catalog_row = SqliteColumnRow {
            name: row.get_field(NAME, Some(table))?,
            declared_type: row.get_field(DECLARED_TYPE, Some(table))?,
            not_null: row.get_field(NOT_NULL, Some(table))?,
            default_value: row.get_field(DEFAULT_VALUE, Some(table))?,
        };
        columns.extend(catalog_row.into_column());
    }

    tracing::trace!("Table '{}' has {} SQLite columns", table, columns.len());
    Ok(columns)
}
