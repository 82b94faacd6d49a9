//! MySQL catalog queries.
//!
//! Both queries read `INFORMATION_SCHEMA`, scoped to the database the session
//! is connected to. Every catalog string is cast to `CHAR` because MySQL 8
//! reports several of these columns as binary.

use super::type_mapping::map_mysql_type;
use crate::Result;
use crate::adapters::helpers::{RowExt, classify_query_error};
use crate::error::SchemaGenError;
use crate::models::{CatalogValue, Column, Table, is_implicit_id};
use crate::normalize::{DefaultRule, normalize_default};
use sqlx::MySqlPool;

const TABLES_QUERY: &str = r#"
    SELECT CAST(TABLE_NAME AS CHAR) AS TABLE_NAME
    FROM INFORMATION_SCHEMA.TABLES
    WHERE TABLE_SCHEMA = ?
      AND TABLE_TYPE = 'BASE TABLE'
    ORDER BY TABLE_NAME
"#;

const COLUMNS_QUERY: &str = r#"
    SELECT
        CAST(COLUMN_NAME AS CHAR) AS COLUMN_NAME,
        CAST(DATA_TYPE AS CHAR) AS DATA_TYPE,
        CAST(COLUMN_DEFAULT AS CHAR) AS COLUMN_DEFAULT,
        CAST(CHARACTER_MAXIMUM_LENGTH AS SIGNED) AS CHARACTER_MAXIMUM_LENGTH,
        CAST(IS_NULLABLE AS CHAR) AS IS_NULLABLE
    FROM INFORMATION_SCHEMA.COLUMNS
    WHERE TABLE_CATALOG = 'def'
      AND TABLE_SCHEMA = ?
      AND TABLE_NAME = ?
    ORDER BY ORDINAL_POSITION
"#;

/// One row of the MySQL column catalog, exactly as scanned.
#[derive(Debug, Clone, PartialEq)]
pub struct MySqlColumnRow {
    pub column_name: String,
    pub data_type: String,
    pub column_default: Option<String>,
    pub character_maximum_length: Option<i64>,
    pub is_nullable: String,
}

impl MySqlColumnRow {
    /// Converts the catalog row into a normalized column.
    ///
    /// Returns `None` for the implicit `id` column.
    pub fn into_column(self) -> Option<Column> {
        if is_implicit_id(&self.column_name) {
            return None;
        }

        let semantic_type = map_mysql_type(&self.data_type);
        let mut column = Column::new(self.column_name, semantic_type);
        column.default_value = self
            .column_default
            .map(|raw| normalize_default(CatalogValue::Text(raw), DefaultRule::CastSuffix));
        column.max_length = self.character_maximum_length.map(clamp_length);
        column.nullable = self.is_nullable == "YES" && semantic_type.admits_null();
        column.updatable = true;
        Some(column)
    }
}

pub(crate) fn clamp_length(length: i64) -> u32 {
    u32::try_from(length.max(0)).unwrap_or(u32::MAX)
}

/// Resolves the database the session is connected to.
async fn current_database(pool: &MySqlPool) -> Result<String> {
    let database: Option<String> = sqlx::query_scalar("SELECT CAST(DATABASE() AS CHAR)")
        .fetch_one(pool)
        .await
        .map_err(|e| classify_query_error("Failed to resolve current MySQL database", e))?;

    require_database(database)
}

/// `DATABASE()` is NULL when the session has no default schema.
pub(crate) fn require_database(database: Option<String>) -> Result<String> {
    database.ok_or_else(|| {
        SchemaGenError::query_failed(
            "MySQL session has no database selected",
            sqlx::Error::Decode("DATABASE() returned NULL".into()),
        )
    })
}

/// Lists base tables of the connected database, ordered by name.
pub(crate) async fn list_tables(pool: &MySqlPool) -> Result<Vec<Table>> {
    let database = current_database(pool).await?;
    tracing::debug!("Listing MySQL tables in database '{}'", database);

    let rows = sqlx::query(TABLES_QUERY)
        .bind(&database)
        .fetch_all(pool)
        .await
        .map_err(|e| classify_query_error("Failed to list MySQL tables", e))?;

    let mut tables = Vec::with_capacity(rows.len());
    for row in &rows {
        let name: String = row.get_field("TABLE_NAME", None)?;
        tables.push(Table::new(name));
    }

    tracing::debug!("Found {} MySQL tables", tables.len());
    Ok(tables)
}

/// Lists the columns of `table` in ordinal order, excluding `id`.
pub(crate) async fn list_columns(pool: &MySqlPool, table: &str) -> Result<Vec<Column>> {
    let database = current_database(pool).await?;

    let rows = sqlx::query(COLUMNS_QUERY)
        .bind(&database)
        .bind(table)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            classify_query_error(format!("Failed to list columns of MySQL table '{}'", table), e)
        })?;

    let mut columns = Vec::with_capacity(rows.len());
    for row in &rows {
        let catalog_row = MySqlColumnRow {
            column_name: row.get_field("COLUMN_NAME", Some(table))?,
            data_type: row.get_field("DATA_TYPE", Some(table))?,
            column_default: row.get_field("COLUMN_DEFAULT", Some(table))?,
            character_maximum_length: row.get_field("CHARACTER_MAXIMUM_LENGTH", Some(table))?,
            is_nullable: row.get_field("IS_NULLABLE", Some(table))?,
        };
        columns.extend(catalog_row.into_column());
    }

    tracing::trace!("Table '{}' has {} MySQL columns", table, columns.len());
    Ok(columns)
}
