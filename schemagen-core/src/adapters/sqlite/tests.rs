//! Unit tests for SQLite provider.
//!
//! These tests verify:
//! - Type mapping from declared SQLite types to SemanticType
//! - Catalog row to Column conversion
//! - The trait surface (backend, config)

use crate::adapters::MetadataProvider;
use crate::models::{Backend, DefaultValue, SemanticType};

use super::SqliteProvider;
use super::schema_collection::SqliteColumnRow;
use super::type_mapping::map_sqlite_type;

fn row(name: &str, declared_type: &str) -> SqliteColumnRow {
    SqliteColumnRow {
        name: name.to_string(),
        declared_type: declared_type.to_string(),
        not_null: 0,
        default_value: None,
    }
}

// =============================================================================
// Type Mapping Tests
// =============================================================================

#[test]
fn test_map_sqlite_type_is_case_insensitive() {
    assert_eq!(map_sqlite_type("INTEGER"), SemanticType::Int);
    assert_eq!(map_sqlite_type("Int"), SemanticType::Int);
    assert_eq!(map_sqlite_type("TEXT"), SemanticType::String);
    assert_eq!(map_sqlite_type("REAL"), SemanticType::Float);
    assert_eq!(map_sqlite_type("BYTEA"), SemanticType::Bytes);
}

#[test]
fn test_map_sqlite_varchar_prefix() {
    assert_eq!(map_sqlite_type("VARCHAR(255)"), SemanticType::String);
    assert_eq!(map_sqlite_type("varchar(1)"), SemanticType::String);
    assert_eq!(map_sqlite_type("VARCHAR"), SemanticType::Unknown);
    assert_eq!(map_sqlite_type("character varying"), SemanticType::String);
}

#[test]
fn test_map_sqlite_temporal_types() {
    assert_eq!(map_sqlite_type("DATETIME"), SemanticType::Time);
    assert_eq!(map_sqlite_type("date"), SemanticType::Time);
    assert_eq!(map_sqlite_type("TIME"), SemanticType::Time);
    assert_eq!(map_sqlite_type("TIMESTAMP"), SemanticType::Unknown);
}

#[test]
fn test_map_sqlite_unknown_types() {
    assert_eq!(map_sqlite_type(""), SemanticType::Unknown);
    assert_eq!(map_sqlite_type("BLOB"), SemanticType::Unknown);
    assert_eq!(map_sqlite_type("BIGINT"), SemanticType::Unknown);
    assert_eq!(map_sqlite_type("NUMERIC(10,2)"), SemanticType::Unknown);
}

// =============================================================================
// Row Conversion Tests
// =============================================================================

#[test]
fn test_nullability_is_raw_notnull_flag() {
    // Nullable integers stay nullable on SQLite.
    let column = row("age", "INTEGER").into_column().unwrap();
    assert!(column.nullable);

    let mut catalog_row = row("age", "INTEGER");
    catalog_row.not_null = 1;
    assert!(!catalog_row.into_column().unwrap().nullable);
}

#[test]
fn test_defaults_keep_double_colon() {
    let mut catalog_row = row("pattern", "TEXT");
    catalog_row.default_value = Some("'a::b'".to_string());
    assert_eq!(
        catalog_row.into_column().unwrap().default_value,
        Some(DefaultValue::Literal("\"a::b\"".to_string()))
    );
}

#[test]
fn test_numeric_default_is_quoted() {
    let mut catalog_row = row("retries", "INTEGER");
    catalog_row.default_value = Some("0".to_string());
    assert_eq!(
        catalog_row.into_column().unwrap().default_value,
        Some(DefaultValue::Literal("\"0\"".to_string()))
    );
}

#[test]
fn test_length_never_reported() {
    let column = row("title", "VARCHAR(255)").into_column().unwrap();
    assert_eq!(column.max_length, None);
    assert!(column.updatable);
}

#[test]
fn test_id_column_skipped() {
    assert!(row("id", "INTEGER").into_column().is_none());
    assert!(row("Id", "INTEGER").into_column().is_some());
}

// =============================================================================
// Provider Surface Tests
// =============================================================================

#[tokio::test]
async fn test_provider_surface() {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let provider = SqliteProvider::from_pool(pool);

    assert_eq!(provider.backend(), Backend::Sqlite);
    assert_eq!(
        provider.connection_config().database.as_deref(),
        Some(":memory:")
    );
    assert!(provider.list_tables().await.unwrap().is_empty());

    provider.close().await;
    provider.close().await;
}
