//! SQLite to semantic type conversion.
//!
//! SQLite stores whatever type name the `CREATE TABLE` statement declared, so
//! the declared name is lower-cased before lookup and length-parameterized
//! `varchar(n)` is matched by prefix.

use crate::models::SemanticType;
use crate::normalize::TypeMap;

/// Declared-type vocabulary recognized for SQLite columns.
pub const SQLITE_TYPES: TypeMap = TypeMap::new(&[
    ("bytea", SemanticType::Bytes),
    ("real", SemanticType::Float),
    ("integer", SemanticType::Int),
    ("int", SemanticType::Int),
    ("character varying", SemanticType::String),
    ("text", SemanticType::String),
    ("datetime", SemanticType::Time),
    ("date", SemanticType::Time),
    ("time", SemanticType::Time),
])
.with_prefixes(&[("varchar(", SemanticType::String)]);

/// Maps a declared SQLite column type to its semantic type.
///
/// # Example
/// ```rust
/// use schemagen_core::adapters::sqlite::map_sqlite_type;
/// use schemagen_core::models::SemanticType;
///
/// assert_eq!(map_sqlite_type("VARCHAR(255)"), SemanticType::String);
/// assert_eq!(map_sqlite_type("INTEGER"), SemanticType::Int);
/// assert_eq!(map_sqlite_type("BLOB"), SemanticType::Unknown);
/// ```
pub fn map_sqlite_type(declared_type: &str) -> SemanticType {
    SQLITE_TYPES.lookup(&declared_type.to_lowercase())
}
