//! MySQL to semantic type conversion.
//!
//! `INFORMATION_SCHEMA.COLUMNS.DATA_TYPE` already reports the bare, lower-case
//! type name (no length or `unsigned` modifier), so the lookup is exact.

use crate::models::SemanticType;
use crate::normalize::TypeMap;

/// Native MySQL type vocabulary.
pub const MYSQL_TYPES: TypeMap = TypeMap::new(&[
    ("binary", SemanticType::Bytes),
    ("blob", SemanticType::Bytes),
    ("tinyint", SemanticType::Int),
    ("smallint", SemanticType::Int),
    ("mediumint", SemanticType::Int),
    ("int", SemanticType::Int),
    ("integer", SemanticType::Int),
    ("bigint", SemanticType::Int),
    ("float", SemanticType::Float),
    ("double", SemanticType::Float),
    ("double precision", SemanticType::Float),
    ("real", SemanticType::Float),
    ("char", SemanticType::String),
    ("varchar", SemanticType::String),
    ("tinytext", SemanticType::String),
    ("text", SemanticType::String),
    ("longtext", SemanticType::String),
    ("datetime", SemanticType::Time),
    ("date", SemanticType::Time),
    ("time", SemanticType::Time),
    ("timestamp", SemanticType::Time),
]);

/// Maps a MySQL `DATA_TYPE` value to its semantic type.
///
/// # Example
/// ```rust
/// use schemagen_core::adapters::mysql::map_mysql_type;
/// use schemagen_core::models::SemanticType;
///
/// assert_eq!(map_mysql_type("varchar"), SemanticType::String);
/// assert_eq!(map_mysql_type("decimal"), SemanticType::Unknown);
/// ```
pub fn map_mysql_type(data_type: &str) -> SemanticType {
    MYSQL_TYPES.lookup(data_type)
}
