//! PostgreSQL to semantic type conversion.

use crate::models::SemanticType;
use crate::normalize::TypeMap;

/// PostgreSQL `information_schema.columns.data_type` vocabulary.
///
/// Only the spellings `information_schema` actually reports are listed;
/// everything else (`bigint`, `boolean`, `numeric`, arrays) is Unknown.
pub const POSTGRES_TYPES: TypeMap = TypeMap::new(&[
    ("bytea", SemanticType::Bytes),
    ("real", SemanticType::Float),
    ("integer", SemanticType::Int),
    ("int", SemanticType::Int),
    ("character varying", SemanticType::String),
    ("text", SemanticType::String),
    ("timestamp without time zone", SemanticType::Time),
    ("timestamp with time zone", SemanticType::Time),
]);

/// Maps a PostgreSQL data type name to its semantic type.
pub fn map_postgres_type(data_type: &str) -> SemanticType {
    POSTGRES_TYPES.lookup(data_type)
}
