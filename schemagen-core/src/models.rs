//! Backend-agnostic table and column records.
//!
//! These are plain value objects: providers build them fresh on every call and
//! never touch them again. The generator is the only component allowed to
//! post-process a column (temporal default injection) before rendering.

use crate::normalize::normalize_identifier;
use serde::{Deserialize, Serialize};

/// Catalog dialects with a metadata provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Backend {
    /// MySQL and MariaDB (`information_schema`)
    MySql,
    /// PostgreSQL (`pg_stat_user_tables`, `information_schema`)
    Postgres,
    /// SQLite files and in-memory databases (`sqlite_master`, `PRAGMA`)
    Sqlite,
}

impl Backend {
    /// Every supported backend, in configuration-key order.
    pub const ALL: [Backend; 3] = [Backend::MySql, Backend::Postgres, Backend::Sqlite];

    /// Configuration key that selects this backend.
    pub fn key(self) -> &'static str {
        match self {
            Backend::MySql => "mysql",
            Backend::Postgres => "postgres",
            Backend::Sqlite => "sqlite3",
        }
    }

    /// Whether the catalog applies type-gated nullability.
    ///
    /// MySQL and PostgreSQL only report a column nullable when it is textual
    /// or binary; SQLite reports the raw `notnull` flag.
    pub fn gates_nullability(self) -> bool {
        matches!(self, Backend::MySql | Backend::Postgres)
    }

    /// Infers the backend from a connection string's scheme or file extension.
    ///
    /// # Errors
    /// Returns a configuration error if the format is unrecognized.
    pub fn detect(connection_string: &str) -> crate::Result<Self> {
        if connection_string.starts_with("postgres://")
            || connection_string.starts_with("postgresql://")
        {
            Ok(Backend::Postgres)
        } else if connection_string.starts_with("mysql://")
            || connection_string.starts_with("mariadb://")
        {
            Ok(Backend::MySql)
        } else if connection_string.starts_with("sqlite:")
            || connection_string.starts_with("file:")
            || connection_string == ":memory:"
            || connection_string.ends_with(".db")
            || connection_string.ends_with(".sqlite")
            || connection_string.ends_with(".sqlite3")
        {
            Ok(Backend::Sqlite)
        } else {
            Err(crate::error::SchemaGenError::configuration(
                "Unrecognized database connection string format",
            ))
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::MySql => write!(f, "MySQL"),
            Backend::Postgres => write!(f, "PostgreSQL"),
            Backend::Sqlite => write!(f, "SQLite"),
        }
    }
}

impl std::str::FromStr for Backend {
    type Err = crate::error::SchemaGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Backend::MySql),
            "postgres" | "postgresql" | "pg" => Ok(Backend::Postgres),
            "sqlite3" | "sqlite" => Ok(Backend::Sqlite),
            other => Err(crate::error::SchemaGenError::configuration(format!(
                "Unknown driver '{}': expected one of mysql, postgres, sqlite3",
                other
            ))),
        }
    }
}

/// Semantic classification every native column type is mapped onto.
///
/// `Unknown` is a legitimate terminal value, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemanticType {
    /// Integer and boolean types
    Int,
    /// Floating point and fixed-precision numeric types
    Float,
    /// Character, text, JSON and enumerated types
    String,
    /// Binary types
    Bytes,
    /// Date, time and timestamp types
    Time,
    /// Native type with no mapping
    Unknown,
}

impl SemanticType {
    /// Textual and binary columns are the only ones allowed to stay nullable
    /// on type-gated backends.
    pub fn admits_null(self) -> bool {
        matches!(self, SemanticType::String | SemanticType::Bytes)
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SemanticType::Int => "Int",
            SemanticType::Float => "Float",
            SemanticType::String => "String",
            SemanticType::Bytes => "Bytes",
            SemanticType::Time => "Time",
            SemanticType::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// A default expression exactly as the catalog returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogValue {
    /// Textual default expression
    Text(String),
    /// Integer storage class
    Integer(i64),
    /// Floating point storage class
    Real(f64),
    /// Binary storage class
    Blob(Vec<u8>),
}

/// Column default after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DefaultValue {
    /// Double-quoted literal produced from a textual catalog default
    Literal(String),
    /// Non-textual catalog default, passed through unmodified
    Raw(CatalogValue),
    /// "Current timestamp at write time", injected by the generator
    CurrentTimestamp,
}

/// Normalized column metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Normalized identifier (`user name` becomes `UserName`)
    pub name: String,
    /// Identifier exactly as stored in the catalog
    pub original_name: String,
    /// Classification of the native type
    pub semantic_type: SemanticType,
    /// Normalized default, if the catalog declares one
    pub default_value: Option<DefaultValue>,
    /// Declared character length; never reported by SQLite
    pub max_length: Option<u32>,
    /// Whether the column may hold NULL
    pub nullable: bool,
    /// Whether the catalog allows writes to the column
    pub updatable: bool,
}

impl Column {
    /// Creates a non-nullable, updatable column without default or length.
    pub fn new(original_name: impl Into<String>, semantic_type: SemanticType) -> Self {
        let original_name = original_name.into();
        Self {
            name: normalize_identifier(&original_name),
            original_name,
            semantic_type,
            default_value: None,
            max_length: None,
            nullable: false,
            updatable: true,
        }
    }

    /// True when the column is the implicit primary key every generated
    /// entity already carries.
    pub fn is_implicit_id(&self) -> bool {
        is_implicit_id(&self.original_name)
    }
}

/// Normalized table metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Normalized identifier, singularized when requested
    pub name: String,
    /// Identifier exactly as stored in the catalog
    pub original_name: String,
    /// Columns in ordinal order, without the implicit `id`
    pub columns: Vec<Column>,
    /// Set by the generator once a temporal default has been injected
    pub has_temporal_column: bool,
}

impl Table {
    /// Creates an empty table record from a catalog identifier.
    pub fn new(original_name: impl Into<String>) -> Self {
        let original_name = original_name.into();
        Self {
            name: normalize_identifier(&original_name),
            original_name,
            columns: Vec::new(),
            has_temporal_column: false,
        }
    }
}

/// Identifier of the implicit primary key; such columns are never listed.
pub const IMPLICIT_ID_COLUMN: &str = "id";

/// Exact, case-sensitive match against [`IMPLICIT_ID_COLUMN`].
pub fn is_implicit_id(original_name: &str) -> bool {
    original_name == IMPLICIT_ID_COLUMN
}
