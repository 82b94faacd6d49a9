//! Helper utilities shared by the sqlx-backed providers.
//!
//! Keeps row decoding and error classification identical across dialects so
//! every backend reports Connection versus Query failures the same way.

use crate::{Result, error::SchemaGenError};
use sqlx::{ColumnIndex, Decode, Row, Type};
use std::fmt::Display;

/// Extension trait for extracting typed values from catalog rows with
/// consistent error handling.
///
/// # Example
/// ```rust,ignore
/// use schemagen_core::adapters::helpers::RowExt;
///
/// let name: String = row.get_field("column_name", Some("users"))?;
/// let not_null: i64 = row.get_field(3, Some("users"))?;
/// ```
pub trait RowExt: Row {
    /// Extracts a typed field by name or position.
    ///
    /// # Arguments
    /// * `index` - Column name or zero-based position
    /// * `table_context` - Optional table name for error messages
    fn get_field<'r, T, I>(&'r self, index: I, table_context: Option<&str>) -> Result<T>
    where
        I: ColumnIndex<Self> + Display + Copy,
        T: Decode<'r, Self::Database> + Type<Self::Database>;
}

impl<R: Row> RowExt for R {
    fn get_field<'r, T, I>(&'r self, index: I, table_context: Option<&str>) -> Result<T>
    where
        I: ColumnIndex<Self> + Display + Copy,
        T: Decode<'r, Self::Database> + Type<Self::Database>,
    {
        self.try_get(index)
            .map_err(|e| SchemaGenError::parse_field(&index.to_string(), table_context, e))
    }
}

/// Classifies a sqlx failure raised while running a catalog query.
///
/// Transport-level failures (pool exhaustion, closed pool, I/O, TLS) mean
/// catalog access itself is gone and surface as connection errors; anything
/// else is a query error.
pub fn classify_query_error(context: impl Into<String>, error: sqlx::Error) -> SchemaGenError {
    match error {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => SchemaGenError::Connection {
            context: context.into(),
            source: Box::new(error),
        },
        other => SchemaGenError::query_failed(context, other),
    }
}

/// Wraps a failure to open the single catalog connection.
pub fn connection_error(backend: &str, error: sqlx::Error) -> SchemaGenError {
    SchemaGenError::Connection {
        context: format!("Failed to open {} catalog connection", backend),
        source: Box::new(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors_are_connection_errors() {
        let error = classify_query_error("Failed to list tables", sqlx::Error::PoolTimedOut);
        assert!(error.is_connection());

        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        let error = classify_query_error("Failed to list tables", sqlx::Error::Io(io));
        assert!(error.is_connection());
    }

    #[test]
    fn test_other_errors_are_query_errors() {
        let error = classify_query_error("Failed to list columns", sqlx::Error::RowNotFound);
        assert!(error.is_query());
        assert!(error.to_string().contains("Failed to list columns"));
    }

    #[test]
    fn test_connection_error_context_names_backend() {
        let error = connection_error("PostgreSQL", sqlx::Error::PoolClosed);
        assert!(error.is_connection());
        assert!(error.to_string().contains("PostgreSQL"));
    }
}
