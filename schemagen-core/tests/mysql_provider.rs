//! MySQL metadata provider integration tests.
//!
//! These tests start a MySQL container and therefore need a Docker daemon;
//! run them with `cargo test -- --ignored`.

#![cfg(feature = "mysql")]

use schemagen_core::{
    Result,
    adapters::{MetadataProvider, mysql::MySqlProvider},
    error::SchemaGenError,
    models::{DefaultValue, SemanticType},
};
use sqlx::MySqlPool;
use std::time::Duration;
use testcontainers_modules::{mysql::Mysql, testcontainers::runners::AsyncRunner};

/// Helper function to wait for MySQL to be ready
async fn wait_for_mysql_ready(database_url: &str, max_attempts: u32) -> Result<MySqlPool> {
    for attempt in 1..=max_attempts {
        if let Ok(pool) = MySqlPool::connect(database_url).await {
            if sqlx::query("SELECT 1").fetch_one(&pool).await.is_ok() {
                return Ok(pool);
            }
            pool.close().await;
        }
        if attempt < max_attempts {
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
    }
    Err(SchemaGenError::connection_failed(std::io::Error::new(
        std::io::ErrorKind::TimedOut,
        format!(
            "MySQL failed to become ready after {} attempts",
            max_attempts
        ),
    )))
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_mysql_list_tables_and_columns() -> Result<()> {
    let mysql = Mysql::default().start().await.unwrap();
    let port = mysql.get_host_port_ipv4(3306).await.unwrap();
    let database_url = format!("mysql://root@localhost:{}/test", port);

    let pool = wait_for_mysql_ready(&database_url, 30).await?;
    for statement in [
        "CREATE TABLE users (
            id INT AUTO_INCREMENT PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            status VARCHAR(20) DEFAULT 'active',
            age INT NULL,
            avatar BLOB NULL,
            created_at DATETIME NOT NULL
        )",
        "CREATE TABLE orders (id INT AUTO_INCREMENT PRIMARY KEY, total DOUBLE NOT NULL)",
        "CREATE VIEW active_users AS SELECT * FROM users WHERE status = 'active'",
    ] {
        sqlx::query(statement).execute(&pool).await.unwrap();
    }
    pool.close().await;

    let provider = MySqlProvider::new(&database_url).await?;

    let tables = provider.list_tables().await?;
    let names: Vec<&str> = tables.iter().map(|t| t.original_name.as_str()).collect();
    assert_eq!(names, vec!["orders", "users"]);

    let columns = provider.list_columns("users").await?;
    let names: Vec<&str> = columns.iter().map(|c| c.original_name.as_str()).collect();
    assert_eq!(names, vec!["name", "status", "age", "avatar", "created_at"]);

    assert_eq!(columns[0].semantic_type, SemanticType::String);
    assert_eq!(columns[0].max_length, Some(100));
    assert!(!columns[0].nullable);

    assert_eq!(
        columns[1].default_value,
        Some(DefaultValue::Literal("\"active\"".to_string()))
    );
    assert!(columns[1].nullable);

    assert_eq!(columns[2].semantic_type, SemanticType::Int);
    assert!(!columns[2].nullable, "nullable integer is reported NOT NULL");

    assert_eq!(columns[3].semantic_type, SemanticType::Bytes);
    assert!(columns[3].nullable);

    assert_eq!(columns[4].semantic_type, SemanticType::Time);
    assert!(columns.iter().all(|c| c.updatable));

    let orders = provider.list_columns("orders").await?;
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].semantic_type, SemanticType::Float);

    provider.close().await;
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_mysql_without_database_is_query_error() -> Result<()> {
    let mysql = Mysql::default().start().await.unwrap();
    let port = mysql.get_host_port_ipv4(3306).await.unwrap();
    let server_url = format!("mysql://root@localhost:{}", port);

    wait_for_mysql_ready(&format!("{}/test", server_url), 30)
        .await?
        .close()
        .await;

    let provider = MySqlProvider::new(&server_url).await?;
    let error = provider.list_tables().await.unwrap_err();
    assert!(error.is_query());
    let error = provider.list_columns("users").await.unwrap_err();
    assert!(error.is_query());
    provider.close().await;
    Ok(())
}

#[tokio::test]
async fn test_mysql_invalid_scheme_is_configuration_error() {
    let error = MySqlProvider::new("postgres://localhost/db").await.unwrap_err();
    assert!(matches!(error, SchemaGenError::Configuration { .. }));
}
