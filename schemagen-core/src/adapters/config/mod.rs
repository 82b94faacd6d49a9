//! Configuration types for metadata providers.
//!
//! # Security
//! These configuration structs intentionally do NOT store passwords or
//! credentials; the connection string is handed straight to the driver.

mod connection;

pub use connection::{ConnectionConfig, SINGLE_CONNECTION};
