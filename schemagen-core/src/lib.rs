//! Catalog introspection core for schemagen.
//!
//! This crate reads the catalog metadata of a MySQL, PostgreSQL or SQLite
//! database and turns it into backend-agnostic [`Table`] and [`Column`]
//! records ready for a code generator.
//!
//! # Guarantees
//! - All catalog access is read-only, over exactly one connection
//! - Column order always follows the catalog's ordinal position
//! - The implicit `id` column is never reported
//! - Connection strings never appear in errors or logs
//!
//! # Architecture
//! - [`adapters`]: one [`MetadataProvider`] per catalog dialect
//! - [`normalize`]: identifier, default-value and type-table rules
//! - [`generator`]: the orchestrator that drives a provider into a [`Renderer`]

pub mod adapters;
pub mod error;
pub mod generator;
pub mod logging;
pub mod models;
pub mod normalize;

// Re-export commonly used types
pub use adapters::{ConnectionConfig, MetadataProvider, connect, connect_url};
pub use error::{Result, SchemaGenError};
pub use generator::{GenerationOptions, GenerationSummary, Renderer, generate};
pub use logging::init_logging;
pub use models::{Backend, CatalogValue, Column, DefaultValue, SemanticType, Table};
