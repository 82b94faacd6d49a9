//! Generation orchestrator.
//!
//! Drives a [`MetadataProvider`] through one run: list tables once, filter
//! them against the caller's allow-list, optionally singularize, list the
//! columns of each selected table in order, inject temporal defaults and hand
//! every finished table to a [`Renderer`]. Nothing runs concurrently; every
//! query is awaited before the next one is issued.

use crate::Result;
use crate::adapters::MetadataProvider;
use crate::models::{Backend, DefaultValue, SemanticType, Table};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Sink for finished tables.
///
/// Implementations decide the artifact format; the orchestrator only
/// guarantees call order: `render_table` once per selected table in catalog
/// order, then `finish` exactly once after a successful run.
#[async_trait]
pub trait Renderer: Send {
    /// Emits one table.
    async fn render_table(&mut self, table: &Table) -> Result<()>;

    /// Emits whatever closes the run (index, manifest).
    async fn finish(&mut self, summary: &GenerationSummary) -> Result<()>;
}

/// Caller-controlled knobs for a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Normalized table names to keep; empty keeps everything
    pub allow_list: Vec<String>,
    /// Whether to singularize table names after filtering
    pub singularize: bool,
}

/// Outcome of a run, handed to [`Renderer::finish`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub backend: Backend,
    /// Final table names, in render order
    pub tables: Vec<String>,
    /// Allow-list entries that matched no table
    pub unmatched: Vec<String>,
}

/// Runs one generation pass and closes the provider afterwards.
///
/// The provider is closed whether the run succeeds or fails; the first error
/// aborts the run and `finish` is not called.
///
/// # Errors
/// Returns the first provider or renderer error.
pub async fn generate(
    provider: Box<dyn MetadataProvider>,
    options: &GenerationOptions,
    renderer: &mut dyn Renderer,
) -> Result<GenerationSummary> {
    let outcome = run(provider.as_ref(), options, renderer).await;
    provider.close().await;
    debug!("Closed {} catalog connection", provider.backend());
    outcome
}

async fn run(
    provider: &dyn MetadataProvider,
    options: &GenerationOptions,
    renderer: &mut dyn Renderer,
) -> Result<GenerationSummary> {
    let backend = provider.backend();
    info!("Reading {} catalog", backend);

    let all_tables = provider.list_tables().await?;
    let (selected, unmatched) = select_tables(all_tables, &options.allow_list);
    for entry in &unmatched {
        warn!("Table '{}' not found in catalog, skipping", entry);
    }
    if selected.is_empty() {
        warn!("No tables selected for generation");
    }

    let mut rendered = Vec::with_capacity(selected.len());
    for mut table in selected {
        if options.singularize {
            table.name = singularize(&table.name);
        }

        table.columns = provider.list_columns(&table.original_name).await?;
        table.has_temporal_column = inject_temporal_defaults(&mut table);
        debug!(
            "Table '{}' ({} columns)",
            table.original_name,
            table.columns.len()
        );

        renderer.render_table(&table).await?;
        rendered.push(table.name);
    }

    let summary = GenerationSummary {
        backend,
        tables: rendered,
        unmatched,
    };
    renderer.finish(&summary).await?;

    info!("Generated {} tables", summary.tables.len());
    Ok(summary)
}

/// Keeps the tables whose normalized name matches an allow-list entry,
/// ignoring case. Returns the kept tables and the entries that matched none.
pub fn select_tables(tables: Vec<Table>, allow_list: &[String]) -> (Vec<Table>, Vec<String>) {
    if allow_list.is_empty() {
        return (tables, Vec::new());
    }

    let wanted: Vec<String> = allow_list.iter().map(|entry| entry.to_lowercase()).collect();
    let unmatched = allow_list
        .iter()
        .zip(&wanted)
        .filter(|(_, lowered)| !tables.iter().any(|t| t.name.to_lowercase() == **lowered))
        .map(|(entry, _)| entry.clone())
        .collect();

    let selected = tables
        .into_iter()
        .filter(|t| wanted.contains(&t.name.to_lowercase()))
        .collect();

    (selected, unmatched)
}

/// Gives every non-nullable Time column without a default a
/// [`DefaultValue::CurrentTimestamp`]. Returns whether any column got one.
pub fn inject_temporal_defaults(table: &mut Table) -> bool {
    let mut injected = false;
    for column in &mut table.columns {
        if column.semantic_type == SemanticType::Time
            && !column.nullable
            && column.default_value.is_none()
        {
            column.default_value = Some(DefaultValue::CurrentTimestamp);
            injected = true;
        }
    }
    injected
}

/// Reduces an English plural to its singular form.
///
/// Irregular and uncountable words follow the pluralize.js rule set, and the
/// casing of the matched suffix is restored, so `OrderItems` becomes
/// `OrderItem` and `People` becomes `Person`.
pub fn singularize(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    pluralizer::pluralize(name, 1, false)
}
