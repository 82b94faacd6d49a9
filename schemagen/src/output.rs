//! File output for generation results.
//!
//! Writes one pretty-printed JSON document per table plus a `manifest.json`
//! describing the run.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use schemagen_core::{
    Backend, GenerationSummary, Renderer, Result, SchemaGenError, Table,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name of the run manifest inside the output directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Summary document written after every successful run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub generator: String,
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub backend: Backend,
    pub tables: Vec<ManifestEntry>,
    /// Requested tables that did not exist
    pub unmatched: Vec<String>,
}

/// One rendered table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub file: String,
}

/// Renderer writing `<lowercased table name>.json` files into a directory.
#[derive(Debug)]
pub struct JsonRenderer {
    dir: PathBuf,
    written: Vec<ManifestEntry>,
}

impl JsonRenderer {
    /// Creates the output directory (and parents) if needed.
    ///
    /// # Errors
    /// Returns an I/O error if the directory cannot be created.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| SchemaGenError::Io {
                context: format!("Failed to create output directory {}", dir.display()),
                source: e,
            })?;

        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Artifact file name for a table.
    pub fn file_name(table: &Table) -> String {
        format!("{}.json", table.name.to_lowercase())
    }
}

#[async_trait]
impl Renderer for JsonRenderer {
    async fn render_table(&mut self, table: &Table) -> Result<()> {
        let file = Self::file_name(table);
        if self.written.iter().any(|entry| entry.file == file) {
            warn!(
                "Table '{}' overwrites {} written earlier in this run",
                table.original_name, file
            );
        }

        let json = to_json(table, &table.name)?;
        write_file(&self.dir.join(&file), json).await?;
        debug!("Wrote {}", file);

        self.written.push(ManifestEntry {
            name: table.name.clone(),
            file,
        });
        Ok(())
    }

    async fn finish(&mut self, summary: &GenerationSummary) -> Result<()> {
        let manifest = Manifest {
            generator: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            backend: summary.backend,
            tables: self.written.clone(),
            unmatched: summary.unmatched.clone(),
        };

        let json = to_json(&manifest, MANIFEST_FILE)?;
        write_file(&self.dir.join(MANIFEST_FILE), json).await
    }
}

fn to_json<T: Serialize>(value: &T, what: &str) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| SchemaGenError::Serialization {
        context: format!("Failed to serialize {}", what),
        source: e,
    })
}

async fn write_file(path: &Path, contents: String) -> Result<()> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| SchemaGenError::Io {
            context: format!("Failed to write to {}", path.display()),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemagen_core::{Column, SemanticType};

    fn users_table() -> Table {
        let mut table = Table::new("users");
        table.columns.push(Column::new("email", SemanticType::String));
        table
    }

    #[tokio::test]
    async fn test_render_table_writes_lowercased_file() {
        let temp = tempfile::tempdir().unwrap();
        let mut renderer = JsonRenderer::create(temp.path().join("out")).await.unwrap();

        renderer.render_table(&users_table()).await.unwrap();

        let written = std::fs::read_to_string(temp.path().join("out/users.json")).unwrap();
        let table: Table = serde_json::from_str(&written).unwrap();
        assert_eq!(table, users_table());
    }

    #[tokio::test]
    async fn test_finish_writes_manifest() {
        let temp = tempfile::tempdir().unwrap();
        let mut renderer = JsonRenderer::create(temp.path()).await.unwrap();
        renderer.render_table(&users_table()).await.unwrap();

        let summary = GenerationSummary {
            backend: Backend::Postgres,
            tables: vec!["Users".to_string()],
            unmatched: vec!["ghosts".to_string()],
        };
        renderer.finish(&summary).await.unwrap();

        let manifest: Manifest = serde_json::from_str(
            &std::fs::read_to_string(temp.path().join(MANIFEST_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(manifest.generator, "schemagen");
        assert_eq!(manifest.backend, Backend::Postgres);
        assert_eq!(
            manifest.tables,
            vec![ManifestEntry {
                name: "Users".to_string(),
                file: "users.json".to_string(),
            }]
        );
        assert_eq!(manifest.unmatched, vec!["ghosts"]);
    }

    #[tokio::test]
    async fn test_create_fails_under_a_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let error = JsonRenderer::create(temp.path().join("nested"))
            .await
            .unwrap_err();
        assert!(matches!(error, SchemaGenError::Io { .. }));
    }
}
