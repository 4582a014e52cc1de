//! MetadataSource trait definition.
//!
//! The MetadataSource trait abstracts over different ways of fetching schema
//! metadata (a metadata database, a remote service, an in-memory snapshot).
//! Lookups must be idempotent and side-effect-free; the synthesizer never
//! talks to a source directly, it reads the [`SchemaCatalog`] loaded from one.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::schema::{ColumnDef, Relationship, SchemaCatalog, TableDef};

/// Result type for metadata operations.
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Errors that can occur while fetching metadata.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// A referenced metadata entity does not exist at the source.
    #[error("metadata not found: {0}")]
    NotFound(String),

    /// The backing store failed.
    #[error("metadata backend error: {0}")]
    Backend(String),
}

/// Trait for fetching schema metadata.
///
/// Implementations may be backed by network I/O; all methods are async and
/// must be safe to call concurrently.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// List all table definitions.
    async fn list_tables(&self) -> MetadataResult<Vec<TableDef>>;

    /// List the columns of one table, by table id.
    async fn list_columns(&self, table_id: &str) -> MetadataResult<Vec<ColumnDef>>;

    /// List all declared relationships.
    async fn list_relationships(&self) -> MetadataResult<Vec<Relationship>>;
}

/// Extension trait for [`MetadataSource`] with catalog assembly.
#[async_trait]
pub trait MetadataSourceExt: MetadataSource {
    /// Fetch all metadata and assemble a [`SchemaCatalog`].
    ///
    /// Column fetches fan out in parallel, one request per table; the first
    /// failure aborts the load.
    async fn load_catalog(&self) -> MetadataResult<SchemaCatalog> {
        let tables = self.list_tables().await?;

        let futures: Vec<_> = tables
            .iter()
            .map(|table| self.list_columns(&table.id))
            .collect();
        let column_results = futures::future::join_all(futures).await;

        let mut catalog = SchemaCatalog::new();
        for table in tables {
            catalog.add_table(table);
        }
        for result in column_results {
            for column in result? {
                catalog.add_column(column);
            }
        }
        for relationship in self.list_relationships().await? {
            catalog.add_relationship(relationship);
        }

        debug!(
            tables = catalog.table_count(),
            columns = catalog.column_count(),
            relationships = catalog.relationship_count(),
            "loaded schema catalog"
        );

        Ok(catalog)
    }
}

// Blanket implementation for all MetadataSource implementations
impl<T: MetadataSource> MetadataSourceExt for T {}
