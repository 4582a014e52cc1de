//! In-memory metadata source.

use async_trait::async_trait;

use super::source::{MetadataError, MetadataResult, MetadataSource};
use crate::schema::{ColumnDef, Relationship, SchemaCatalog, TableDef};

/// A [`MetadataSource`] backed by a catalog snapshot.
///
/// Used by tests and by embedders whose metadata already lives in process;
/// lookups clone out of the snapshot, so the source stays shareable across
/// tasks.
#[derive(Debug, Clone, Default)]
pub struct MemoryMetadataSource {
    snapshot: SchemaCatalog,
}

impl MemoryMetadataSource {
    pub fn new(snapshot: SchemaCatalog) -> Self {
        Self { snapshot }
    }
}

#[async_trait]
impl MetadataSource for MemoryMetadataSource {
    async fn list_tables(&self) -> MetadataResult<Vec<TableDef>> {
        Ok(self.snapshot.tables().cloned().collect())
    }

    async fn list_columns(&self, table_id: &str) -> MetadataResult<Vec<ColumnDef>> {
        if self.snapshot.table(table_id).is_none() {
            return Err(MetadataError::NotFound(table_id.to_string()));
        }
        Ok(self
            .snapshot
            .columns()
            .filter(|column| column.table == table_id)
            .cloned()
            .collect())
    }

    async fn list_relationships(&self) -> MetadataResult<Vec<Relationship>> {
        Ok(self.snapshot.relationships().cloned().collect())
    }
}
