//! Read-only schema catalog.
//!
//! The catalog owns the loaded schema metadata and answers the id-keyed
//! lookups the topology resolver performs. Lookups return `Option`; the
//! caller decides which missing-metadata error the gap maps to.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::relationship::Relationship;
use super::table::{ColumnDef, TableDef};
use crate::sql::TablePath;

/// Resolves a table definition to its qualified, dialect-correct path.
///
/// The synthesizer depends on this capability but does not implement it;
/// [`SchemaCatalog`] supplies the default implementation, and embedders with
/// their own naming scheme (per-tenant prefixes, temp-table staging) can
/// inject a custom resolver.
pub trait TablePathResolver: Send + Sync {
    /// Fully qualified reference for a table.
    fn table_path(&self, table: &TableDef) -> TablePath;
}

/// Immutable, id-keyed schema metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaCatalog {
    tables: HashMap<String, TableDef>,
    columns: HashMap<String, ColumnDef>,
    relationships: HashMap<String, Relationship>,
}

impl SchemaCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table definition, keyed by its id.
    pub fn add_table(&mut self, table: TableDef) -> &mut Self {
        self.tables.insert(table.id.clone(), table);
        self
    }

    /// Add a column definition, keyed by its id.
    pub fn add_column(&mut self, column: ColumnDef) -> &mut Self {
        self.columns.insert(column.id.clone(), column);
        self
    }

    /// Add a relationship, keyed by its id.
    pub fn add_relationship(&mut self, relationship: Relationship) -> &mut Self {
        self.relationships
            .insert(relationship.id.clone(), relationship);
        self
    }

    /// Look up a table by id.
    pub fn table(&self, id: &str) -> Option<&TableDef> {
        self.tables.get(id)
    }

    /// Look up a column by id.
    pub fn column(&self, id: &str) -> Option<&ColumnDef> {
        self.columns.get(id)
    }

    /// Look up a relationship by id.
    pub fn relationship(&self, id: &str) -> Option<&Relationship> {
        self.relationships.get(id)
    }

    /// Look up the table owning a column.
    pub fn column_table(&self, column: &ColumnDef) -> Option<&TableDef> {
        self.tables.get(&column.table)
    }

    /// Iterate over all tables.
    pub fn tables(&self) -> impl Iterator<Item = &TableDef> {
        self.tables.values()
    }

    /// Iterate over all columns.
    pub fn columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.values()
    }

    /// Iterate over all relationships.
    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.values()
    }

    /// Number of tables in the catalog.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Number of columns in the catalog.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of relationships in the catalog.
    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    /// Deserialize a catalog from its JSON representation.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize the catalog to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl TablePathResolver for SchemaCatalog {
    fn table_path(&self, table: &TableDef) -> TablePath {
        let path = TablePath::new(&table.name);
        match &table.schema {
            Some(schema) => path.with_schema(schema),
            None => path,
        }
    }
}
