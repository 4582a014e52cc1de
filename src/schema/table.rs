//! Passive table and column metadata.

use serde::{Deserialize, Serialize};

/// A table as declared in schema metadata.
///
/// Immutable once loaded; owned by the [`SchemaCatalog`].
///
/// [`SchemaCatalog`]: super::SchemaCatalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDef {
    /// Stable metadata identity, unique across the catalog.
    pub id: String,
    /// Physical table name usable in SQL.
    pub name: String,
    /// Optional schema/namespace qualifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

impl TableDef {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            schema: None,
        }
    }

    pub fn with_schema(mut self, schema: &str) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

/// A column as declared in schema metadata.
///
/// Belongs to exactly one table. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Stable metadata identity, unique across the catalog.
    pub id: String,
    /// Id of the owning table.
    pub table: String,
    /// Physical column name usable in SQL.
    pub name: String,
}

impl ColumnDef {
    pub fn new(id: &str, table: &str, name: &str) -> Self {
        Self {
            id: id.into(),
            table: table.into(),
            name: name.into(),
        }
    }
}
