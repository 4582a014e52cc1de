//! Schema model - passive metadata the synthesizer reads.
//!
//! Tables, columns, relationships, and rollup specifications are plain data
//! constructed from persisted metadata. The [`SchemaCatalog`] owns the loaded
//! definitions and provides id-keyed lookups plus the default
//! [`TablePathResolver`] implementation.

mod catalog;
mod relationship;
mod rollup;
mod table;

pub use catalog::{SchemaCatalog, TablePathResolver};
pub use relationship::{JunctionLink, RelationKind, Relationship};
pub use rollup::RollupSpec;
pub use table::{ColumnDef, TableDef};
