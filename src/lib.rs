//! # Lariat
//!
//! Relation-aware rollup synthesis: correlated aggregate subqueries from
//! declarative schema metadata.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        Schema Metadata (tables, columns, relations)      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [metadata loader]
//! ┌─────────────────────────────────────────────────────────┐
//! │                 SchemaCatalog (immutable)                │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [topology resolver]
//! ┌─────────────────────────────────────────────────────────┐
//! │       RelationTopology (direct / via junction)           │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [rollup synthesizer]
//! ┌─────────────────────────────────────────────────────────┐
//! │     Fragment (correlated aggregate subquery, SQL IR)     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! A [`rollup::Fragment`] is a composable query-builder value, not SQL text:
//! the caller embeds it into an outer [`sql::Query`] (SELECT list, WHERE,
//! ORDER BY) and renders the whole statement for a [`sql::Dialect`].
//!
//! ## Example
//!
//! ```
//! use lariat::prelude::*;
//!
//! let mut catalog = SchemaCatalog::new();
//! catalog
//!     .add_table(TableDef::new("t_orders", "orders"))
//!     .add_table(TableDef::new("t_items", "items"))
//!     .add_column(ColumnDef::new("c_order_id", "t_orders", "id"))
//!     .add_column(ColumnDef::new("c_item_order", "t_items", "order_id"))
//!     .add_column(ColumnDef::new("c_item_price", "t_items", "price"))
//!     .add_relationship(Relationship::new(
//!         "rel_items",
//!         RelationKind::OneToMany,
//!         "c_order_id",
//!         "c_item_order",
//!     ));
//!
//! let synth = RollupSynthesizer::new(&catalog);
//! let spec = RollupSpec::new("rel_items", "c_item_price", "sum");
//! let fragment = synth.synthesize(&spec).unwrap();
//!
//! let sql = fragment.to_sql(Dialect::Postgres);
//! assert!(sql.contains("SUM"));
//! assert!(sql.contains("\"orders\".\"id\" = \"rollup_src\".\"order_id\""));
//! ```

pub mod metadata;
pub mod rollup;
pub mod schema;
pub mod sql;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::metadata::{
        MemoryMetadataSource, MetadataError, MetadataResult, MetadataSource, MetadataSourceExt,
    };
    pub use crate::rollup::{
        unique_source_alias, Fragment, RelationTopology, RollupError, RollupResult,
        RollupSynthesizer, SynthOptions, ROLLUP_SOURCE_ALIAS,
    };
    pub use crate::schema::{
        ColumnDef, JunctionLink, RelationKind, Relationship, RollupSpec, SchemaCatalog, TableDef,
        TablePathResolver,
    };
    pub use crate::sql::{
        col, count_star, func, lit_int, path_col, sum, table_col, Dialect, Expr, ExprExt,
        OrderByExpr, Query, SelectExpr, SqlDialect, TablePath, TableRef,
    };
}

// Also export the core types at the crate root for convenience
pub use rollup::{Fragment, RollupError, RollupResult, RollupSynthesizer, SynthOptions};
pub use schema::{RollupSpec, SchemaCatalog};
pub use sql::{Dialect, Expr, Query};
