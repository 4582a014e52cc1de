//! Metadata acquisition.
//!
//! This module sits between persisted schema metadata and the read-only
//! [`SchemaCatalog`] the synthesizer consumes:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                   MetadataSource (async)                │
//! │   list_tables() / list_columns() / list_relationships() │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [MetadataSourceExt::load_catalog]
//! ┌─────────────────────────────────────────────────────────┐
//! │               SchemaCatalog (immutable)                 │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │            RollupSynthesizer (sync, pure)               │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Sources must be idempotent and side-effect-free; loading happens ahead of
//! synthesis, so no lock is held across a metadata fetch.
//!
//! [`SchemaCatalog`]: crate::schema::SchemaCatalog

mod memory;
mod source;

pub use memory::MemoryMetadataSource;
pub use source::{MetadataError, MetadataResult, MetadataSource, MetadataSourceExt};
