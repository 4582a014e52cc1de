//! Rollup synthesis error types.
//!
//! Every failure is synchronous and terminal for the call: inputs are either
//! valid metadata (deterministic success) or invalid metadata (deterministic
//! failure), so nothing here is retried or recovered locally.

use thiserror::Error;

use crate::schema::RelationKind;

/// Result type for rollup synthesis.
pub type RollupResult<T> = Result<T, RollupError>;

/// Errors surfaced by topology resolution and synthesis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RollupError {
    /// A referenced table is missing from the catalog.
    #[error("unknown table: '{0}'")]
    UnknownTable(String),

    /// A referenced column is missing from the catalog.
    #[error("unknown column: '{0}'")]
    UnknownColumn(String),

    /// A referenced relationship is missing from the catalog.
    #[error("unknown relationship: '{0}'")]
    UnknownRelationship(String),

    /// A relationship is declared many-to-many but its junction linkage is
    /// missing or degenerate.
    #[error("relationship '{relationship}' is declared many-to-many but has no usable junction linkage")]
    JunctionNotResolved { relationship: String },

    /// The relationship kind cannot be a rollup source.
    #[error("unsupported relationship kind '{kind}' for rollup over relationship '{relationship}'")]
    UnsupportedRelationshipKind {
        relationship: String,
        kind: RelationKind,
    },

    /// The rollup names no aggregate function.
    #[error("rollup over relationship '{relationship}' has an empty aggregate function")]
    EmptyAggregateFunction { relationship: String },
}

impl RollupError {
    /// Whether this error is a missing-metadata condition (as opposed to a
    /// kind/shape problem with metadata that was found).
    pub fn is_metadata_not_found(&self) -> bool {
        matches!(
            self,
            RollupError::UnknownTable(_)
                | RollupError::UnknownColumn(_)
                | RollupError::UnknownRelationship(_)
        )
    }
}
