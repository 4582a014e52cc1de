//! Typed relationship metadata.
//!
//! A relationship links a parent-side column to a child-side column; a
//! many-to-many relationship additionally names a junction table and its two
//! foreign-key columns. The junction keys are carried under explicit names
//! (`parent_key` / `child_key`) rather than positionally - resolving them
//! backwards produces a syntactically valid but wrong query.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of a declared relationship.
///
/// `ManyToOne` is a real kind that metadata stores persist (the inverse side
/// of `OneToMany`), but it is not a rollup source; the synthesizer rejects it
/// explicitly. New kinds added here are compile-time-checked extension
/// points: every match over this enum is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::OneToOne => "one_to_one",
            RelationKind::OneToMany => "one_to_many",
            RelationKind::ManyToOne => "many_to_one",
            RelationKind::ManyToMany => "many_to_many",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Junction linkage for a many-to-many relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JunctionLink {
    /// Id of the junction table.
    pub table: String,
    /// Id of the junction column referencing the parent column's domain.
    pub parent_key: String,
    /// Id of the junction column referencing the child column's domain.
    pub child_key: String,
}

impl JunctionLink {
    pub fn new(table: &str, parent_key: &str, child_key: &str) -> Self {
        Self {
            table: table.into(),
            parent_key: parent_key.into(),
            child_key: child_key.into(),
        }
    }
}

/// A declared relationship between two columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Stable metadata identity, unique across the catalog.
    pub id: String,
    pub kind: RelationKind,
    /// Id of the parent-side column.
    pub parent_column: String,
    /// Id of the child-side column.
    pub child_column: String,
    /// Junction linkage; only meaningful when `kind` is many-to-many.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub junction: Option<JunctionLink>,
}

impl Relationship {
    pub fn new(id: &str, kind: RelationKind, parent_column: &str, child_column: &str) -> Self {
        Self {
            id: id.into(),
            kind,
            parent_column: parent_column.into(),
            child_column: child_column.into(),
            junction: None,
        }
    }

    pub fn with_junction(mut self, junction: JunctionLink) -> Self {
        self.junction = Some(junction);
        self
    }
}
