//! Relation topology resolution.
//!
//! A declared [`Relationship`] stores column and table ids; synthesis needs
//! the concrete tables and columns on both sides, plus the junction objects
//! for many-to-many. Resolution is a pure projection over the catalog - no
//! mutation, no retries - and every lookup failure is fatal to the current
//! call.

use crate::rollup::error::{RollupError, RollupResult};
use crate::schema::{ColumnDef, JunctionLink, RelationKind, Relationship, SchemaCatalog, TableDef};

/// The direct parent/child legs of a relationship, fully resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectLink<'a> {
    pub parent_table: &'a TableDef,
    pub parent_column: &'a ColumnDef,
    pub child_table: &'a TableDef,
    pub child_column: &'a ColumnDef,
}

/// A resolved junction table with its two foreign keys.
///
/// The keys stay under the names they were declared with; nothing downstream
/// may pick them by position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JunctionTopology<'a> {
    pub table: &'a TableDef,
    /// Junction column referencing the parent column's domain.
    pub parent_key: &'a ColumnDef,
    /// Junction column referencing the child column's domain.
    pub child_key: &'a ColumnDef,
}

/// A relationship normalized to its concrete shape.
///
/// The enum is closed: adding a relationship kind forces every consumer
/// match to be revisited at compile time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RelationTopology<'a> {
    OneToMany(DirectLink<'a>),
    OneToOne(DirectLink<'a>),
    ManyToMany {
        link: DirectLink<'a>,
        junction: JunctionTopology<'a>,
    },
}

impl<'a> RelationTopology<'a> {
    /// Resolve a relationship against the catalog.
    ///
    /// Many-to-many junction existence is checked before any dependent
    /// lookup, so an inconsistent relationship fails fast with
    /// [`RollupError::JunctionNotResolved`] instead of a misleading
    /// missing-column error.
    pub fn resolve(
        catalog: &'a SchemaCatalog,
        relationship: &'a Relationship,
    ) -> RollupResult<Self> {
        match relationship.kind {
            RelationKind::OneToMany => {
                let link = resolve_direct(catalog, relationship)?;
                Ok(RelationTopology::OneToMany(link))
            }
            RelationKind::OneToOne => {
                let link = resolve_direct(catalog, relationship)?;
                Ok(RelationTopology::OneToOne(link))
            }
            RelationKind::ManyToMany => {
                let junction_link = relationship.junction.as_ref().ok_or_else(|| {
                    RollupError::JunctionNotResolved {
                        relationship: relationship.id.clone(),
                    }
                })?;
                let link = resolve_direct(catalog, relationship)?;
                let junction = resolve_junction(catalog, relationship, junction_link)?;
                Ok(RelationTopology::ManyToMany { link, junction })
            }
            RelationKind::ManyToOne => Err(RollupError::UnsupportedRelationshipKind {
                relationship: relationship.id.clone(),
                kind: relationship.kind,
            }),
        }
    }

    /// The direct parent/child legs, regardless of variant.
    pub fn link(&self) -> &DirectLink<'a> {
        match self {
            RelationTopology::OneToMany(link) | RelationTopology::OneToOne(link) => link,
            RelationTopology::ManyToMany { link, .. } => link,
        }
    }
}

fn resolve_direct<'a>(
    catalog: &'a SchemaCatalog,
    relationship: &Relationship,
) -> RollupResult<DirectLink<'a>> {
    let parent_column = lookup_column(catalog, &relationship.parent_column)?;
    let parent_table = lookup_owner(catalog, parent_column)?;
    let child_column = lookup_column(catalog, &relationship.child_column)?;
    let child_table = lookup_owner(catalog, child_column)?;

    Ok(DirectLink {
        parent_table,
        parent_column,
        child_table,
        child_column,
    })
}

fn resolve_junction<'a>(
    catalog: &'a SchemaCatalog,
    relationship: &Relationship,
    link: &JunctionLink,
) -> RollupResult<JunctionTopology<'a>> {
    let table = catalog
        .table(&link.table)
        .ok_or_else(|| RollupError::UnknownTable(link.table.clone()))?;
    let parent_key = lookup_column(catalog, &link.parent_key)?;
    let child_key = lookup_column(catalog, &link.child_key)?;

    // A junction whose keys collapse onto one column, or whose keys live on
    // some other table, cannot produce a correct query; both are metadata
    // inconsistencies of the junction linkage itself.
    if parent_key.id == child_key.id || parent_key.table != table.id || child_key.table != table.id
    {
        return Err(RollupError::JunctionNotResolved {
            relationship: relationship.id.clone(),
        });
    }

    Ok(JunctionTopology {
        table,
        parent_key,
        child_key,
    })
}

fn lookup_column<'a>(catalog: &'a SchemaCatalog, id: &str) -> RollupResult<&'a ColumnDef> {
    catalog
        .column(id)
        .ok_or_else(|| RollupError::UnknownColumn(id.to_string()))
}

fn lookup_owner<'a>(
    catalog: &'a SchemaCatalog,
    column: &ColumnDef,
) -> RollupResult<&'a TableDef> {
    catalog
        .column_table(column)
        .ok_or_else(|| RollupError::UnknownTable(column.table.clone()))
}
