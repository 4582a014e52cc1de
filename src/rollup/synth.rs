//! Rollup query synthesis.
//!
//! The synthesizer turns a [`RollupSpec`] into a [`Fragment`] by dispatching
//! on the resolved relationship topology. Direct topologies aggregate over
//! the child table; many-to-many aggregates over the far-end parent table
//! reached through the junction. The two shapes must not be unified: they
//! reflect which side of each relationship the rollup target column lives
//! on.

use tracing::debug;
use uuid::Uuid;

use crate::rollup::error::{RollupError, RollupResult};
use crate::rollup::fragment::Fragment;
use crate::rollup::topology::{DirectLink, JunctionTopology, RelationTopology};
use crate::schema::{ColumnDef, RollupSpec, SchemaCatalog, TableDef, TablePathResolver};
use crate::sql::{func, path_col, table_col, ExprExt, Join, JoinType, TablePath, TableRef};

/// The fixed alias given to the derived aggregation source.
///
/// Every call uses this alias unless overridden, so composing two fragments
/// into one outer statement is only valid when the caller renames at least
/// one of them (see [`SynthOptions::with_unique_source_alias`]).
pub const ROLLUP_SOURCE_ALIAS: &str = "rollup_src";

/// Generate a collision-free derived-source alias.
pub fn unique_source_alias() -> String {
    let tag = Uuid::new_v4().simple().to_string();
    format!("{}_{}", ROLLUP_SOURCE_ALIAS, &tag[..8])
}

/// Per-call synthesis options.
#[derive(Debug, Clone, Default)]
#[must_use = "options have no effect until passed to synthesize_with"]
pub struct SynthOptions {
    /// Overrides the qualifier used for the outer row the subquery
    /// correlates against. Defaults to the outer table's qualified path.
    pub correlation_alias: Option<String>,
    /// Overrides the derived-source alias. Defaults to
    /// [`ROLLUP_SOURCE_ALIAS`].
    pub source_alias: Option<String>,
}

impl SynthOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Correlate against `alias` instead of the outer table's own path.
    pub fn correlated_to(mut self, alias: &str) -> Self {
        self.correlation_alias = Some(alias.into());
        self
    }

    /// Use `alias` for the derived aggregation source.
    pub fn with_source_alias(mut self, alias: &str) -> Self {
        self.source_alias = Some(alias.into());
        self
    }

    /// Use a generated, collision-free alias for the derived source.
    pub fn with_unique_source_alias(self) -> Self {
        let alias = unique_source_alias();
        self.with_source_alias(&alias)
    }
}

/// Synthesizes correlated aggregate subquery fragments from rollup metadata.
///
/// Stateless per call: the synthesizer borrows an immutable catalog and path
/// resolver, so independent calls may run fully in parallel.
pub struct RollupSynthesizer<'a> {
    catalog: &'a SchemaCatalog,
    paths: &'a dyn TablePathResolver,
}

impl<'a> RollupSynthesizer<'a> {
    /// Create a synthesizer whose table paths come from the catalog itself.
    pub fn new(catalog: &'a SchemaCatalog) -> Self {
        Self {
            catalog,
            paths: catalog,
        }
    }

    /// Create a synthesizer with a custom table path resolver.
    pub fn with_path_resolver(
        catalog: &'a SchemaCatalog,
        paths: &'a dyn TablePathResolver,
    ) -> Self {
        Self { catalog, paths }
    }

    /// Synthesize a fragment with default options.
    pub fn synthesize(&self, spec: &RollupSpec) -> RollupResult<Fragment> {
        self.synthesize_with(spec, SynthOptions::default())
    }

    /// Synthesize a fragment for `spec`.
    ///
    /// Fails with [`RollupError::EmptyAggregateFunction`] before any
    /// metadata lookup when the spec names no aggregate; the identifier is
    /// otherwise passed through verbatim into the emitted expression.
    pub fn synthesize_with(
        &self,
        spec: &RollupSpec,
        options: SynthOptions,
    ) -> RollupResult<Fragment> {
        if spec.function.trim().is_empty() {
            return Err(RollupError::EmptyAggregateFunction {
                relationship: spec.relationship.clone(),
            });
        }

        let relationship = self
            .catalog
            .relationship(&spec.relationship)
            .ok_or_else(|| RollupError::UnknownRelationship(spec.relationship.clone()))?;
        let topology = RelationTopology::resolve(self.catalog, relationship)?;
        let rollup_column = self
            .catalog
            .column(&spec.rollup_column)
            .ok_or_else(|| RollupError::UnknownColumn(spec.rollup_column.clone()))?;

        let source_alias = options
            .source_alias
            .as_deref()
            .unwrap_or(ROLLUP_SOURCE_ALIAS);
        let correlation_alias = options.correlation_alias.as_deref();

        debug!(
            relationship = %relationship.id,
            kind = %relationship.kind,
            function = %spec.function,
            "synthesizing rollup fragment"
        );

        let fragment = match topology {
            RelationTopology::OneToMany(link) | RelationTopology::OneToOne(link) => {
                // The aggregate runs over every child row matching the
                // correlation predicate. One-to-one declares at most one
                // such row; that cardinality is not enforced here.
                self.direct_fragment(spec, &link, rollup_column, source_alias, correlation_alias)
            }
            RelationTopology::ManyToMany { link, junction } => self.junction_fragment(
                spec,
                &link,
                &junction,
                rollup_column,
                source_alias,
                correlation_alias,
            ),
        };

        Ok(fragment)
    }

    /// `SELECT f(a.rollup) FROM child AS a WHERE outer.parent_col = a.child_col`
    fn direct_fragment(
        &self,
        spec: &RollupSpec,
        link: &DirectLink<'_>,
        rollup_column: &ColumnDef,
        alias: &str,
        correlation_alias: Option<&str>,
    ) -> Fragment {
        let source = TableRef::from_path(self.paths.table_path(link.child_table)).with_alias(alias);
        let aggregate = func(&spec.function, vec![table_col(alias, &rollup_column.name)]);

        let outer = self.outer_path(correlation_alias, link.parent_table);
        let correlation = path_col(outer, &link.parent_column.name)
            .eq(table_col(alias, &link.child_column.name));

        Fragment::new(aggregate, source, vec![], correlation)
    }

    /// `SELECT f(a.rollup) FROM parent AS a INNER JOIN junction
    ///  ON junction.parent_key = a.parent_col
    ///  WHERE junction.child_key = outer.child_col`
    ///
    /// The aggregation source is the relationship's far-end parent table:
    /// the rollup target lives one hop past the junction.
    fn junction_fragment(
        &self,
        spec: &RollupSpec,
        link: &DirectLink<'_>,
        junction: &JunctionTopology<'_>,
        rollup_column: &ColumnDef,
        alias: &str,
        correlation_alias: Option<&str>,
    ) -> Fragment {
        let source =
            TableRef::from_path(self.paths.table_path(link.parent_table)).with_alias(alias);
        let aggregate = func(&spec.function, vec![table_col(alias, &rollup_column.name)]);

        let junction_path = self.paths.table_path(junction.table);
        let join_on = path_col(junction_path.clone(), &junction.parent_key.name)
            .eq(table_col(alias, &link.parent_column.name));
        let join = Join {
            join_type: JoinType::Inner,
            table: TableRef::from_path(junction_path.clone()),
            on: Some(join_on),
        };

        let outer = self.outer_path(correlation_alias, link.child_table);
        let correlation = path_col(junction_path, &junction.child_key.name)
            .eq(path_col(outer, &link.child_column.name));

        Fragment::new(aggregate, source, vec![join], correlation)
    }

    fn outer_path(&self, correlation_alias: Option<&str>, default_table: &TableDef) -> TablePath {
        match correlation_alias {
            Some(alias) => TablePath::new(alias),
            None => self.paths.table_path(default_table),
        }
    }
}
