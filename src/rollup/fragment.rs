//! The composable rollup fragment.

use crate::sql::{Dialect, Expr, Join, Query, SelectExpr, TableRef};

/// A synthesized, not-yet-materialized rollup subquery.
///
/// A fragment is `SELECT agg(col) FROM <source-or-join> WHERE <correlation>`
/// held as builder values, so the caller can splice it into an outer
/// statement - as a SELECT-list scalar, a WHERE comparison operand, or an
/// ORDER BY key - or render it directly.
///
/// Fragments are freshly allocated per synthesis call and owned by the
/// caller; the synthesizer never pools or reuses them.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "a fragment has no effect until embedded or rendered"]
pub struct Fragment {
    aggregate: Expr,
    source: TableRef,
    joins: Vec<Join>,
    correlation: Expr,
}

impl Fragment {
    pub(crate) fn new(
        aggregate: Expr,
        source: TableRef,
        joins: Vec<Join>,
        correlation: Expr,
    ) -> Self {
        Self {
            aggregate,
            source,
            joins,
            correlation,
        }
    }

    /// The aggregate expression, e.g. `SUM(rollup_src.price)`.
    pub fn aggregate(&self) -> &Expr {
        &self.aggregate
    }

    /// The aliased derived source the aggregate runs over.
    pub fn source(&self) -> &TableRef {
        &self.source
    }

    /// Junction joins; empty for direct topologies.
    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    /// The predicate correlating the subquery with the enclosing row.
    pub fn correlation(&self) -> &Expr {
        &self.correlation
    }

    /// Assemble the fragment into a standalone [`Query`].
    pub fn to_query(&self) -> Query {
        let mut query = Query::new()
            .select(vec![SelectExpr::new(self.aggregate.clone())])
            .from(self.source.clone());
        for join in &self.joins {
            query.joins.push(join.clone());
        }
        query.filter(self.correlation.clone())
    }

    /// Wrap the fragment as a parenthesized subquery expression for
    /// embedding into an outer statement.
    pub fn into_expr(self) -> Expr {
        Expr::Subquery(Box::new(self.to_query()))
    }

    /// Render the fragment as SQL for a dialect.
    pub fn to_sql(&self, dialect: Dialect) -> String {
        self.to_query().to_sql(dialect)
    }
}

impl From<Fragment> for Expr {
    fn from(fragment: Fragment) -> Self {
        fragment.into_expr()
    }
}

impl std::fmt::Display for Fragment {
    /// Formats the fragment using the default dialect (Postgres).
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_sql(Dialect::default()))
    }
}
