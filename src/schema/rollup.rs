//! Rollup specification metadata.

use serde::{Deserialize, Serialize};

/// A rollup: an aggregate function applied to a column reached across a
/// relationship.
///
/// Constructed by the caller from persisted metadata; read-only to the
/// synthesizer. The aggregate `function` is an opaque identifier passed
/// through verbatim - it is checked for non-emptiness, never allow-listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupSpec {
    /// Id of the relationship the rollup traverses.
    pub relationship: String,
    /// Id of the target column the aggregate applies to.
    pub rollup_column: String,
    /// Aggregate function identifier (e.g. `sum`, `count`, `max`).
    pub function: String,
}

impl RollupSpec {
    pub fn new(relationship: &str, rollup_column: &str, function: &str) -> Self {
        Self {
            relationship: relationship.into(),
            rollup_column: rollup_column.into(),
            function: function.into(),
        }
    }
}
