//! DuckDB SQL dialect.
//!
//! DuckDB is PostgreSQL-compatible for the surface this crate emits:
//! - ANSI identifier quoting (`"`)
//! - Native boolean literals
//! - LIMIT ... OFFSET ... pagination

use super::helpers;
use super::SqlDialect;

/// DuckDB SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct DuckDb;

impl SqlDialect for DuckDb {
    fn name(&self) -> &'static str {
        "duckdb"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_literal(b)
    }

    // Uses default emit_limit_offset (LIMIT ... OFFSET ...)
}
