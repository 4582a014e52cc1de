//! SQL generation module.
//!
//! This module provides a type-safe SQL builder that generates multi-dialect
//! SQL. It includes:
//!
//! - [`query`] - SELECT query builder and the qualified [`TablePath`] primitive
//! - [`expr`] - Expression AST and builder DSL
//! - [`token`] - Token types for SQL generation
//! - [`dialect`] - SQL dialect implementations
//!
//! [`TablePath`]: query::TablePath

pub mod dialect;
pub mod expr;
pub mod query;
pub mod token;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types at the sql module level
pub use dialect::{Dialect, SqlDialect};
pub use expr::{
    avg, col, count, count_distinct, count_star, func, lit_bool, lit_float, lit_int, lit_null,
    lit_str, max, min, path_col, star, sum, table_col, BinaryOperator, Expr, ExprExt, Literal,
    UnaryOperator,
};
pub use query::{
    Join, JoinType, LimitOffset, NullsOrder, OrderByExpr, Query, SelectExpr, SortDir, TablePath,
    TableRef,
};
pub use token::{Token, TokenStream};
