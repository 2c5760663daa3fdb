//! SQL generation module.
//!
//! This module provides a type-safe SQL builder for the analytical reports.
//! It includes:
//!
//! - [`query`] - SELECT query builder (CTEs, joins, FETCH FIRST pagination)
//! - [`expr`] - Expression AST and builder DSL
//! - [`token`] - Token types for SQL generation
//!
//! The output targets one dialect: `EXTRACT(... FROM ...)`,
//! `TO_DATE(text, format)` and `FETCH FIRST n ROWS ONLY` are emitted with
//! exactly that syntax, and identifiers are rendered bare to match the
//! uppercase schema the external engine expects.

pub mod expr;
pub mod query;
pub mod token;

// Re-export commonly used types at the sql module level
pub use expr::{
    abs_val, avg, case_when, col, count, count_star, extract_month, extract_year, func, lit_float,
    lit_int, lit_null, lit_str, neg, paren, power, round, star, sum, table_col, table_star,
    to_date, BinaryOperator, DateField, Expr, ExprExt, Literal, UnaryOperator,
};
pub use query::{Cte, Join, JoinType, OrderByExpr, Query, SelectExpr, SortDir, TableRef};
pub use token::{quote_string, Token, TokenStream};
