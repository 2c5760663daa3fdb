//! # Caissa
//!
//! Analytical SQL report builder for a historical chess-game dataset.
//!
//! ## Architecture
//!
//! Scalar parameters flow one way into finished SQL text:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        QueryDefaults (explicit report parameters)        │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [fragment builders]
//! ┌─────────────────────────────────────────────────────────┐
//! │     Query values (win rates, game volumes, Elo gaps)     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [report composers]
//! ┌─────────────────────────────────────────────────────────┐
//! │        Multi-CTE report query, serialized to SQL         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The crate only composes queries; executing them against the engine that
//! hosts the `GAMES2` table is the caller's concern.

pub mod config;
pub mod report;
pub mod schema;
pub mod sql;

// Re-export SQL submodules at crate level
pub use sql::expr;
pub use sql::query;
pub use sql::token;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::{ConfigError, QueryDefaults};
    pub use crate::expr::{
        // Constructors
        abs_val,
        avg,
        case_when,
        col,
        count,
        count_star,
        extract_month,
        extract_year,
        func,
        lit_float,
        lit_int,
        lit_null,
        lit_str,
        neg,
        paren,
        power,
        round,
        star,
        sum,
        table_col,
        table_star,
        to_date,
        // Types
        BinaryOperator,
        DateField,
        Expr,
        ExprExt,
        Literal,
        UnaryOperator,
    };
    pub use crate::query::{Cte, Join, JoinType, OrderByExpr, Query, SelectExpr, SortDir, TableRef};
    pub use crate::report::{opening_risk_by_month, rating_gap_accuracy_by_year};
    pub use crate::token::{Token, TokenStream};
}

// Also export at crate root for convenience
pub use config::QueryDefaults;
pub use expr::{col, count_star, lit_int, lit_str, sum, table_col, Expr, ExprExt};
pub use query::{OrderByExpr, Query, SelectExpr, TableRef};
pub use report::{opening_risk_by_month, rating_gap_accuracy_by_year};
pub use token::{Token, TokenStream};
