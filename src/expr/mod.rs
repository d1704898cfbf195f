//! The expression-engine seam of grouped filtering.
//!
//! A filter never looks inside a predicate: it hands each predicate an
//! [`EvaluationContext`] scoped to one group and receives one value per row
//! of that group. [`Expr`] is the built-in implementation; any other engine
//! plugs in by implementing [`Expression`].

pub mod aggregate;
mod builtin;
pub mod context;
pub mod error;
pub mod operator;

pub use builtin::Expr;
pub use context::EvaluationContext;

use crate::expr::error::EngineError;
use crate::types::column_value::ColumnValue;
use std::fmt;

/// A predicate expression evaluated against one group at a time.
pub trait Expression: fmt::Debug + Send + Sync {
    /// Evaluates the expression for every row of `context`.
    ///
    /// The result holds one value per row of the context, in row order, or a
    /// single value that applies to every row.
    fn evaluate(&self, context: &EvaluationContext<'_>) -> Result<Vec<ColumnValue>, EngineError>;

    /// Returns `true` if the expression is a logical constant (`true`, `false`
    /// or null) rather than a computed condition.
    fn is_logical_constant(&self) -> bool {
        false
    }
}
