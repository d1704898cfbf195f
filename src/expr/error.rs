use crate::expr::aggregate::AggregateFunction;
use crate::storage::RowId;
use crate::table::error::TableError;
use crate::types::column_type::ColumnType;
use regex::Error;

/// Errors raised by an expression engine while evaluating one group.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// A column reference could not be resolved.
    #[error("unknown column `{0}`")]
    UnknownColumn(String),
    /// A group variable is not a grouping key of the current group.
    #[error("unknown group variable `{0}`")]
    UnknownGroupVariable(String),
    /// Two values of incompatible types were compared.
    #[error("cannot compare {left} with {right}")]
    TypeMismatchInComparison { left: ColumnType, right: ColumnType },
    /// A logical operator received a value that is neither boolean nor null.
    #[error("expected a boolean operand, got {0}")]
    NonBooleanOperand(ColumnType),
    /// An aggregate received values it cannot aggregate.
    #[error("`{function}` cannot aggregate {found} values")]
    InvalidAggregateInput {
        function: AggregateFunction,
        found: ColumnType,
    },
    /// An integer aggregate overflowed.
    #[error("integer overflow in `{0}`")]
    Overflow(AggregateFunction),
    /// Two vector operands have different lengths.
    #[error("operands have different lengths: {left} and {right}")]
    LengthMismatch { left: usize, right: usize },
    /// A LIKE pattern is not a valid regular expression.
    #[error("invalid LIKE pattern: {0}")]
    InvalidPattern(String),
    /// A group refers to a row the table does not have.
    #[error("row {row} is out of range for a table of {row_count} rows")]
    RowOutOfRange { row: RowId, row_count: usize },
    /// Failure reported by an expression engine other than the built-in one.
    #[error("{0}")]
    Custom(String),
}

impl From<Error> for EngineError {
    fn from(error: Error) -> Self {
        EngineError::InvalidPattern(error.to_string())
    }
}

impl From<TableError> for EngineError {
    fn from(error: TableError) -> Self {
        match error {
            TableError::RowOutOfRange { row, row_count } => {
                EngineError::RowOutOfRange { row, row_count }
            }
            TableError::UnknownColumn(name) => EngineError::UnknownColumn(name),
            other => EngineError::Custom(other.to_string()),
        }
    }
}
