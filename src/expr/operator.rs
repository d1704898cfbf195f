use crate::expr::error::EngineError;
use crate::types::column_value::ColumnValue;
use std::cmp::Ordering;
use std::fmt;

/// `LogicalOperator` defines the comparison operators supported in a predicate.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LogicalOperator {
    /// Equal to `=`.
    Eq,
    /// Not equal to `!=`.
    NotEq,
    /// Greater than `>`.
    Greater,
    /// Greater than or equal to `>=`.
    GreaterEq,
    /// Less than `<`.
    Lesser,
    /// Less than or equal to `<=`.
    LesserEq,
}

impl LogicalOperator {
    /// Applies the operator to two values.
    ///
    /// # Returns
    ///
    /// * `Ok(ColumnValue::Boolean(_))` - The outcome of the comparison.
    /// * `Ok(ColumnValue::Null)` - If either side is null.
    /// * `Err(EngineError::TypeMismatchInComparison)` - If the values cannot be compared.
    ///   `Int` and `Float` compare numerically.
    pub fn apply(&self, lhs: &ColumnValue, rhs: &ColumnValue) -> Result<ColumnValue, EngineError> {
        let (Some(left_type), Some(right_type)) = (lhs.column_type(), rhs.column_type()) else {
            return Ok(ColumnValue::Null);
        };
        let ordering = match (lhs, rhs) {
            (ColumnValue::Int(left), ColumnValue::Int(right)) => left.cmp(right),
            (ColumnValue::Text(left), ColumnValue::Text(right)) => left.cmp(right),
            (ColumnValue::Boolean(left), ColumnValue::Boolean(right)) => left.cmp(right),
            (left, right) => match (left.numeric_value(), right.numeric_value()) {
                (Some(left), Some(right)) => match left.partial_cmp(&right) {
                    Some(ordering) => ordering,
                    None => return Ok(ColumnValue::Null),
                },
                _ => {
                    return Err(EngineError::TypeMismatchInComparison {
                        left: left_type,
                        right: right_type,
                    })
                }
            },
        };
        Ok(ColumnValue::Boolean(self.holds_for(ordering)))
    }

    fn holds_for(&self, ordering: Ordering) -> bool {
        match self {
            LogicalOperator::Eq => ordering == Ordering::Equal,
            LogicalOperator::NotEq => ordering != Ordering::Equal,
            LogicalOperator::Greater => ordering == Ordering::Greater,
            LogicalOperator::GreaterEq => ordering != Ordering::Less,
            LogicalOperator::Lesser => ordering == Ordering::Less,
            LogicalOperator::LesserEq => ordering != Ordering::Greater,
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            LogicalOperator::Eq => "=",
            LogicalOperator::NotEq => "!=",
            LogicalOperator::Greater => ">",
            LogicalOperator::GreaterEq => ">=",
            LogicalOperator::Lesser => "<",
            LogicalOperator::LesserEq => "<=",
        };
        f.write_str(symbol)
    }
}
