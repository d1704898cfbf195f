use crate::expr::error::EngineError;
use crate::types::column_type::ColumnType;
use crate::types::column_value::ColumnValue;
use std::fmt;

/// Aggregate helpers available inside predicates.
///
/// Inside a grouped filter an aggregate sees only the rows of the group being
/// evaluated, so `v > mean(v)` compares each row with its own group's mean.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AggregateFunction {
    /// Number of rows, `n()`.
    Count,
    Sum,
    Mean,
    Min,
    Max,
}

impl AggregateFunction {
    /// Reduces `values` to a single value. Nulls are ignored.
    ///
    /// `sum` of no values is `0`; `mean`, `min` and `max` of no values are null.
    pub(crate) fn apply(&self, values: &[ColumnValue]) -> Result<ColumnValue, EngineError> {
        let present = values.iter().filter(|value| !value.is_null());
        match self {
            AggregateFunction::Count => Ok(ColumnValue::Int(values.len() as i64)),
            AggregateFunction::Sum => self.sum(present),
            AggregateFunction::Mean => {
                let numbers = self.numbers(present)?;
                if numbers.is_empty() {
                    return Ok(ColumnValue::Null);
                }
                Ok(ColumnValue::float(
                    numbers.iter().sum::<f64>() / numbers.len() as f64,
                ))
            }
            AggregateFunction::Min => Ok(present.min().cloned().unwrap_or(ColumnValue::Null)),
            AggregateFunction::Max => Ok(present.max().cloned().unwrap_or(ColumnValue::Null)),
        }
    }

    fn sum<'a>(
        &self,
        values: impl Iterator<Item = &'a ColumnValue>,
    ) -> Result<ColumnValue, EngineError> {
        let mut integer_total: i64 = 0;
        let mut float_total: Option<f64> = None;

        for value in values {
            match value {
                ColumnValue::Int(number) => {
                    integer_total = integer_total
                        .checked_add(*number)
                        .ok_or(EngineError::Overflow(*self))?;
                }
                ColumnValue::Float(number) => {
                    *float_total.get_or_insert(0.0) += number.into_inner();
                }
                ColumnValue::Text(_) => return Err(self.invalid_input(ColumnType::Text)),
                ColumnValue::Boolean(_) => return Err(self.invalid_input(ColumnType::Boolean)),
                ColumnValue::Null => {}
            }
        }
        Ok(match float_total {
            Some(total) => ColumnValue::float(total + integer_total as f64),
            None => ColumnValue::Int(integer_total),
        })
    }

    fn numbers<'a>(
        &self,
        values: impl Iterator<Item = &'a ColumnValue>,
    ) -> Result<Vec<f64>, EngineError> {
        values
            .filter_map(|value| match value {
                ColumnValue::Int(number) => Some(Ok(*number as f64)),
                ColumnValue::Float(number) => Some(Ok(number.into_inner())),
                ColumnValue::Text(_) => Some(Err(self.invalid_input(ColumnType::Text))),
                ColumnValue::Boolean(_) => Some(Err(self.invalid_input(ColumnType::Boolean))),
                ColumnValue::Null => None,
            })
            .collect()
    }

    fn invalid_input(&self, found: ColumnType) -> EngineError {
        EngineError::InvalidAggregateInput {
            function: *self,
            found,
        }
    }
}

impl fmt::Display for AggregateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AggregateFunction::Count => "n",
            AggregateFunction::Sum => "sum",
            AggregateFunction::Mean => "mean",
            AggregateFunction::Min => "min",
            AggregateFunction::Max => "max",
        };
        f.write_str(name)
    }
}
