use crate::expr::context::EvaluationContext;
use crate::filter::error::{EvaluationError, FilterError};
use crate::filter::request::Predicate;
use crate::storage::RowId;
use crate::table::grouping::Grouping;
use crate::table::Table;
use crate::types::column_type::ColumnType;
use crate::types::column_value::ColumnValue;
use log::trace;

/// Boolean-or-missing outcome of every predicate for every row of every group,
/// indexed as `[predicate][group][position in group]`.
#[derive(Debug, PartialEq)]
pub(crate) struct PredicateResults {
    per_predicate: Vec<Vec<Vec<Option<bool>>>>,
}

impl PredicateResults {
    pub(crate) fn predicate_count(&self) -> usize {
        self.per_predicate.len()
    }

    /// Outcome of `predicate` for the row at `position` of `group`.
    pub(crate) fn outcome(&self, predicate: usize, group: usize, position: usize) -> Option<bool> {
        self.per_predicate
            .get(predicate)
            .and_then(|groups| groups.get(group))
            .and_then(|outcomes| outcomes.get(position))
            .copied()
            .flatten()
    }
}

#[cfg(test)]
impl PredicateResults {
    pub(crate) fn from_outcomes(per_predicate: Vec<Vec<Vec<Option<bool>>>>) -> Self {
        Self { per_predicate }
    }
}

/// Evaluates predicates once per group, each time in a context scoped to
/// that group's rows and key.
pub(crate) struct MaskedEvaluator<'a> {
    table: &'a Table,
    grouping: Option<&'a Grouping>,
}

impl<'a> MaskedEvaluator<'a> {
    pub(crate) fn new(table: &'a Table, grouping: Option<&'a Grouping>) -> Self {
        Self { table, grouping }
    }

    /// Evaluates every predicate, in declaration order, against every group.
    ///
    /// # Errors
    ///
    /// * `FilterError::NamedPredicate` if a named predicate is not a logical
    ///   constant. Checked for all predicates before any evaluation.
    /// * `FilterError::Evaluation` for the first (predicate, group) pair that fails.
    pub(crate) fn evaluate(
        &self,
        predicates: &[Predicate],
        groups: &[Vec<RowId>],
    ) -> Result<PredicateResults, FilterError> {
        ensure_no_named_conditions(predicates)?;

        let per_predicate = predicates
            .iter()
            .enumerate()
            .map(|(predicate_index, predicate)| {
                groups
                    .iter()
                    .enumerate()
                    .map(|(group_index, rows)| {
                        trace!(
                            "evaluating predicate #{predicate_index} for group {group_index} ({} rows)",
                            rows.len()
                        );
                        self.evaluate_in_group(predicate, group_index, rows)
                            .map_err(|cause| FilterError::Evaluation {
                                predicate: predicate_index,
                                group: group_index,
                                cause,
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PredicateResults { per_predicate })
    }

    fn evaluate_in_group(
        &self,
        predicate: &Predicate,
        group_index: usize,
        rows: &[RowId],
    ) -> Result<Vec<Option<bool>>, EvaluationError> {
        let context = self.context(group_index, rows);
        let values = predicate.expression().evaluate(&context)?;
        to_outcomes(values, rows.len())
    }

    fn context<'r>(&self, group_index: usize, rows: &'r [RowId]) -> EvaluationContext<'r>
    where
        'a: 'r,
    {
        let context = EvaluationContext::new(self.table, rows, group_index);
        match self.grouping {
            Some(grouping) => {
                // A grouping without groups has only the empty group, which has no key.
                let key = grouping
                    .groups()
                    .get(group_index)
                    .map_or(&[][..], |group| group.key());
                context.with_group_key(grouping.key_columns(), key)
            }
            None => context,
        }
    }
}

fn ensure_no_named_conditions(predicates: &[Predicate]) -> Result<(), FilterError> {
    for (position, predicate) in predicates.iter().enumerate() {
        if let Some(name) = predicate.name() {
            if !predicate.expression().is_logical_constant() {
                return Err(FilterError::NamedPredicate {
                    name: name.to_string(),
                    position,
                });
            }
        }
    }
    Ok(())
}

/// Converts the values of one evaluation into outcomes for `group_size` rows.
///
/// A single value applies to every row of the group.
fn to_outcomes(
    values: Vec<ColumnValue>,
    group_size: usize,
) -> Result<Vec<Option<bool>>, EvaluationError> {
    let outcomes = values
        .iter()
        .map(|value| match value {
            ColumnValue::Boolean(value) => Ok(Some(*value)),
            ColumnValue::Null => Ok(None),
            other => Err(EvaluationError::NotLogical {
                found: other.column_type().unwrap_or(ColumnType::Boolean),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if outcomes.len() == group_size {
        return Ok(outcomes);
    }
    if let [single] = outcomes[..] {
        return Ok(vec![single; group_size]);
    }
    Err(EvaluationError::SizeMismatch {
        expected: group_size,
        actual: outcomes.len(),
    })
}
