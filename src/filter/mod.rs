//! Row filtering of plain and grouped tables.
//!
//! A filter runs in four steps:
//!
//! 1. the rows are split into the groups of the table (a plain table is one group),
//! 2. every predicate is evaluated once per group, so aggregates see only the
//!    rows of that group,
//! 3. the per-row outcomes are ANDed into a keep-mask, a missing outcome
//!    excluding the row,
//! 4. the surviving rows are compacted and the row list of every group is
//!    remapped to the compacted positions.
//!
//! # Examples
//!
//! ```
//! use groupfilter::expr::Expr;
//! use groupfilter::filter::request::FilterRequest;
//! use groupfilter::schema::Schema;
//! use groupfilter::table::Table;
//! use groupfilter::types::column_type::ColumnType;
//! use groupfilter::rows;
//!
//! let schema = Schema::new()
//!     .add_column("g", ColumnType::Int)
//!     .and_then(|schema| schema.add_column("v", ColumnType::Int))
//!     .unwrap();
//! let table = Table::new(schema, rows![[1, 5], [1, 15], [2, 5], [2, 15]]).unwrap();
//!
//! let grouped = table.group_by(&["g"], true).unwrap();
//! let request = FilterRequest::new().predicate(Expr::column("v").greater_than(10));
//! let filtered = grouped.filter(&request).unwrap();
//!
//! assert_eq!(2, filtered.table().row_count());
//! assert_eq!(2, filtered.grouping().group_count());
//! ```

pub mod error;
mod evaluator;
mod partition;
mod regroup;
pub mod request;
mod selector;

use crate::filter::error::FilterError;
use crate::filter::evaluator::MaskedEvaluator;
use crate::filter::request::FilterRequest;
use crate::storage::RowId;
use crate::table::grouping::Grouping;
use crate::table::Table;
use log::{debug, error};

/// Something that can be filtered: a plain table or a grouped one.
pub trait FilterTarget: Clone {
    /// The rows to filter.
    fn table(&self) -> &Table;

    /// The grouping of the rows, `None` for a plain table.
    fn grouping(&self) -> Option<&Grouping>;

    /// Builds the filtered value from the compacted `table` and the remapped
    /// row list of every group, in the group order of [`FilterTarget::grouping`].
    fn regrouped(&self, table: Table, rows: Vec<Vec<RowId>>, preserve: bool) -> Self;
}

/// Keeps the rows of `target` for which every predicate of `request` is true.
///
/// Without predicates `target` is returned unchanged, empty groups included.
///
/// # Errors
///
/// * `FilterError::NamedPredicate` if a named predicate is not a logical constant.
/// * `FilterError::Evaluation` if a predicate fails or yields a result that is
///   not logical or not of the group's size.
/// * `FilterError::Invariant` if the grouping does not partition the rows.
pub fn filter<T: FilterTarget>(target: &T, request: &FilterRequest) -> Result<T, FilterError> {
    if request.predicates().is_empty() {
        debug!("no predicates, returning the input unchanged");
        return Ok(target.clone());
    }

    let table = target.table();
    let grouping = target.grouping();
    let row_count = table.row_count();

    let groups = partition::partition(table, grouping);
    debug!(
        "filtering {row_count} rows in {} group(s) with {} predicate(s)",
        groups.len(),
        request.predicates().len()
    );

    let results = MaskedEvaluator::new(table, grouping).evaluate(request.predicates(), &groups)?;
    let selection = selector::select(&results, &groups, row_count);
    let rows = regroup::regroup(&groups, &selection, row_count).map_err(|violation| {
        error!("regrouping failed: {violation}");
        FilterError::Invariant(violation)
    })?;

    let kept = table.slice_rows(&selection.kept_rows());
    debug!(
        "kept {} of {row_count} rows in {} group(s)",
        selection.kept_total(),
        rows.len()
    );

    Ok(target.regrouped(kept, rows, request.preserves_grouping()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_column;
    use crate::expr::error::EngineError;
    use crate::expr::Expr;
    use crate::filter::error::EvaluationError;
    use crate::table::grouped::GroupedTable;
    use crate::table::grouping::Group;
    use crate::test_utils::{empty_table, scenario_table};
    use crate::types::column_value::ColumnValue;
    use crate::{rows, schema};
    use crate::types::column_type::ColumnType;
    use pretty_assertions::assert_eq;

    fn rows_of(grouped: &GroupedTable) -> Vec<Vec<RowId>> {
        grouped
            .grouping()
            .group_row_lists()
            .into_iter()
            .map(|rows| rows.to_vec())
            .collect()
    }

    fn keys_of(grouped: &GroupedTable) -> Vec<Vec<ColumnValue>> {
        grouped
            .grouping()
            .groups()
            .iter()
            .map(|group| group.key().to_vec())
            .collect()
    }

    #[test]
    fn filter_a_grouped_table() {
        let grouped = scenario_table().group_by(&["g"], true).unwrap();
        let request = FilterRequest::new().predicate(Expr::column("v").greater_than(10));

        let filtered = grouped.filter(&request).unwrap();

        assert_column!(filtered.table(), "v" => [15, 15]);
        assert_column!(filtered.table(), "g" => [1, 2]);
        assert_eq!(vec![vec![0], vec![1]], rows_of(&filtered));
        assert_eq!(
            vec![vec![ColumnValue::int(1)], vec![ColumnValue::int(2)]],
            keys_of(&filtered)
        );
    }

    #[test]
    fn filter_a_plain_table() {
        let request = FilterRequest::new().predicate(Expr::column("v").greater_than(10));

        let filtered = scenario_table().filter(&request).unwrap();

        assert_column!(filtered, "v" => [15, 15]);
        assert_column!(filtered, "g" => [1, 2]);
    }

    #[test]
    fn filter_keeps_the_attributes() {
        let table = scenario_table().with_attribute("source", "sensors");
        let request = FilterRequest::new().predicate(Expr::column("v").greater_than(10));

        let filtered = table.filter(&request).unwrap();

        assert_eq!(
            Some(&"sensors".to_string()),
            filtered.attributes().get("source")
        );
        assert_eq!(table.schema(), filtered.schema());
    }

    #[test]
    fn filter_excludes_rows_with_a_missing_outcome() {
        let schema = schema!["g" => ColumnType::Int, "v" => ColumnType::Int].unwrap();
        let table = Table::new(schema, rows![[1, 5], [1, ColumnValue::Null], [1, 20]]).unwrap();
        let request = FilterRequest::new().predicate(Expr::column("v").greater_than(1));

        let filtered = table.filter(&request).unwrap();

        assert_column!(filtered, "v" => [5, 20]);
    }

    #[test]
    fn filter_evaluates_aggregates_within_each_group() {
        let schema = schema!["g" => ColumnType::Int, "v" => ColumnType::Int].unwrap();
        let table = Table::new(schema, rows![[1, 1], [1, 3], [2, 10], [2, 30]]).unwrap();
        let request = FilterRequest::new()
            .predicate(Expr::column("v").greater_than(Expr::mean(Expr::column("v"))));

        let ungrouped = table.filter(&request).unwrap();
        let grouped = table.group_by(&["g"], true).unwrap().filter(&request).unwrap();

        assert_column!(ungrouped, "v" => [30]);
        assert_column!(grouped.table(), "v" => [3, 30]);
        assert_eq!(vec![vec![0], vec![1]], rows_of(&grouped));
    }

    #[test]
    fn filter_combines_predicates_with_and() {
        let request = FilterRequest::new()
            .predicate(Expr::column("v").greater_than(10))
            .predicate(Expr::column("g").equal_to(2));

        let filtered = scenario_table().filter(&request).unwrap();

        assert_column!(filtered, "g" => [2]);
        assert_column!(filtered, "v" => [15]);
    }

    #[test]
    fn filter_drops_emptied_groups_when_drop_is_set() {
        let grouped = scenario_table().group_by(&["g"], true).unwrap();
        let request = FilterRequest::new().predicate(Expr::column("g").equal_to(2));

        let filtered = grouped.filter(&request).unwrap();

        assert_eq!(vec![vec![0, 1]], rows_of(&filtered));
        assert_eq!(vec![vec![ColumnValue::int(2)]], keys_of(&filtered));
    }

    #[test]
    fn filter_keeps_emptied_groups_when_drop_is_not_set() {
        let grouped = scenario_table().group_by(&["g"], false).unwrap();
        let request = FilterRequest::new().predicate(Expr::column("g").equal_to(2));

        let filtered = grouped.filter(&request).unwrap();

        assert_eq!(vec![Vec::<RowId>::new(), vec![0, 1]], rows_of(&filtered));
    }

    #[test]
    fn filter_with_preserve_keeps_emptied_groups_in_current_order() {
        let table = scenario_table();
        let grouping = Grouping::new(
            vec!["g".to_string()],
            vec![
                Group::new(vec![ColumnValue::int(2)], vec![2, 3]),
                Group::new(vec![ColumnValue::int(1)], vec![0, 1]),
            ],
            true,
            table.row_count(),
        )
        .unwrap();
        let grouped = GroupedTable::new(table, grouping).unwrap();

        let request = FilterRequest::new()
            .predicate(Expr::column("g").equal_to(1))
            .preserve(true);
        let filtered = grouped.filter(&request).unwrap();

        assert_eq!(vec![Vec::<RowId>::new(), vec![0, 1]], rows_of(&filtered));
        assert_eq!(
            vec![vec![ColumnValue::int(2)], vec![ColumnValue::int(1)]],
            keys_of(&filtered)
        );
    }

    #[test]
    fn filter_without_predicates_returns_the_input_unchanged() {
        let table = scenario_table();
        let grouping = Grouping::new(
            vec!["g".to_string()],
            vec![
                Group::new(vec![ColumnValue::int(2)], vec![2, 3]),
                Group::new(vec![ColumnValue::int(1)], vec![0, 1]),
                Group::new(vec![ColumnValue::int(3)], vec![]),
            ],
            true,
            table.row_count(),
        )
        .unwrap();
        let grouped = GroupedTable::new(table, grouping).unwrap();

        let filtered = grouped.filter(&FilterRequest::new()).unwrap();

        assert_eq!(grouped, filtered);
    }

    #[test]
    fn filter_a_grouped_table_without_rows() {
        let grouped = empty_table().group_by(&["g"], true).unwrap();
        let request = FilterRequest::new().predicate(Expr::column("v").greater_than(10));

        let filtered = grouped.filter(&request).unwrap();

        assert_eq!(0, filtered.table().row_count());
        assert_eq!(0, filtered.grouping().group_count());
    }

    #[test]
    fn filter_a_grouped_table_without_rows_on_a_group_variable() {
        let grouped = empty_table().group_by(&["g"], true).unwrap();
        let request = FilterRequest::new().predicate(Expr::group_variable("g").equal_to(1));

        let filtered = grouped.filter(&request).unwrap();

        assert_eq!(0, filtered.table().row_count());
        assert_eq!(0, filtered.grouping().group_count());
    }

    #[test]
    fn attempt_to_filter_a_grouped_table_without_rows_on_an_unknown_group_variable() {
        let grouped = empty_table().group_by(&["g"], true).unwrap();
        let request = FilterRequest::new().predicate(Expr::group_variable("v").equal_to(1));

        let error = grouped.filter(&request).unwrap_err();

        assert_eq!(
            FilterError::Evaluation {
                predicate: 0,
                group: 0,
                cause: EvaluationError::Engine(EngineError::UnknownGroupVariable(
                    "v".to_string()
                )),
            },
            error
        );
    }

    #[test]
    fn filter_a_grouped_table_without_rows_with_a_scalar_predicate() {
        let grouped = empty_table().group_by(&["g"], true).unwrap();
        let request = FilterRequest::new().predicate(Expr::literal(true));

        let filtered = grouped.filter(&request).unwrap();

        assert_eq!(0, filtered.table().row_count());
    }

    #[test]
    fn filter_is_idempotent() {
        let grouped = scenario_table().group_by(&["g"], true).unwrap();
        let request = FilterRequest::new().predicate(Expr::column("v").greater_than(10));

        let once = grouped.filter(&request).unwrap();
        let twice = once.filter(&request).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn attempt_to_filter_with_a_named_condition() {
        let request = FilterRequest::new().named("v", Expr::column("v").greater_than(10));

        let result = scenario_table().filter(&request);

        assert_eq!(
            Err(FilterError::NamedPredicate {
                name: "v".to_string(),
                position: 0
            }),
            result
        );
    }

    #[test]
    fn attempt_to_filter_with_an_unknown_column() {
        let grouped = scenario_table().group_by(&["g"], true).unwrap();
        let request = FilterRequest::new().predicate(Expr::column("w").greater_than(10));

        let error = grouped.filter(&request).unwrap_err();

        assert!(matches!(
            error,
            FilterError::Evaluation {
                predicate: 0,
                group: 0,
                cause: EvaluationError::Engine(_)
            }
        ));
        assert!(!error.is_internal());
    }
}
