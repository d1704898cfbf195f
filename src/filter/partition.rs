use crate::storage::RowId;
use crate::table::grouping::Grouping;
use crate::table::Table;

/// Splits the rows of `table` into the groups predicates are evaluated against.
///
/// An ungrouped table is a single group of all rows in order. A grouping
/// without groups yields a single empty group, so there is always at least
/// one group to evaluate.
pub(crate) fn partition(table: &Table, grouping: Option<&Grouping>) -> Vec<Vec<RowId>> {
    match grouping {
        None => vec![(0..table.row_count()).collect()],
        Some(grouping) if grouping.group_count() == 0 => vec![Vec::new()],
        Some(grouping) => grouping
            .groups()
            .iter()
            .map(|group| group.rows().to_vec())
            .collect(),
    }
}
