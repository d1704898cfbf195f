use crate::storage::RowId;
use crate::table::error::TableError;
use crate::table::Table;
use crate::types::column_value::ColumnValue;
use std::collections::{BTreeMap, HashSet};

/// One distinct combination of grouping-key values and the rows holding it.
#[derive(Debug, PartialEq, Clone)]
pub struct Group {
    key: Vec<ColumnValue>,
    rows: Vec<RowId>,
}

impl Group {
    pub fn new(key: Vec<ColumnValue>, rows: Vec<RowId>) -> Self {
        Self { key, rows }
    }

    /// Key values, one per grouping column.
    pub fn key(&self) -> &[ColumnValue] {
        &self.key
    }

    /// Row positions of the group, ascending.
    pub fn rows(&self) -> &[RowId] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Grouping metadata of a table.
///
/// The row lists of all groups partition `0..row_count` of the table the
/// grouping belongs to. `drop` controls whether groups that lose all of their
/// rows are discarded when the grouping is rebuilt after a filter.
#[derive(Debug, PartialEq, Clone)]
pub struct Grouping {
    key_columns: Vec<String>,
    groups: Vec<Group>,
    drop: bool,
}

impl Grouping {
    /// Creates a grouping from explicit groups, validating it against a table
    /// of `row_count` rows.
    ///
    /// # Errors
    ///
    /// * `TableError::GroupKeyArityMismatch` if a group key does not have one value per key column.
    /// * `TableError::DuplicateGroupKey` if two groups share a key.
    /// * `TableError::RowOutOfRange`, `TableError::RowInMultipleGroups` or
    ///   `TableError::UngroupedRow` if the row lists do not partition `0..row_count`.
    /// * `TableError::UnorderedGroupRows` if a row list is not ascending.
    pub fn new(
        key_columns: Vec<String>,
        groups: Vec<Group>,
        drop: bool,
        row_count: usize,
    ) -> Result<Self, TableError> {
        let mut keys = HashSet::with_capacity(groups.len());
        let mut seen = vec![false; row_count];

        for (index, group) in groups.iter().enumerate() {
            if group.key.len() != key_columns.len() {
                return Err(TableError::GroupKeyArityMismatch {
                    group: index,
                    expected: key_columns.len(),
                    actual: group.key.len(),
                });
            }
            if !keys.insert(group.key.as_slice()) {
                return Err(TableError::DuplicateGroupKey(group.key.clone()));
            }
            for &row in &group.rows {
                let slot = seen
                    .get_mut(row)
                    .ok_or(TableError::RowOutOfRange { row, row_count })?;
                if *slot {
                    return Err(TableError::RowInMultipleGroups(row));
                }
                *slot = true;
            }
            if let Some(pair) = group.rows.windows(2).find(|pair| pair[0] >= pair[1]) {
                return Err(TableError::UnorderedGroupRows {
                    group: index,
                    row: pair[1],
                });
            }
        }
        if let Some(row) = seen.iter().position(|covered| !covered) {
            return Err(TableError::UngroupedRow(row));
        }

        Ok(Self {
            key_columns,
            groups,
            drop,
        })
    }

    /// Groups the rows of `table` by the distinct values of `key_columns`.
    ///
    /// Groups are ordered by key values and each row list is ascending.
    pub(crate) fn from_table(
        table: &Table,
        key_columns: &[&str],
        drop: bool,
    ) -> Result<Self, TableError> {
        let columns = key_columns
            .iter()
            .map(|name| {
                table
                    .column(name)
                    .ok_or_else(|| TableError::UnknownGroupingColumn(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut rows_by_key: BTreeMap<Vec<ColumnValue>, Vec<RowId>> = BTreeMap::new();
        for row in 0..table.row_count() {
            let key = columns.iter().map(|column| column[row].clone()).collect();
            rows_by_key.entry(key).or_default().push(row);
        }

        Ok(Self {
            key_columns: key_columns.iter().map(|name| name.to_string()).collect(),
            groups: rows_by_key
                .into_iter()
                .map(|(key, rows)| Group::new(key, rows))
                .collect(),
            drop,
        })
    }

    pub fn key_columns(&self) -> &[String] {
        &self.key_columns
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn group_row_lists(&self) -> Vec<&[RowId]> {
        self.groups.iter().map(Group::rows).collect()
    }

    /// Whether groups left without rows are discarded on regrouping.
    pub fn drop_flag(&self) -> bool {
        self.drop
    }

    /// Rebuilds the grouping over `rows`, the remapped row list of every group
    /// in current group order.
    ///
    /// With `preserve` the groups are kept as they are, empty ones included.
    /// Otherwise the groups are put back in key order and, when the drop flag
    /// is set, the empty ones are discarded.
    pub(crate) fn regrouped(&self, rows: Vec<Vec<RowId>>, preserve: bool) -> Grouping {
        if self.groups.is_empty() {
            return self.clone();
        }

        let mut groups: Vec<Group> = self
            .groups
            .iter()
            .zip(rows)
            .map(|(group, rows)| Group::new(group.key.clone(), rows))
            .collect();

        if !preserve {
            groups.sort_by(|left, right| left.key.cmp(&right.key));
            if self.drop {
                groups.retain(|group| !group.is_empty());
            }
        }

        Grouping {
            key_columns: self.key_columns.clone(),
            groups,
            drop: self.drop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::scenario_table;
    use pretty_assertions::assert_eq;

    fn grouping_of(groups: Vec<Group>, drop: bool) -> Grouping {
        Grouping {
            key_columns: vec!["g".to_string()],
            groups,
            drop,
        }
    }

    #[test]
    fn group_table_by_a_single_column() {
        let grouping = Grouping::from_table(&scenario_table(), &["g"], true).unwrap();

        assert_eq!(
            vec![
                Group::new(vec![ColumnValue::int(1)], vec![0, 1]),
                Group::new(vec![ColumnValue::int(2)], vec![2, 3]),
            ],
            grouping.groups()
        );
        assert_eq!(vec!["g".to_string()], grouping.key_columns());
        assert!(grouping.drop_flag());
    }

    #[test]
    fn group_table_by_two_columns() {
        let grouping = Grouping::from_table(&scenario_table(), &["v", "g"], true).unwrap();

        assert_eq!(
            vec![
                Group::new(vec![ColumnValue::int(5), ColumnValue::int(1)], vec![0]),
                Group::new(vec![ColumnValue::int(5), ColumnValue::int(2)], vec![2]),
                Group::new(vec![ColumnValue::int(15), ColumnValue::int(1)], vec![1]),
                Group::new(vec![ColumnValue::int(15), ColumnValue::int(2)], vec![3]),
            ],
            grouping.groups()
        );
    }

    #[test]
    fn attempt_to_group_by_an_unknown_column() {
        let result = Grouping::from_table(&scenario_table(), &["age"], true);

        assert!(matches!(
            result,
            Err(TableError::UnknownGroupingColumn(ref column)) if column == "age"
        ));
    }

    #[test]
    fn group_row_lists_partition_the_table() {
        let grouping = Grouping::from_table(&scenario_table(), &["v"], true).unwrap();

        let mut rows: Vec<RowId> = grouping
            .group_row_lists()
            .into_iter()
            .flatten()
            .copied()
            .collect();
        rows.sort();

        assert_eq!(vec![0, 1, 2, 3], rows);
    }

    #[test]
    fn create_a_valid_grouping() {
        let grouping = Grouping::new(
            vec!["g".to_string()],
            vec![
                Group::new(vec![ColumnValue::int(1)], vec![0, 2]),
                Group::new(vec![ColumnValue::int(2)], vec![1]),
            ],
            false,
            3,
        )
        .unwrap();

        assert_eq!(2, grouping.group_count());
        assert!(!grouping.drop_flag());
    }

    #[test]
    fn attempt_to_create_a_grouping_with_rows_out_of_table_order() {
        let result = Grouping::new(
            vec!["g".to_string()],
            vec![
                Group::new(vec![ColumnValue::int(1)], vec![1, 0]),
                Group::new(vec![ColumnValue::int(2)], vec![2, 3]),
            ],
            true,
            4,
        );

        assert_eq!(
            Err(TableError::UnorderedGroupRows { group: 0, row: 0 }),
            result
        );
    }

    #[test]
    fn attempt_to_create_a_grouping_with_an_overlapping_row() {
        let result = Grouping::new(
            vec!["g".to_string()],
            vec![
                Group::new(vec![ColumnValue::int(1)], vec![0, 1]),
                Group::new(vec![ColumnValue::int(2)], vec![1]),
            ],
            true,
            2,
        );

        assert_eq!(Err(TableError::RowInMultipleGroups(1)), result);
    }

    #[test]
    fn attempt_to_create_a_grouping_that_misses_a_row() {
        let result = Grouping::new(
            vec!["g".to_string()],
            vec![Group::new(vec![ColumnValue::int(1)], vec![0])],
            true,
            2,
        );

        assert_eq!(Err(TableError::UngroupedRow(1)), result);
    }

    #[test]
    fn attempt_to_create_a_grouping_with_a_row_out_of_range() {
        let result = Grouping::new(
            vec!["g".to_string()],
            vec![Group::new(vec![ColumnValue::int(1)], vec![0, 5])],
            true,
            2,
        );

        assert_eq!(
            Err(TableError::RowOutOfRange {
                row: 5,
                row_count: 2
            }),
            result
        );
    }

    #[test]
    fn attempt_to_create_a_grouping_with_a_duplicate_key() {
        let result = Grouping::new(
            vec!["g".to_string()],
            vec![
                Group::new(vec![ColumnValue::int(1)], vec![0]),
                Group::new(vec![ColumnValue::int(1)], vec![1]),
            ],
            true,
            2,
        );

        assert_eq!(
            Err(TableError::DuplicateGroupKey(vec![ColumnValue::int(1)])),
            result
        );
    }

    #[test]
    fn attempt_to_create_a_grouping_with_a_wrong_key_arity() {
        let result = Grouping::new(
            vec!["g".to_string()],
            vec![Group::new(vec![ColumnValue::int(1), ColumnValue::int(2)], vec![0])],
            true,
            1,
        );

        assert_eq!(
            Err(TableError::GroupKeyArityMismatch {
                group: 0,
                expected: 1,
                actual: 2
            }),
            result
        );
    }

    #[test]
    fn regrouped_drops_empty_groups_when_drop_is_set() {
        let grouping = grouping_of(
            vec![
                Group::new(vec![ColumnValue::int(1)], vec![0, 1]),
                Group::new(vec![ColumnValue::int(2)], vec![2]),
            ],
            true,
        );

        let regrouped = grouping.regrouped(vec![vec![], vec![0]], false);

        assert_eq!(
            vec![Group::new(vec![ColumnValue::int(2)], vec![0])],
            regrouped.groups()
        );
    }

    #[test]
    fn regrouped_keeps_empty_groups_when_drop_is_not_set() {
        let grouping = grouping_of(
            vec![
                Group::new(vec![ColumnValue::int(1)], vec![0, 1]),
                Group::new(vec![ColumnValue::int(2)], vec![2]),
            ],
            false,
        );

        let regrouped = grouping.regrouped(vec![vec![], vec![0]], false);

        assert_eq!(
            vec![
                Group::new(vec![ColumnValue::int(1)], vec![]),
                Group::new(vec![ColumnValue::int(2)], vec![0]),
            ],
            regrouped.groups()
        );
    }

    #[test]
    fn regrouped_with_preserve_keeps_empty_groups_in_current_order() {
        let grouping = grouping_of(
            vec![
                Group::new(vec![ColumnValue::int(2)], vec![1]),
                Group::new(vec![ColumnValue::int(1)], vec![0]),
            ],
            true,
        );

        let regrouped = grouping.regrouped(vec![vec![0], vec![]], true);

        assert_eq!(
            vec![
                Group::new(vec![ColumnValue::int(2)], vec![0]),
                Group::new(vec![ColumnValue::int(1)], vec![]),
            ],
            regrouped.groups()
        );
    }

    #[test]
    fn regrouped_without_preserve_restores_key_order() {
        let grouping = grouping_of(
            vec![
                Group::new(vec![ColumnValue::int(2)], vec![1]),
                Group::new(vec![ColumnValue::int(1)], vec![0]),
            ],
            true,
        );

        let regrouped = grouping.regrouped(vec![vec![1], vec![0]], false);

        assert_eq!(
            vec![
                Group::new(vec![ColumnValue::int(1)], vec![0]),
                Group::new(vec![ColumnValue::int(2)], vec![1]),
            ],
            regrouped.groups()
        );
    }

    #[test]
    fn regrouped_grouping_without_groups_stays_empty() {
        let grouping = grouping_of(vec![], true);

        let regrouped = grouping.regrouped(vec![vec![]], false);

        assert_eq!(0, regrouped.group_count());
        assert_eq!(vec!["g".to_string()], regrouped.key_columns());
    }
}
