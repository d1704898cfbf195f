use crate::filter::error::FilterError;
use crate::filter::request::FilterRequest;
use crate::filter::{self, FilterTarget};
use crate::storage::RowId;
use crate::table::error::TableError;
use crate::table::grouping::Grouping;
use crate::table::Table;

/// A table together with its grouping metadata.
#[derive(Debug, PartialEq, Clone)]
pub struct GroupedTable {
    table: Table,
    grouping: Grouping,
}

impl GroupedTable {
    /// Pairs a table with a grouping built elsewhere.
    ///
    /// # Errors
    ///
    /// * `TableError::UnknownGroupingColumn` if a key column is not part of the table.
    /// * any partition error of [`Grouping::new`] if the groups do not cover the table's rows.
    pub fn new(table: Table, grouping: Grouping) -> Result<Self, TableError> {
        if let Some(column) = grouping
            .key_columns()
            .iter()
            .find(|column| table.schema().column_position(column).is_none())
        {
            return Err(TableError::UnknownGroupingColumn(column.clone()));
        }
        let grouping = Grouping::new(
            grouping.key_columns().to_vec(),
            grouping.groups().to_vec(),
            grouping.drop_flag(),
            table.row_count(),
        )?;
        Ok(Self::from_parts(table, grouping))
    }

    pub(crate) fn from_parts(table: Table, grouping: Grouping) -> Self {
        Self { table, grouping }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn grouping(&self) -> &Grouping {
        &self.grouping
    }

    pub fn ungroup(self) -> Table {
        self.table
    }

    /// Keeps the rows for which every predicate of `request` is true, evaluating
    /// each predicate once per group, and regroups the surviving rows.
    pub fn filter(&self, request: &FilterRequest) -> Result<GroupedTable, FilterError> {
        filter::filter(self, request)
    }
}

impl FilterTarget for GroupedTable {
    fn table(&self) -> &Table {
        &self.table
    }

    fn grouping(&self) -> Option<&Grouping> {
        Some(&self.grouping)
    }

    fn regrouped(&self, table: Table, rows: Vec<Vec<RowId>>, preserve: bool) -> Self {
        Self {
            table,
            grouping: self.grouping.regrouped(rows, preserve),
        }
    }
}
