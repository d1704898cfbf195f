use crate::storage::RowId;
use crate::table::error::TableError;
use crate::table::Table;
use crate::types::column_value::ColumnValue;

/// Everything an expression may see while it is evaluated for one group.
///
/// The context exposes the table's columns restricted to the group's rows and
/// the group's key values as scalar variables. Aggregates computed through the
/// context therefore see only the rows of the current group.
pub struct EvaluationContext<'a> {
    table: &'a Table,
    rows: &'a [RowId],
    group_index: usize,
    key_columns: &'a [String],
    key_values: &'a [ColumnValue],
}

impl<'a> EvaluationContext<'a> {
    /// Creates a context over `rows` of `table` without group variables.
    pub fn new(table: &'a Table, rows: &'a [RowId], group_index: usize) -> Self {
        Self {
            table,
            rows,
            group_index,
            key_columns: &[],
            key_values: &[],
        }
    }

    /// Binds the key of the current group, one value per key column.
    pub fn with_group_key(
        mut self,
        key_columns: &'a [String],
        key_values: &'a [ColumnValue],
    ) -> Self {
        self.key_columns = key_columns;
        self.key_values = key_values;
        self
    }

    /// Number of rows in the current group.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Original row positions of the current group.
    pub fn rows(&self) -> &[RowId] {
        self.rows
    }

    /// Position of the current group in the partition.
    pub fn group_index(&self) -> usize {
        self.group_index
    }

    /// Values of a column for the rows of the current group.
    ///
    /// # Errors
    ///
    /// * `TableError::UnknownColumn` if the table has no such column.
    /// * `TableError::RowOutOfRange` if a row of the group is past the end of the table.
    pub fn column(&self, column_name: &str) -> Result<Vec<ColumnValue>, TableError> {
        self.table.column_values(column_name, self.rows)
    }

    /// Returns `true` if `name` is a grouping key of the current grouping, even
    /// when the current group carries no value for it.
    ///
    /// A grouping without groups is evaluated as one empty group: its key
    /// columns are bound without values.
    pub fn is_group_key(&self, name: &str) -> bool {
        self.key_columns.iter().any(|column| column == name)
    }

    /// Value of a grouping key for the current group.
    pub fn group_variable(&self, name: &str) -> Option<&ColumnValue> {
        self.key_columns
            .iter()
            .position(|column| column == name)
            .and_then(|position| self.key_values.get(position))
    }
}
