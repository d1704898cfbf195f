use crate::schema::error::SchemaError;
use crate::storage::RowId;
use crate::types::column_value::ColumnValue;

/// Represents errors that can occur while building a table or its grouping.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum TableError {
    /// A row does not fit the table schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// A column is not part of the table schema.
    #[error("unknown column `{0}`")]
    UnknownColumn(String),
    /// A grouping key names a column the table does not have.
    #[error("unknown grouping column `{0}`")]
    UnknownGroupingColumn(String),
    /// A group carries a different number of key values than there are key columns.
    #[error("group {group} has {actual} key values, expected {expected}")]
    GroupKeyArityMismatch {
        group: usize,
        expected: usize,
        actual: usize,
    },
    /// Two groups carry the same key values.
    #[error("key {0:?} identifies more than one group")]
    DuplicateGroupKey(Vec<ColumnValue>),
    /// A group refers to a row past the end of the table.
    #[error("row {row} is out of range for a table of {row_count} rows")]
    RowOutOfRange { row: RowId, row_count: usize },
    /// A row is listed by more than one group, or twice by the same group.
    #[error("row {0} belongs to more than one group")]
    RowInMultipleGroups(RowId),
    /// A group lists its rows out of table order.
    #[error("group {group} lists row {row} after a later row")]
    UnorderedGroupRows { group: usize, row: RowId },
    /// A row is not listed by any group.
    #[error("row {0} does not belong to any group")]
    UngroupedRow(RowId),
}
