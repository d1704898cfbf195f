use crate::types::column_type::ColumnType;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("column `{0}` is defined more than once")]
    DuplicateColumnName(String),
    #[error("expected {expected} values in a row, got {actual}")]
    ColumnCountMismatch { expected: usize, actual: usize },
    #[error("column `{column}` expects {expected} values, got {actual}")]
    ColumnTypeMismatch {
        column: String,
        expected: ColumnType,
        actual: ColumnType,
    },
}
