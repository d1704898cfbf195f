use crate::types::column_value::ColumnValue;
use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ColumnType {
    Int,
    Float,
    Text,
    Boolean,
}

impl ColumnType {
    /// Returns `true` if a value can be stored in a column of this type.
    ///
    /// `Null` is accepted by every column type; it is the missing value.
    pub(crate) fn accepts(&self, value: &ColumnValue) -> bool {
        matches!(
            (self, value),
            (_, ColumnValue::Null)
                | (ColumnType::Int, ColumnValue::Int(_))
                | (ColumnType::Float, ColumnValue::Float(_))
                | (ColumnType::Text, ColumnValue::Text(_))
                | (ColumnType::Boolean, ColumnValue::Boolean(_))
        )
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Int => "int",
            ColumnType::Float => "float",
            ColumnType::Text => "text",
            ColumnType::Boolean => "boolean",
        };
        f.write_str(name)
    }
}
