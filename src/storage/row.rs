use crate::types::column_value::ColumnValue;

/// A single row of column values, ordered as the table schema orders its columns.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Row {
    values: Vec<ColumnValue>,
}

impl Row {
    pub fn filled(values: Vec<ColumnValue>) -> Row {
        Self { values }
    }

    pub(crate) fn column_values(&self) -> &[ColumnValue] {
        &self.values
    }

    pub(crate) fn column_value_at(&self, index: usize) -> Option<&ColumnValue> {
        self.values.get(index)
    }
}
