use crate::types::column_type::ColumnType;

#[derive(Debug, PartialEq, Clone)]
pub(crate) struct Column {
    name: String,
    column_type: ColumnType,
}

impl Column {
    pub(crate) fn new(name: &str, column_type: ColumnType) -> Column {
        Column {
            name: name.to_string(),
            column_type,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn column_type(&self) -> &ColumnType {
        &self.column_type
    }

    pub(crate) fn matches_name(&self, column_name: &str) -> bool {
        self.name == column_name
    }
}
