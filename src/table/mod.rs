pub mod error;
pub mod grouped;
pub mod grouping;

use crate::filter::error::FilterError;
use crate::filter::request::FilterRequest;
use crate::filter::{self, FilterTarget};
use crate::schema::Schema;
use crate::storage::row::Row;
use crate::storage::table_store::TableStore;
use crate::storage::RowId;
use crate::table::error::TableError;
use crate::table::grouped::GroupedTable;
use crate::table::grouping::Grouping;
use crate::types::column_value::ColumnValue;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Opaque side-attributes of a table, carried verbatim through filtering.
pub type Attributes = BTreeMap<String, String>;

/// An immutable table: a schema, rows with ordinal identity `0..row_count`,
/// and side-attributes.
///
/// Cloning a `Table` is cheap; the schema and the rows are shared.
#[derive(Clone)]
pub struct Table {
    schema: Arc<Schema>,
    store: Arc<TableStore>,
    attributes: Attributes,
}

impl Table {
    /// Creates a table from `rows`, checking every row against `schema`.
    ///
    /// # Errors
    ///
    /// * `TableError::Schema` if a row has the wrong number of values or a value of the wrong type.
    pub fn new(schema: Schema, rows: Vec<Row>) -> Result<Table, TableError> {
        for row in &rows {
            schema.check_type_compatability(row.column_values())?;
        }
        let store = TableStore::new();
        store.insert_all(rows);

        Ok(Self {
            schema: Arc::new(schema),
            store: Arc::new(store),
            attributes: Attributes::new(),
        })
    }

    pub fn with_attribute<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn row_count(&self) -> usize {
        self.store.row_count()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Returns all values of a column in row order, or `None` for an unknown column.
    pub fn column(&self, column_name: &str) -> Option<Vec<ColumnValue>> {
        let rows: Vec<RowId> = (0..self.row_count()).collect();
        self.column_values(column_name, &rows).ok()
    }

    /// Returns the values of a column at the given rows, in the given order.
    ///
    /// # Errors
    ///
    /// * `TableError::UnknownColumn` if the schema has no such column.
    /// * `TableError::RowOutOfRange` if a row is past the end of the table.
    pub fn column_values(
        &self,
        column_name: &str,
        rows: &[RowId],
    ) -> Result<Vec<ColumnValue>, TableError> {
        let position = self
            .schema
            .column_position(column_name)
            .ok_or_else(|| TableError::UnknownColumn(column_name.to_string()))?;
        rows.iter()
            .map(|&row| {
                self.store
                    .value_at(row, position)
                    .ok_or(TableError::RowOutOfRange {
                        row,
                        row_count: self.row_count(),
                    })
            })
            .collect()
    }

    /// Physically copies the rows at `row_ids` into a new table.
    ///
    /// Row `row_ids[i]` becomes row `i` of the new table. The schema and the
    /// attributes are carried over unchanged.
    pub fn slice_rows(&self, row_ids: &[RowId]) -> Table {
        Self {
            schema: Arc::clone(&self.schema),
            store: Arc::new(self.store.slice(row_ids)),
            attributes: self.attributes.clone(),
        }
    }

    /// Groups the table by the distinct values of `key_columns`.
    ///
    /// # Errors
    ///
    /// * `TableError::UnknownGroupingColumn` if a key column is not part of the schema.
    pub fn group_by(&self, key_columns: &[&str], drop: bool) -> Result<GroupedTable, TableError> {
        let grouping = Grouping::from_table(self, key_columns, drop)?;
        Ok(GroupedTable::from_parts(self.clone(), grouping))
    }

    /// Keeps the rows for which every predicate of `request` is true.
    pub fn filter(&self, request: &FilterRequest) -> Result<Table, FilterError> {
        filter::filter(self, request)
    }
}

impl FilterTarget for Table {
    fn table(&self) -> &Table {
        self
    }

    fn grouping(&self) -> Option<&Grouping> {
        None
    }

    fn regrouped(&self, table: Table, _rows: Vec<Vec<RowId>>, _preserve: bool) -> Self {
        table
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.schema == other.schema
            && self.attributes == other.attributes
            && self.row_count() == other.row_count()
            && self.store.scan().eq(other.store.scan())
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("columns", &self.schema.column_names())
            .field("rows", &self.store.scan().collect::<Vec<_>>())
            .field("attributes", &self.attributes)
            .finish()
    }
}
