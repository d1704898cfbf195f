use crate::rows;
use crate::schema::Schema;
use crate::table::Table;
use crate::types::column_type::ColumnType;

fn group_and_value_schema() -> Schema {
    Schema::new()
        .add_column("g", ColumnType::Int)
        .and_then(|schema| schema.add_column("v", ColumnType::Int))
        .unwrap()
}

/// Creates the table `g = [1, 1, 2, 2]`, `v = [5, 15, 5, 15]`.
pub fn scenario_table() -> Table {
    Table::new(
        group_and_value_schema(),
        rows![[1, 5], [1, 15], [2, 5], [2, 15]],
    )
    .unwrap()
}

/// Creates a table with the columns of [`scenario_table`] and no rows.
pub fn empty_table() -> Table {
    Table::new(group_and_value_schema(), Vec::new()).unwrap()
}

/// Asserts that a column of a table holds the given values, in row order.
///
/// Values are converted with `ColumnValue::from`, so `10`, `"text"` or
/// `ColumnValue::Null` can be passed directly.
#[macro_export]
macro_rules! assert_column {
    ($table:expr, $name:expr => [ $( $value:expr ),* $(,)? ]) => {
        ::pretty_assertions::assert_eq!(
            Some(vec![ $( $crate::types::column_value::ColumnValue::from($value) ),* ]),
            $table.column($name),
            "Mismatch in column '{}'",
            $name
        )
    };
}
