/// Creates a `Row` from a list of values.
///
/// Values are converted into `ColumnValue`s through their `From`
/// implementations; `None` becomes `ColumnValue::Null`.
///
/// # Examples
///
/// ```
/// use groupfilter::row;
/// use groupfilter::storage::row::Row;
/// use groupfilter::types::column_value::ColumnValue;
///
/// let row = row![1, "text", None::<i64>];
/// let expected = Row::filled(vec![
///     ColumnValue::int(1),
///     ColumnValue::text("text"),
///     ColumnValue::Null,
/// ]);
/// assert_eq!(row, expected);
/// ```
#[macro_export]
macro_rules! row {
    ( $( $x:expr ),* ) => {
        {
            use $crate::storage::row::Row;
            use $crate::types::column_value::ColumnValue;
            Row::filled(vec![
                $( ColumnValue::from($x) ),*
            ])
        }
    };
}

/// Creates a `Vec<Row>` from a list of row definitions.
///
/// # Examples
///
/// ```
/// use groupfilter::rows;
///
/// let rows = rows![[1, "a"], [2, "b"]];
/// assert_eq!(2, rows.len());
/// ```
#[macro_export]
macro_rules! rows {
    ( $( [ $( $x:expr ),* ] ),* $(,)? ) => {
        vec![
            $(
                $crate::row![ $( $x ),* ]
            ),*
        ]
    };
}

/// Creates a `Schema` from `name => type` pairs.
///
/// Evaluates to `Result<Schema, SchemaError>`.
///
/// # Examples
///
/// ```
/// use groupfilter::schema;
/// use groupfilter::types::column_type::ColumnType;
///
/// let schema = schema!["g" => ColumnType::Int, "v" => ColumnType::Int].unwrap();
/// assert_eq!(2, schema.column_count());
/// ```
#[macro_export]
macro_rules! schema {
    ( $( $name:expr => $column_type:expr ),* $(,)? ) => {
        {
            let schema: ::std::result::Result<
                $crate::schema::Schema,
                $crate::schema::error::SchemaError,
            > = Ok($crate::schema::Schema::new());
            $(
                let schema = schema.and_then(|schema: $crate::schema::Schema| {
                    schema.add_column($name, $column_type)
                });
            )*
            schema
        }
    };
}
