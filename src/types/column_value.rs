use crate::types::column_type::ColumnType;
use ordered_float::OrderedFloat;
use std::fmt;

/// A single cell value.
///
/// Values are totally ordered (floats through [`OrderedFloat`]) so they can be
/// used directly as grouping keys. `Null` sorts after every other value.
#[derive(Debug, PartialEq, Hash, Eq, Clone, PartialOrd, Ord)]
pub enum ColumnValue {
    Int(i64),
    Float(OrderedFloat<f64>),
    Text(String),
    Boolean(bool),
    Null,
}

impl ColumnValue {
    pub fn int(value: i64) -> Self {
        ColumnValue::Int(value)
    }

    pub fn float(value: f64) -> Self {
        ColumnValue::Float(OrderedFloat(value))
    }

    pub fn text(value: &str) -> Self {
        ColumnValue::Text(value.to_string())
    }

    pub fn boolean(value: bool) -> Self {
        ColumnValue::Boolean(value)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ColumnValue::Null)
    }

    /// Returns the type of the value, or `None` for `Null`.
    pub fn column_type(&self) -> Option<ColumnType> {
        match self {
            ColumnValue::Int(_) => Some(ColumnType::Int),
            ColumnValue::Float(_) => Some(ColumnType::Float),
            ColumnValue::Text(_) => Some(ColumnType::Text),
            ColumnValue::Boolean(_) => Some(ColumnType::Boolean),
            ColumnValue::Null => None,
        }
    }

    /// Numeric view of the value, promoting `Int` to `f64`.
    pub(crate) fn numeric_value(&self) -> Option<f64> {
        match self {
            ColumnValue::Int(value) => Some(*value as f64),
            ColumnValue::Float(value) => Some(value.into_inner()),
            _ => None,
        }
    }
}

impl From<i64> for ColumnValue {
    fn from(value: i64) -> Self {
        ColumnValue::Int(value)
    }
}

impl From<i32> for ColumnValue {
    fn from(value: i32) -> Self {
        ColumnValue::Int(value as i64)
    }
}

impl From<f64> for ColumnValue {
    fn from(value: f64) -> Self {
        ColumnValue::float(value)
    }
}

impl From<&str> for ColumnValue {
    fn from(value: &str) -> Self {
        ColumnValue::text(value)
    }
}

impl From<String> for ColumnValue {
    fn from(value: String) -> Self {
        ColumnValue::Text(value)
    }
}

impl From<bool> for ColumnValue {
    fn from(value: bool) -> Self {
        ColumnValue::Boolean(value)
    }
}

impl<T: Into<ColumnValue>> From<Option<T>> for ColumnValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ColumnValue::Null, Into::into)
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Int(value) => write!(f, "{value}"),
            ColumnValue::Float(value) => write!(f, "{value}"),
            ColumnValue::Text(value) => write!(f, "{value:?}"),
            ColumnValue::Boolean(value) => write!(f, "{value}"),
            ColumnValue::Null => f.write_str("null"),
        }
    }
}
