//! Row filtering of plain and grouped tables.
//!
//! Predicates are evaluated once per group, so aggregates such as `mean` see
//! only the rows of their group. The surviving rows are compacted and the
//! grouping is rebuilt over the compacted table.

pub mod expr;
pub mod filter;
pub mod macros;
pub mod schema;
pub mod storage;
pub mod table;
#[cfg(test)]
pub mod test_utils;
pub mod types;
