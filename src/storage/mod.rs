pub mod row;
pub(crate) mod table_store;

pub use table_store::RowId;
