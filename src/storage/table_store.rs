use crate::storage::row::Row;
use crate::types::column_value::ColumnValue;
use crossbeam_skiplist::SkipMap;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering::AcqRel;

/// Ordinal identity of a row: its position in the table, starting at 0.
pub type RowId = usize;

/// In-memory row storage keyed by ordinal position.
///
/// Row ids are handed out densely from 0 in insertion order, so a store with
/// `n` rows always holds exactly the ids `0..n`.
pub(crate) struct TableStore {
    entries: SkipMap<RowId, Row>,
    next_row_id: AtomicUsize,
}

impl TableStore {
    pub(crate) fn new() -> TableStore {
        Self {
            entries: SkipMap::new(),
            next_row_id: AtomicUsize::new(0),
        }
    }

    pub(crate) fn insert_all(&self, rows: Vec<Row>) {
        for row in rows {
            self.insert(row);
        }
    }

    pub(crate) fn insert(&self, row: Row) -> RowId {
        let row_id = self.next_row_id.fetch_add(1, AcqRel);
        self.entries.insert(row_id, row);
        row_id
    }

    /// Returns the value at `position` of the row `row_id` without copying the row.
    pub(crate) fn value_at(&self, row_id: RowId, position: usize) -> Option<ColumnValue> {
        self.entries
            .get(&row_id)
            .and_then(|entry| entry.value().column_value_at(position).cloned())
    }

    pub(crate) fn row_count(&self) -> usize {
        self.entries.len()
    }

    /// Copies the rows at `row_ids`, in the given order, into a new store.
    ///
    /// The copied rows receive fresh, dense ids `0..row_ids.len()`.
    /// Unknown ids are skipped.
    pub(crate) fn slice(&self, row_ids: &[RowId]) -> TableStore {
        let store = TableStore::new();
        for row_id in row_ids {
            if let Some(entry) = self.entries.get(row_id) {
                store.insert(entry.value().clone());
            }
        }
        store
    }

    pub(crate) fn scan(&self) -> impl Iterator<Item = Row> + '_ {
        self.entries.iter().map(|entry| entry.value().clone())
    }
}
