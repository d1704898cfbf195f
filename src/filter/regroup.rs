use crate::filter::error::InvariantViolation;
use crate::filter::selector::Selection;
use crate::storage::RowId;

/// Remaps the row list of every group from original row positions to the
/// positions the surviving rows take in the compacted table.
///
/// Order inside each group is preserved. Runs in O(n + total group length).
///
/// # Errors
///
/// Any `InvariantViolation` means the groups or the selection are corrupt:
/// the mask does not cover `row_count` rows, there is not one kept-count per
/// group, a group refers to a row outside the table, or a remapped group does
/// not hold exactly its kept-count of rows.
pub(crate) fn regroup(
    groups: &[Vec<RowId>],
    selection: &Selection,
    row_count: usize,
) -> Result<Vec<Vec<RowId>>, InvariantViolation> {
    let keep = selection.keep();
    if keep.len() != row_count {
        return Err(InvariantViolation::MaskLengthMismatch {
            expected: row_count,
            actual: keep.len(),
        });
    }
    let kept_counts = selection.kept_counts();
    if kept_counts.len() != groups.len() {
        return Err(InvariantViolation::GroupCountMismatch {
            groups: groups.len(),
            counts: kept_counts.len(),
        });
    }

    let new_positions = compaction_map(keep);

    groups
        .iter()
        .zip(kept_counts)
        .enumerate()
        .map(|(group, (rows, &expected))| {
            let mut remapped = Vec::with_capacity(expected);
            for &row in rows {
                match new_positions.get(row) {
                    Some(Some(position)) => remapped.push(*position),
                    Some(None) => {}
                    None => {
                        return Err(InvariantViolation::RowOutOfRange {
                            group,
                            row,
                            row_count,
                        })
                    }
                }
            }
            if remapped.len() != expected {
                return Err(InvariantViolation::KeptCountMismatch {
                    group,
                    expected,
                    actual: remapped.len(),
                });
            }
            Ok(remapped)
        })
        .collect()
}

/// Dense 0-based position of every surviving row: a running count of the
/// kept rows before it. Dropped rows have no position.
fn compaction_map(keep: &[bool]) -> Vec<Option<RowId>> {
    let mut next_position = 0;
    keep.iter()
        .map(|&kept| {
            kept.then(|| {
                let position = next_position;
                next_position += 1;
                position
            })
        })
        .collect()
}
