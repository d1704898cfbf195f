use crate::filter::evaluator::PredicateResults;
use crate::storage::RowId;

/// Global keep-mask of a filter, plus the number of surviving rows per group.
#[derive(Debug, PartialEq)]
pub(crate) struct Selection {
    keep: Vec<bool>,
    kept_counts: Vec<usize>,
}

impl Selection {
    /// `keep[row]` is `true` if the original row survives.
    pub(crate) fn keep(&self) -> &[bool] {
        &self.keep
    }

    /// Surviving rows per group, in partition order.
    pub(crate) fn kept_counts(&self) -> &[usize] {
        &self.kept_counts
    }

    pub(crate) fn kept_total(&self) -> usize {
        self.kept_counts.iter().sum()
    }

    /// Original positions of the surviving rows, ascending.
    pub(crate) fn kept_rows(&self) -> Vec<RowId> {
        self.keep
            .iter()
            .enumerate()
            .filter_map(|(row, &kept)| kept.then_some(row))
            .collect()
    }
}

#[cfg(test)]
impl Selection {
    pub(crate) fn new(keep: Vec<bool>, kept_counts: Vec<usize>) -> Self {
        Self { keep, kept_counts }
    }
}

/// ANDs the outcomes of all predicates row by row and scatters the result of
/// each group into a keep-mask of `row_count` rows.
///
/// A missing outcome excludes the row.
pub(crate) fn select(
    results: &PredicateResults,
    groups: &[Vec<RowId>],
    row_count: usize,
) -> Selection {
    let mut keep = vec![false; row_count];
    let mut kept_counts = Vec::with_capacity(groups.len());

    for (group, rows) in groups.iter().enumerate() {
        let mut kept = 0;
        for (position, &row) in rows.iter().enumerate() {
            let survives = (0..results.predicate_count())
                .all(|predicate| results.outcome(predicate, group, position) == Some(true));
            if survives {
                if let Some(slot) = keep.get_mut(row) {
                    *slot = true;
                }
                kept += 1;
            }
        }
        kept_counts.push(kept);
    }

    Selection { keep, kept_counts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn select_scatters_group_outcomes_to_original_rows() {
        let results = PredicateResults::from_outcomes(vec![vec![
            vec![Some(false), Some(true)],
            vec![Some(false), Some(true)],
        ]]);

        let selection = select(&results, &[vec![0, 1], vec![2, 3]], 4);

        assert_eq!(&[false, true, false, true], selection.keep());
        assert_eq!(&[1, 1], selection.kept_counts());
        assert_eq!(vec![1, 3], selection.kept_rows());
    }

    #[test]
    fn select_with_interleaved_groups() {
        let results = PredicateResults::from_outcomes(vec![vec![
            vec![Some(true), Some(false)],
            vec![Some(true), Some(true)],
        ]]);

        let selection = select(&results, &[vec![0, 2], vec![1, 3]], 4);

        assert_eq!(&[true, true, false, true], selection.keep());
        assert_eq!(&[1, 2], selection.kept_counts());
        assert_eq!(3, selection.kept_total());
    }

    #[test]
    fn select_combines_predicates_with_and() {
        let results = PredicateResults::from_outcomes(vec![
            vec![vec![Some(true), Some(true), Some(false)]],
            vec![vec![Some(true), Some(false), Some(true)]],
        ]);

        let selection = select(&results, &[vec![0, 1, 2]], 3);

        assert_eq!(&[true, false, false], selection.keep());
        assert_eq!(&[1], selection.kept_counts());
    }

    #[test]
    fn select_excludes_missing_outcomes() {
        let results =
            PredicateResults::from_outcomes(vec![vec![vec![Some(true), None, Some(true)]]]);

        let selection = select(&results, &[vec![0, 1, 2]], 3);

        assert_eq!(&[true, false, true], selection.keep());
        assert_eq!(&[2], selection.kept_counts());
    }

    #[test]
    fn select_with_an_empty_group() {
        let results = PredicateResults::from_outcomes(vec![vec![vec![]]]);

        let selection = select(&results, &[vec![]], 0);

        assert!(selection.keep().is_empty());
        assert_eq!(&[0], selection.kept_counts());
    }
}
