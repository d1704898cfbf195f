use crate::expr::error::EngineError;
use crate::storage::RowId;
use crate::types::column_type::ColumnType;

/// Represents errors that abort a filtering call.
///
/// No partial result is ever produced: a filter either succeeds for every
/// group or fails as a whole.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum FilterError {
    /// A predicate was given a name although it is not a logical constant.
    /// Named predicates usually mean `=` was written where `==` was meant.
    #[error(
        "predicate #{position} must not be named, got `{name}`; \
         did you mean a comparison with `{name}` instead of an assignment?"
    )]
    NamedPredicate { name: String, position: usize },
    /// A predicate failed for one group.
    #[error("predicate #{predicate} failed in group {group}: {cause}")]
    Evaluation {
        predicate: usize,
        group: usize,
        cause: EvaluationError,
    },
    /// The filter's own bookkeeping is inconsistent. This is a bug in the
    /// grouping or in the filter, not in the input.
    #[error("internal error: {0}")]
    Invariant(#[from] InvariantViolation),
}

impl FilterError {
    /// Returns `true` if the error points at a defect of the implementation
    /// rather than at the caller's input.
    pub fn is_internal(&self) -> bool {
        matches!(self, FilterError::Invariant(_))
    }
}

/// Why a single (predicate, group) evaluation failed.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    /// The expression engine reported a failure.
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// The predicate produced a value that is neither boolean nor null.
    #[error("result must be logical, got {found}")]
    NotLogical { found: ColumnType },
    /// The predicate produced a number of values other than the group size or 1.
    #[error("result must have size {expected} or 1, not {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Consistency checks of the regrouping step.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("keep-mask has {actual} entries for a table of {expected} rows")]
    MaskLengthMismatch { expected: usize, actual: usize },
    #[error("{counts} kept-counts for {groups} groups")]
    GroupCountMismatch { groups: usize, counts: usize },
    #[error("group {group} refers to row {row} of a table with {row_count} rows")]
    RowOutOfRange {
        group: usize,
        row: RowId,
        row_count: usize,
    },
    #[error("group {group} keeps {actual} rows after remapping, expected {expected}")]
    KeptCountMismatch {
        group: usize,
        expected: usize,
        actual: usize,
    },
}
