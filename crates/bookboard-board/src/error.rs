//! Error types for board operations.

use bookboard_models::{ColumnId, TaskId};
use thiserror::Error;

/// Errors that can occur during board operations.
///
/// A move that returns any of these leaves the board exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Referenced column does not exist on the board.
    #[error("column not found: {0}")]
    InvalidColumn(ColumnId),

    /// The task at the source position is not the one the caller expected.
    #[error(
        "stale move: expected {expected} at {column}[{index}], found {}",
        .found.as_ref().map(TaskId::as_str).unwrap_or("nothing")
    )]
    StaleMove {
        column: ColumnId,
        index: usize,
        expected: TaskId,
        found: Option<TaskId>,
    },

    /// Destination index is past the end of the destination list.
    #[error("index {index} out of range for column {column} (len {len})")]
    InvalidIndex {
        column: ColumnId,
        index: usize,
        len: usize,
    },

    /// Task is not on the board.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// Seed data or snapshot violates a board invariant.
    #[error("invalid seed: {0}")]
    InvalidSeed(String),

    /// Lock poisoned (thread panicked while holding lock).
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

impl BoardError {
    /// Returns true if retrying with indices from a fresh read can succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, BoardError::StaleMove { .. })
    }
}

/// Result type alias for board operations.
pub type Result<T> = std::result::Result<T, BoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_move_message() {
        let err = BoardError::StaleMove {
            column: "new".into(),
            index: 0,
            expected: "b-2".into(),
            found: Some("b-1".into()),
        };
        assert_eq!(err.to_string(), "stale move: expected b-2 at new[0], found b-1");

        let err = BoardError::StaleMove {
            column: "new".into(),
            index: 5,
            expected: "b-2".into(),
            found: None,
        };
        assert_eq!(err.to_string(), "stale move: expected b-2 at new[5], found nothing");
    }

    #[test]
    fn test_only_stale_moves_are_recoverable() {
        let stale = BoardError::StaleMove {
            column: "new".into(),
            index: 0,
            expected: "b-2".into(),
            found: None,
        };
        assert!(stale.is_recoverable());
        assert!(!BoardError::InvalidColumn("gone".into()).is_recoverable());
    }
}
