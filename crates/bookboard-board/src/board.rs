//! Board - immutable columns-of-tasks value and its move reducer.
//!
//! Every column is held behind an `Arc`. Applying a move builds a new
//! `Board` that clones only the one or two columns it touches and shares
//! every other column with the board it came from, so untouched columns are
//! pointer-equal before and after.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use bookboard_models::{BoardSnapshot, Column, ColumnId, Task, TaskId};

use crate::error::{BoardError, Result};

/// A single drag-end request.
///
/// `source_index` is where the caller saw the task when the drag began;
/// `dest_index` is the wanted position after the task has been removed from
/// its old slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMove {
    pub source_column: ColumnId,
    pub source_index: usize,
    pub dest_column: ColumnId,
    pub dest_index: usize,
    pub task_id: TaskId,
}

impl TaskMove {
    pub fn new(
        source_column: impl Into<ColumnId>,
        source_index: usize,
        dest_column: impl Into<ColumnId>,
        dest_index: usize,
        task_id: impl Into<TaskId>,
    ) -> Self {
        Self {
            source_column: source_column.into(),
            source_index,
            dest_column: dest_column.into(),
            dest_index,
            task_id: task_id.into(),
        }
    }

    /// True when the move would put the task back where it already is.
    pub fn is_noop(&self) -> bool {
        self.source_column == self.dest_column && self.source_index == self.dest_index
    }
}

/// Result of a move that changed the board.
#[derive(Debug, Clone)]
pub struct Transition {
    /// The board after the move.
    pub board: Board,
    /// The moved task, with its updated status.
    pub task: Task,
    /// Column the task came from.
    pub from: ColumnId,
}

impl Transition {
    /// True when the task ended up in a different column.
    pub fn column_changed(&self) -> bool {
        self.from != self.task.status
    }
}

/// Ordered set of columns with a fixed key set.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    columns: Vec<Arc<Column>>,
    /// Column id to position in `columns`; shared by all versions of a board.
    index: Arc<HashMap<ColumnId, usize>>,
}

impl Board {
    /// Builds a board from complete columns, validating every invariant.
    ///
    /// Fails if there are no columns, a column id repeats, a task id repeats,
    /// or a task's status does not name the column holding it.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if columns.is_empty() {
            return Err(BoardError::InvalidSeed("board has no columns".to_string()));
        }

        let mut index = HashMap::with_capacity(columns.len());
        let mut seen_tasks = HashSet::new();

        for (pos, column) in columns.iter().enumerate() {
            if index.insert(column.id.clone(), pos).is_some() {
                return Err(BoardError::InvalidSeed(format!(
                    "duplicate column id: {}",
                    column.id
                )));
            }

            for task in &column.tasks {
                if !seen_tasks.insert(task.id.clone()) {
                    return Err(BoardError::InvalidSeed(format!(
                        "duplicate task id: {}",
                        task.id
                    )));
                }
                if task.status != column.id {
                    return Err(BoardError::InvalidSeed(format!(
                        "task {} has status {} but sits in column {}",
                        task.id, task.status, column.id
                    )));
                }
            }
        }

        Ok(Self {
            columns: columns.into_iter().map(Arc::new).collect(),
            index: Arc::new(index),
        })
    }

    /// Builds a board from column definitions and a flat list of seed tasks.
    ///
    /// Each task is placed in the column named by its status; tasks keep
    /// their relative order from `tasks`.
    pub fn seeded<C, T>(
        definitions: impl IntoIterator<Item = (C, T)>,
        tasks: Vec<Task>,
    ) -> Result<Self>
    where
        C: Into<ColumnId>,
        T: Into<String>,
    {
        let mut columns: Vec<Column> = definitions
            .into_iter()
            .map(|(id, title)| Column::new(id, title))
            .collect();

        for task in tasks {
            let column = columns
                .iter_mut()
                .find(|c| c.id == task.status)
                .ok_or_else(|| {
                    BoardError::InvalidSeed(format!(
                        "task {} has unknown status {}",
                        task.id, task.status
                    ))
                })?;
            column.tasks.push(task);
        }

        Self::new(columns)
    }

    /// Builds a board from a stored or seed snapshot.
    pub fn from_snapshot(snapshot: BoardSnapshot) -> Result<Self> {
        Self::new(snapshot.columns)
    }

    /// Copies the board into its serializable form.
    pub fn to_snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::new(self.columns.iter().map(|c| Column::clone(c)).collect())
    }

    /// Columns in configuration order.
    pub fn columns(&self) -> &[Arc<Column>] {
        &self.columns
    }

    /// Looks up a column by id.
    pub fn column(&self, id: &ColumnId) -> Option<&Arc<Column>> {
        self.index.get(id).map(|&pos| &self.columns[pos])
    }

    pub fn contains_column(&self, id: &ColumnId) -> bool {
        self.index.contains_key(id)
    }

    /// Total number of tasks across all columns.
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.len()).sum()
    }

    /// Finds the column and position of a task.
    pub fn locate(&self, task_id: &TaskId) -> Option<(ColumnId, usize)> {
        self.columns
            .iter()
            .find_map(|c| c.position(task_id).map(|pos| (c.id.clone(), pos)))
    }

    /// Returns a task by id.
    pub fn task(&self, task_id: &TaskId) -> Option<&Task> {
        self.columns
            .iter()
            .flat_map(|c| c.tasks.iter())
            .find(|t| t.id == *task_id)
    }

    /// Iterates over all tasks in board order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.columns.iter().flat_map(|c| c.tasks.iter())
    }

    fn position_of(&self, id: &ColumnId) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| BoardError::InvalidColumn(id.clone()))
    }

    /// Applies a move, returning the resulting board.
    ///
    /// Returns `Ok(None)` for a no-op move. Every check runs before anything
    /// is cloned, so an error never yields a partially updated board.
    pub fn apply(&self, mv: &TaskMove) -> Result<Option<Transition>> {
        let src = self.position_of(&mv.source_column)?;
        let dst = self.position_of(&mv.dest_column)?;

        if mv.is_noop() {
            return Ok(None);
        }

        let source = &self.columns[src];
        match source.tasks.get(mv.source_index) {
            Some(task) if task.id == mv.task_id => {}
            found => {
                return Err(BoardError::StaleMove {
                    column: mv.source_column.clone(),
                    index: mv.source_index,
                    expected: mv.task_id.clone(),
                    found: found.map(|t| t.id.clone()),
                })
            }
        }

        // Destination length as seen after the removal
        let dest_len = if src == dst {
            source.len() - 1
        } else {
            self.columns[dst].len()
        };
        if mv.dest_index > dest_len {
            return Err(BoardError::InvalidIndex {
                column: mv.dest_column.clone(),
                index: mv.dest_index,
                len: dest_len,
            });
        }

        let mut columns = self.columns.clone();

        let mut source = Column::clone(source);
        let mut task = source.tasks.remove(mv.source_index);
        task.status = mv.dest_column.clone();

        if src == dst {
            source.tasks.insert(mv.dest_index, task.clone());
            columns[src] = Arc::new(source);
        } else {
            let mut dest = Column::clone(&self.columns[dst]);
            dest.tasks.insert(mv.dest_index, task.clone());
            columns[src] = Arc::new(source);
            columns[dst] = Arc::new(dest);
        }

        Ok(Some(Transition {
            board: Board {
                columns,
                index: Arc::clone(&self.index),
            },
            task,
            from: mv.source_column.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn task(id: &str, status: &str) -> Task {
        let date = NaiveDate::from_ymd_opt(2025, 7, 19).unwrap();
        Task::builder(format!("Booking {}", id), "Customer", date, status)
            .id(id)
            .build()
    }

    fn ids(column: &Column) -> Vec<&str> {
        column.tasks.iter().map(|t| t.id.as_str()).collect()
    }

    fn board() -> Board {
        Board::seeded(
            [("todo", "To Do"), ("doing", "Doing"), ("done", "Done")],
            vec![
                task("A", "todo"),
                task("B", "todo"),
                task("C", "todo"),
                task("D", "todo"),
                task("E", "doing"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_seeded_places_tasks_in_order() {
        let board = board();
        assert_eq!(ids(&board.columns()[0]), vec!["A", "B", "C", "D"]);
        assert_eq!(ids(&board.columns()[1]), vec!["E"]);
        assert!(board.columns()[2].is_empty());
        assert_eq!(board.task_count(), 5);
    }

    #[test]
    fn test_seeded_unknown_status() {
        let result = Board::seeded([("todo", "To Do")], vec![task("A", "archived")]);
        assert!(matches!(result, Err(BoardError::InvalidSeed(_))));
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let result = Board::new(vec![Column::new("todo", "To Do"), Column::new("todo", "Again")]);
        assert!(matches!(result, Err(BoardError::InvalidSeed(_))));

        let result = Board::seeded(
            [("todo", "To Do"), ("done", "Done")],
            vec![task("A", "todo"), task("A", "done")],
        );
        assert!(matches!(result, Err(BoardError::InvalidSeed(_))));
    }

    #[test]
    fn test_new_rejects_status_mismatch() {
        let mut column = Column::new("todo", "To Do");
        column.tasks.push(task("A", "done"));
        let result = Board::new(vec![column, Column::new("done", "Done")]);
        assert!(matches!(result, Err(BoardError::InvalidSeed(_))));
    }

    #[test]
    fn test_new_rejects_empty_board() {
        assert!(matches!(Board::new(Vec::new()), Err(BoardError::InvalidSeed(_))));
    }

    #[test]
    fn test_same_column_reorder() {
        let board = board();
        let t = board
            .apply(&TaskMove::new("todo", 2, "todo", 0, "C"))
            .unwrap()
            .unwrap();

        assert_eq!(ids(&t.board.columns()[0]), vec!["C", "A", "B", "D"]);
        assert!(!t.column_changed());
    }

    #[test]
    fn test_same_column_move_down_uses_post_removal_index() {
        let board = board();
        let t = board
            .apply(&TaskMove::new("todo", 0, "todo", 3, "A"))
            .unwrap()
            .unwrap();

        assert_eq!(ids(&t.board.columns()[0]), vec!["B", "C", "D", "A"]);
    }

    #[test]
    fn test_same_column_index_past_end() {
        let board = board();
        let result = board.apply(&TaskMove::new("todo", 0, "todo", 4, "A"));
        assert_eq!(
            result.unwrap_err(),
            BoardError::InvalidIndex {
                column: "todo".into(),
                index: 4,
                len: 3
            }
        );
    }

    #[test]
    fn test_cross_column_move_updates_status() {
        let board = board();
        let t = board
            .apply(&TaskMove::new("todo", 1, "doing", 1, "B"))
            .unwrap()
            .unwrap();

        assert_eq!(ids(&t.board.columns()[0]), vec!["A", "C", "D"]);
        assert_eq!(ids(&t.board.columns()[1]), vec!["E", "B"]);
        assert_eq!(t.task.status.as_str(), "doing");
        assert_eq!(t.from.as_str(), "todo");
        assert!(t.column_changed());
    }

    #[test]
    fn test_untouched_column_is_shared() {
        let board = board();
        let t = board
            .apply(&TaskMove::new("todo", 0, "done", 0, "A"))
            .unwrap()
            .unwrap();

        assert!(Arc::ptr_eq(&board.columns()[1], &t.board.columns()[1]));
        assert!(!Arc::ptr_eq(&board.columns()[0], &t.board.columns()[0]));
        assert!(!Arc::ptr_eq(&board.columns()[2], &t.board.columns()[2]));
    }

    #[test]
    fn test_noop_move() {
        let board = board();
        assert!(board.apply(&TaskMove::new("todo", 1, "todo", 1, "B")).unwrap().is_none());
    }

    #[test]
    fn test_unknown_column_checked_before_noop() {
        let board = board();
        let result = board.apply(&TaskMove::new("archive", 0, "archive", 0, "A"));
        assert_eq!(result.unwrap_err(), BoardError::InvalidColumn("archive".into()));
    }

    #[test]
    fn test_source_index_out_of_range_is_stale() {
        let board = board();
        let result = board.apply(&TaskMove::new("doing", 3, "done", 0, "E"));
        assert!(matches!(
            result,
            Err(BoardError::StaleMove { found: None, .. })
        ));
    }

    #[test]
    fn test_locate_and_task() {
        let board = board();
        assert_eq!(board.locate(&"D".into()), Some(("todo".into(), 3)));
        assert_eq!(board.locate(&"Z".into()), None);
        assert_eq!(board.task(&"E".into()).unwrap().status.as_str(), "doing");
    }

    #[test]
    fn test_snapshot_round_trip_keeps_board() {
        let board = board();
        let restored = Board::from_snapshot(board.to_snapshot()).unwrap();
        assert_eq!(restored, board);
    }
}
