//! BoardManager - owner of the current board value.
//!
//! The current board lives behind `RwLock<Arc<Board>>`. Readers clone the
//! `Arc` and never block a move for longer than that; a move holds the
//! write lock across validate-and-swap, so moves apply one at a time.
//! Notifications are sent after the lock is released, and a failing or
//! panicking notifier never fails a committed move.

use std::sync::{Arc, RwLock};

use bookboard_models::{Column, ColumnId, Task, TaskId};
use tracing::debug;

use crate::board::{Board, TaskMove, Transition};
use crate::error::{BoardError, Result};
use crate::filter::TaskFilter;
use crate::notifier::{
    deliver, Assignment, AssignmentNotifier, BackgroundNotifier, ErrorSink, LogErrorSink,
    NoopNotifier,
};

/// Board state manager.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use bookboard_board::{Board, BoardManager, LogErrorSink, LogNotifier};
/// use bookboard_models::BoardSnapshot;
///
/// # fn load() -> BoardSnapshot { unimplemented!() }
/// let board = Board::from_snapshot(load()).unwrap();
/// let manager = BoardManager::with_notifier(board, Arc::new(LogNotifier), Arc::new(LogErrorSink));
///
/// let columns = manager.get_columns();
/// let first = &columns[0].tasks[0];
/// manager
///     .move_task(&columns[0].id, 0, &columns[1].id, 0, &first.id)
///     .unwrap();
/// ```
pub struct BoardManager {
    board: RwLock<Arc<Board>>,
    notifier: Arc<dyn AssignmentNotifier>,
    sink: Arc<dyn ErrorSink>,
}

impl BoardManager {
    /// Creates a manager that sends no notifications.
    pub fn new(board: Board) -> Self {
        Self::with_notifier(board, Arc::new(NoopNotifier), Arc::new(LogErrorSink))
    }

    /// Creates a manager with an assignment notifier and the sink its
    /// failures are reported to.
    ///
    /// The notifier runs on the thread that made the move; use
    /// [`with_background_notifier`](Self::with_background_notifier) for
    /// notifiers that block.
    pub fn with_notifier(
        board: Board,
        notifier: Arc<dyn AssignmentNotifier>,
        sink: Arc<dyn ErrorSink>,
    ) -> Self {
        Self {
            board: RwLock::new(Arc::new(board)),
            notifier,
            sink,
        }
    }

    /// Creates a manager whose notifier runs on a dedicated worker thread,
    /// so a move only waits for the assignment to be queued.
    pub fn with_background_notifier(
        board: Board,
        notifier: Arc<dyn AssignmentNotifier>,
        sink: Arc<dyn ErrorSink>,
    ) -> std::io::Result<Self> {
        let background = BackgroundNotifier::spawn(notifier, Arc::clone(&sink))?;
        Ok(Self::with_notifier(board, Arc::new(background), sink))
    }

    /// Returns the current board.
    pub fn snapshot(&self) -> Arc<Board> {
        // Boards are immutable and swapped whole, so a poisoned lock still
        // guards a consistent value.
        match self.board.read() {
            Ok(board) => Arc::clone(&board),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Columns in configuration order, each with its ordered tasks.
    pub fn get_columns(&self) -> Vec<Arc<Column>> {
        self.snapshot().columns().to_vec()
    }

    /// Moves a task between (or within) columns.
    ///
    /// `task_id` must be the task at `source_index` in `source_column`,
    /// otherwise the move is rejected as stale. On any error the board is
    /// left as it was. Returns the board after the move.
    pub fn move_task(
        &self,
        source_column: &ColumnId,
        source_index: usize,
        dest_column: &ColumnId,
        dest_index: usize,
        task_id: &TaskId,
    ) -> Result<Arc<Board>> {
        self.apply(&TaskMove {
            source_column: source_column.clone(),
            source_index,
            dest_column: dest_column.clone(),
            dest_index,
            task_id: task_id.clone(),
        })
    }

    /// Applies a prepared move request.
    pub fn apply(&self, mv: &TaskMove) -> Result<Arc<Board>> {
        self.commit(|_| Ok(mv.clone()))
    }

    /// Moves a task by id, reading its current position from the board.
    ///
    /// `dest_index` defaults to the end of the destination column.
    pub fn move_task_to(
        &self,
        task_id: &TaskId,
        dest_column: &ColumnId,
        dest_index: Option<usize>,
    ) -> Result<Arc<Board>> {
        self.commit(|board| {
            let (source_column, source_index) = board
                .locate(task_id)
                .ok_or_else(|| BoardError::TaskNotFound(task_id.clone()))?;

            let dest_index = match dest_index {
                Some(index) => index,
                None => {
                    let len = board
                        .column(dest_column)
                        .ok_or_else(|| BoardError::InvalidColumn(dest_column.clone()))?
                        .len();
                    if source_column == *dest_column {
                        len - 1
                    } else {
                        len
                    }
                }
            };

            Ok(TaskMove {
                source_column,
                source_index,
                dest_column: dest_column.clone(),
                dest_index,
                task_id: task_id.clone(),
            })
        })
    }

    /// Builds a move against the current board and applies it under one
    /// write lock.
    fn commit<F>(&self, plan: F) -> Result<Arc<Board>>
    where
        F: FnOnce(&Board) -> Result<TaskMove>,
    {
        let (board, transition) = {
            let mut current = self
                .board
                .write()
                .map_err(|e| BoardError::LockPoisoned(e.to_string()))?;

            let mv = plan(&current)?;
            match current.apply(&mv)? {
                None => {
                    debug!(task_id = %mv.task_id, column = %mv.source_column, "Move is a no-op");
                    return Ok(Arc::clone(&current));
                }
                Some(transition) => {
                    let board = Arc::new(transition.board.clone());
                    *current = Arc::clone(&board);
                    debug!(
                        task_id = %mv.task_id,
                        from = %mv.source_column,
                        to = %mv.dest_column,
                        index = mv.dest_index,
                        "Moved task"
                    );
                    (board, transition)
                }
            }
        };

        if transition.column_changed() {
            self.dispatch(&transition);
        }

        Ok(board)
    }

    fn dispatch(&self, transition: &Transition) {
        let column_title = transition
            .board
            .column(&transition.task.status)
            .map(|c| c.title.clone())
            .unwrap_or_else(|| transition.task.status.to_string());
        let assignment = Assignment::new(&transition.task, column_title);

        deliver(self.notifier.as_ref(), self.sink.as_ref(), &assignment);
    }

    /// Finds the column and position of a task.
    pub fn locate(&self, task_id: &TaskId) -> Option<(ColumnId, usize)> {
        self.snapshot().locate(task_id)
    }

    /// Returns a task by id.
    pub fn get(&self, task_id: &TaskId) -> Option<Task> {
        self.snapshot().task(task_id).cloned()
    }

    /// Lists tasks in board order, optionally filtered.
    pub fn tasks(&self, filter: Option<TaskFilter>) -> Vec<Task> {
        let board = self.snapshot();
        board
            .tasks()
            .filter(|task| filter.as_ref().map(|f| f.matches(task)).unwrap_or(true))
            .cloned()
            .collect()
    }

    /// Returns the number of tasks on the board.
    pub fn len(&self) -> usize {
        self.snapshot().task_count()
    }

    /// Returns true if the board holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
