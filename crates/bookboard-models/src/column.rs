//! Column and snapshot types.

use serde::{Deserialize, Serialize};

use crate::ids::{ColumnId, TaskId};
use crate::task::Task;

/// A named, ordered bucket of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Unique identifier, fixed for the lifetime of the board.
    pub id: ColumnId,

    /// Display label.
    pub title: String,

    /// Tasks in display order.
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Column {
    /// Creates an empty column.
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tasks: Vec::new(),
        }
    }

    /// Returns the number of tasks in the column.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true if the column holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the position of a task within this column.
    pub fn position(&self, task_id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == *task_id)
    }
}

/// Serializable form of a whole board.
///
/// Used for seed files, stored boards and JSON output. Column order is the
/// board's configuration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BoardSnapshot {
    pub columns: Vec<Column>,
}

impl BoardSnapshot {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Total number of tasks across all columns.
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_column_position() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 3).unwrap();
        let mut column = Column::new("new", "New Bookings");
        let a = Task::new("A", "Ann", date, "new");
        let b = Task::new("B", "Ben", date, "new");
        let b_id = b.id.clone();
        column.tasks.push(a);
        column.tasks.push(b);

        assert_eq!(column.position(&b_id), Some(1));
        assert_eq!(column.position(&TaskId::new()), None);
        assert_eq!(column.len(), 2);
    }

    #[test]
    fn test_snapshot_tasks_default_to_empty() {
        let json = r#"{"columns":[{"id":"new","title":"New Bookings"}]}"#;
        let snapshot: BoardSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.columns.len(), 1);
        assert!(snapshot.columns[0].is_empty());
        assert_eq!(snapshot.task_count(), 0);
    }
}
