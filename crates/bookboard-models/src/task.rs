//! Booking task types.
//!
//! A task is one booking card on the board. Only `id` and `status` matter to
//! the board logic; everything else is carried along for display and for the
//! assignment notifications sent when a booking changes column.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ids::{ColumnId, TaskId};

/// Display priority of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl TaskPriority {
    /// Returns the lowercase label used in seed files and output.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::High => "high",
            TaskPriority::Medium => "medium",
            TaskPriority::Low => "low",
        }
    }

    pub fn all() -> [TaskPriority; 3] {
        [TaskPriority::High, TaskPriority::Medium, TaskPriority::Low]
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(TaskPriority::High),
            "medium" => Ok(TaskPriority::Medium),
            "low" => Ok(TaskPriority::Low),
            other => Err(format!("unknown priority: {}", other)),
        }
    }
}

/// A booking card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, stable across moves.
    pub id: TaskId,

    /// Display text.
    pub title: String,

    /// Customer the booking belongs to.
    pub customer: String,

    /// Event date of the booking.
    pub date: NaiveDate,

    /// Photography package booked.
    #[serde(default)]
    pub package: String,

    /// Column the task currently sits in.
    pub status: ColumnId,

    /// Display priority.
    #[serde(default)]
    pub priority: TaskPriority,
}

impl Task {
    /// Creates a new task with a generated ID and medium priority.
    pub fn new(
        title: impl Into<String>,
        customer: impl Into<String>,
        date: NaiveDate,
        status: impl Into<ColumnId>,
    ) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            customer: customer.into(),
            date,
            package: String::new(),
            status: status.into(),
            priority: TaskPriority::Medium,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!("high".parse::<TaskPriority>(), Ok(TaskPriority::High));
        assert_eq!(" Low ".parse::<TaskPriority>(), Ok(TaskPriority::Low));
        assert!("urgent".parse::<TaskPriority>().is_err());
    }

    #[test]
    fn test_priority_display_matches_serde() {
        for priority in TaskPriority::all() {
            let json = serde_json::to_string(&priority).unwrap();
            assert_eq!(json, format!("\"{}\"", priority));
        }
    }

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new("Smith wedding", "Jane Smith", date(), "new");
        assert!(task.id.as_str().starts_with("task-"));
        assert_eq!(task.status.as_str(), "new");
        assert_eq!(task.priority, TaskPriority::Medium);
        assert!(task.package.is_empty());
    }

    #[test]
    fn test_task_date_format() {
        let task = Task::new("Smith wedding", "Jane Smith", date(), "new");
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["date"], "2025-06-14");
    }

    #[test]
    fn test_task_missing_optional_fields() {
        let json = r#"{
            "id": "b-1",
            "title": "Engagement shoot",
            "customer": "Ali Khan",
            "date": "2025-09-01",
            "status": "new"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.package, "");
    }
}
