//! Task filtering for board queries.

use bookboard_models::{ColumnId, Task, TaskPriority};

/// Filter criteria for querying tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Filter by column.
    pub column: Option<ColumnId>,
    /// Filter by priority.
    pub priority: Option<TaskPriority>,
    /// Case-insensitive substring of the customer name.
    pub customer: Option<String>,
}

impl TaskFilter {
    /// Creates a new empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column(mut self, column: impl Into<ColumnId>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into().to_lowercase());
        self
    }

    /// Returns true if the task matches this filter.
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(ref column) = self.column {
            if task.status != *column {
                return false;
            }
        }

        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }

        if let Some(ref customer) = self.customer {
            if !task.customer.to_lowercase().contains(customer.as_str()) {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_task(customer: &str, status: &str, priority: TaskPriority) -> Task {
        let date = NaiveDate::from_ymd_opt(2025, 4, 12).unwrap();
        Task::builder("Booking", customer, date, status)
            .priority(priority)
            .build()
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let filter = TaskFilter::new();
        assert!(filter.matches(&make_task("Ann", "new", TaskPriority::Low)));
    }

    #[test]
    fn test_filter_by_column() {
        let filter = TaskFilter::new().with_column("editing");

        assert!(filter.matches(&make_task("Ann", "editing", TaskPriority::Low)));
        assert!(!filter.matches(&make_task("Ann", "new", TaskPriority::Low)));
    }

    #[test]
    fn test_filter_by_customer_ignores_case() {
        let filter = TaskFilter::new().with_customer("SMITH");

        assert!(filter.matches(&make_task("Jane Smith", "new", TaskPriority::Medium)));
        assert!(!filter.matches(&make_task("Jane Doe", "new", TaskPriority::Medium)));
    }

    #[test]
    fn test_combined_filters() {
        let filter = TaskFilter::new()
            .with_column("new")
            .with_priority(TaskPriority::High);

        assert!(filter.matches(&make_task("Ann", "new", TaskPriority::High)));
        assert!(!filter.matches(&make_task("Ann", "done", TaskPriority::High)));
        assert!(!filter.matches(&make_task("Ann", "new", TaskPriority::Low)));
    }
}
