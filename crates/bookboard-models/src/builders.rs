//! Builder patterns for complex types.

use chrono::NaiveDate;

use crate::ids::{ColumnId, TaskId};
use crate::task::{Task, TaskPriority};

/// Builder for creating Task instances with a fluent API.
#[derive(Debug, Clone)]
pub struct TaskBuilder {
    id: Option<TaskId>,
    title: String,
    customer: String,
    date: NaiveDate,
    package: String,
    status: ColumnId,
    priority: TaskPriority,
}

impl TaskBuilder {
    /// Creates a new TaskBuilder with required fields.
    pub fn new(
        title: impl Into<String>,
        customer: impl Into<String>,
        date: NaiveDate,
        status: impl Into<ColumnId>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            customer: customer.into(),
            date,
            package: String::new(),
            status: status.into(),
            priority: TaskPriority::default(),
        }
    }

    /// Uses a fixed ID instead of a generated one.
    pub fn id(mut self, id: impl Into<TaskId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the package name.
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Sets the priority.
    pub fn priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Builds the Task.
    pub fn build(self) -> Task {
        Task {
            id: self.id.unwrap_or_default(),
            title: self.title,
            customer: self.customer,
            date: self.date,
            package: self.package,
            status: self.status,
            priority: self.priority,
        }
    }
}

impl Task {
    /// Creates a builder for a new task.
    pub fn builder(
        title: impl Into<String>,
        customer: impl Into<String>,
        date: NaiveDate,
        status: impl Into<ColumnId>,
    ) -> TaskBuilder {
        TaskBuilder::new(title, customer, date, status)
    }
}
