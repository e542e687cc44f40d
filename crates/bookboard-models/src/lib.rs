//! Core data models for the booking board.
//!
//! This crate provides the plain data types shared by the board state
//! manager, the persistence layer and the command-line front end.

pub mod builders;
pub mod column;
pub mod ids;
pub mod task;

// Re-export main types
pub use builders::TaskBuilder;
pub use column::{BoardSnapshot, Column};
pub use ids::{ColumnId, TaskId};
pub use task::{Task, TaskPriority};
