//! Booking board state manager.
//!
//! This crate provides the `BoardManager` for a Kanban-style booking board:
//! - Immutable `Board` values; a move replaces only the affected columns
//! - Validated moves that either apply completely or leave the board as it was
//! - Assignment notifications through an injected `AssignmentNotifier`
//!
//! # Example
//!
//! ```no_run
//! use bookboard_board::{Board, BoardManager};
//! use bookboard_models::{ColumnId, Task};
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
//! let task = Task::builder("Smith wedding", "Jane Smith", date, "new").id("b-1").build();
//!
//! let board = Board::seeded(
//!     [("new", "New Bookings"), ("shooting", "Shooting")],
//!     vec![task],
//! )
//! .unwrap();
//! let manager = BoardManager::new(board);
//!
//! manager
//!     .move_task(&"new".into(), 0, &"shooting".into(), 0, &"b-1".into())
//!     .unwrap();
//!
//! for column in manager.get_columns() {
//!     println!("{}: {} task(s)", column.title, column.len());
//! }
//! ```

pub mod board;
pub mod error;
pub mod filter;
pub mod manager;
pub mod notifier;

pub use board::{Board, TaskMove, Transition};
pub use error::{BoardError, Result};
pub use filter::TaskFilter;
pub use manager::BoardManager;
pub use notifier::{
    deliver, Assignment, AssignmentNotifier, BackgroundNotifier, ChannelNotifier, ErrorSink,
    LogErrorSink, LogNotifier, NoopNotifier, NotifyError,
};
