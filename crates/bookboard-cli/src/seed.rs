//! Seed data for a fresh booking board.

use std::path::Path;

use bookboard_board::{Board, BoardError, Result as BoardResult};
use bookboard_models::{BoardSnapshot, Task, TaskPriority};
use bookboard_persistence::atomic::read_json;
use bookboard_persistence::Result as PersistenceResult;
use chrono::NaiveDate;

/// Column definitions of the studio's workflow, in display order.
pub const DEFAULT_COLUMNS: [(&str, &str); 5] = [
    ("new", "New Bookings"),
    ("confirmed", "Confirmed"),
    ("in-progress", "In Progress"),
    ("editing", "Editing"),
    ("delivered", "Delivered"),
];

fn date(y: i32, m: u32, d: u32) -> BoardResult<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| BoardError::InvalidSeed(format!("invalid date {}-{:02}-{:02}", y, m, d)))
}

/// Sample bookings spread across the workflow.
pub fn default_tasks() -> BoardResult<Vec<Task>> {
    Ok(vec![
        Task::builder("Beach wedding", "Priya Sharma", date(2025, 6, 14)?, "new")
            .id("booking-1")
            .package("Premium")
            .priority(TaskPriority::High)
            .build(),
        Task::builder("Engagement shoot", "Daniel Okafor", date(2025, 5, 3)?, "new")
            .id("booking-2")
            .package("Basic")
            .priority(TaskPriority::Low)
            .build(),
        Task::builder("Garden ceremony", "Emma Larsen", date(2025, 7, 19)?, "confirmed")
            .id("booking-3")
            .package("Luxury")
            .priority(TaskPriority::High)
            .build(),
        Task::builder("Reception coverage", "Marco Bianchi", date(2025, 4, 26)?, "in-progress")
            .id("booking-4")
            .package("Premium")
            .build(),
        Task::builder("Pre-wedding album", "Aisha Rahman", date(2025, 3, 8)?, "editing")
            .id("booking-5")
            .package("Basic")
            .build(),
        Task::builder("Church wedding", "Sofia Novak", date(2025, 2, 15)?, "delivered")
            .id("booking-6")
            .package("Luxury")
            .priority(TaskPriority::Low)
            .build(),
    ])
}

/// Builds the built-in seed board.
pub fn default_board() -> BoardResult<Board> {
    Board::seeded(DEFAULT_COLUMNS, default_tasks()?)
}

/// Reads a seed snapshot from a JSON file.
pub fn load_seed_file(path: &Path) -> PersistenceResult<BoardSnapshot> {
    read_json(path)
}
