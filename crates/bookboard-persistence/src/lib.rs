//! Persistence layer for the booking board.
//!
//! Boards are stored as JSON snapshots using atomic file operations
//! (write to temp file, then rename), so a crash never leaves a
//! half-written board behind.
//!
//! # Example
//!
//! ```no_run
//! use bookboard_persistence::BoardStore;
//! use bookboard_models::{BoardSnapshot, Column};
//!
//! let store = BoardStore::new("/home/user/.bookboard");
//!
//! let snapshot = BoardSnapshot::new(vec![Column::new("new", "New Bookings")]);
//! store.save_board("bookings", &snapshot).unwrap();
//!
//! let loaded = store.load_board("bookings").unwrap();
//! assert_eq!(loaded, snapshot);
//! ```

pub mod atomic;
pub mod board_store;
pub mod error;

pub use board_store::BoardStore;
pub use error::{PersistenceError, Result};
