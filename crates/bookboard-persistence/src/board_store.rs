//! Board store for snapshot persistence.

use std::fs;
use std::path::PathBuf;

use bookboard_models::BoardSnapshot;
use tracing::warn;

use crate::atomic::{atomic_write_json, read_json, read_json_optional};
use crate::error::{PersistenceError, Result};

/// Manages persistence of board snapshots.
///
/// Each named board is stored as one JSON file:
/// ```text
/// base_path/
/// └── boards/
///     ├── bookings.json
///     └── archive-2024.json
/// ```
pub struct BoardStore {
    base_path: PathBuf,
}

impl BoardStore {
    /// Creates a new BoardStore with the given base path.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn boards_dir(&self) -> PathBuf {
        self.base_path.join("boards")
    }

    /// Returns the path of a named board's snapshot file.
    pub fn board_path(&self, name: &str) -> PathBuf {
        self.boards_dir().join(format!("{}.json", name))
    }

    /// Rejects names that would escape the boards directory.
    fn check_name(name: &str) -> Result<()> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(())
        } else {
            Err(PersistenceError::InvalidData(format!(
                "invalid board name: {:?}",
                name
            )))
        }
    }

    /// Saves a board snapshot, replacing any previous one.
    pub fn save_board(&self, name: &str, snapshot: &BoardSnapshot) -> Result<()> {
        Self::check_name(name)?;
        atomic_write_json(&self.board_path(name), snapshot)
    }

    /// Loads a board snapshot by name.
    pub fn load_board(&self, name: &str) -> Result<BoardSnapshot> {
        self.load_board_optional(name)?
            .ok_or_else(|| PersistenceError::NotFound {
                kind: "board".to_string(),
                id: name.to_string(),
            })
    }

    /// Loads a board snapshot, returning None if it was never saved.
    pub fn load_board_optional(&self, name: &str) -> Result<Option<BoardSnapshot>> {
        Self::check_name(name)?;
        read_json_optional(&self.board_path(name))
    }

    /// Returns true if a snapshot exists for the board.
    pub fn exists(&self, name: &str) -> bool {
        Self::check_name(name).is_ok() && self.board_path(name).exists()
    }

    /// Lists the names of all readable stored boards, sorted.
    ///
    /// Files that fail to parse are skipped with a warning.
    pub fn list_boards(&self) -> Result<Vec<String>> {
        let dir = self.boards_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&dir).map_err(|source| PersistenceError::ReadError {
            path: dir.clone(),
            source,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| PersistenceError::ReadError {
                path: dir.clone(),
                source,
            })?;

            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            match read_json::<BoardSnapshot>(&path) {
                Ok(_) => names.push(name.to_string()),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable board"),
            }
        }

        names.sort();
        Ok(names)
    }

    /// Deletes a stored board. Missing boards are not an error.
    pub fn delete_board(&self, name: &str) -> Result<()> {
        Self::check_name(name)?;
        let path = self.board_path(name);
        if path.exists() {
            fs::remove_file(&path).map_err(|source| PersistenceError::WriteError { path, source })?;
        }
        Ok(())
    }
}
