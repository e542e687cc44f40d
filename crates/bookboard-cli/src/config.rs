//! Configuration for the booking board CLI.
//!
//! # Storage Structure
//!
//! ```text
//! ~/.bookboard/
//! └── boards/
//!     └── bookings.json
//! ```
//!
//! # Environment Variables
//!
//! - `BOOKBOARD_STATE_DIR`: Override the base state directory
//! - `BOOKBOARD_BOARD`: Board name used when `--board` is not given
//!
//! Both can also be placed in a `.env.local` file in the working directory.

use std::path::PathBuf;

/// Environment variable for custom state directory.
pub const STATE_DIR_ENV: &str = "BOOKBOARD_STATE_DIR";

/// Environment variable for the default board name.
pub const BOARD_ENV: &str = "BOOKBOARD_BOARD";

/// Board used when none is named.
pub const DEFAULT_BOARD: &str = "bookings";

/// Dotenv file loaded before argument parsing.
pub const ENV_FILE: &str = ".env.local";

/// Default state directory name under home.
const DEFAULT_STATE_DIR: &str = ".bookboard";

/// Get the default state directory.
///
/// `~/.bookboard` if a home directory is available, otherwise
/// `.bookboard` in the current directory.
pub fn default_state_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(DEFAULT_STATE_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_dir_name() {
        assert!(default_state_dir().ends_with(DEFAULT_STATE_DIR));
    }
}
