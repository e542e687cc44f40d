//! Command-line interface definition using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use bookboard_models::TaskPriority;

use crate::config;

/// Bookboard - booking board for the studio's admin dashboard
#[derive(Parser, Debug)]
#[command(name = "bookboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to state directory
    #[arg(short, long, env = config::STATE_DIR_ENV)]
    pub state_dir: Option<PathBuf>,

    /// Name of the board to work on
    #[arg(short, long, env = config::BOARD_ENV, default_value = config::DEFAULT_BOARD)]
    pub board: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the board from the built-in seed or a seed file
    Init {
        /// JSON snapshot to seed from
        #[arg(long)]
        seed: Option<PathBuf>,

        /// Overwrite an existing board
        #[arg(short, long)]
        force: bool,
    },

    /// Show all columns and their tasks
    Show {
        /// Output format (table, json, brief)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Move a task to a column
    Move {
        /// Task ID
        #[arg(required = true)]
        task: String,

        /// Destination column ID
        #[arg(required = true)]
        column: String,

        /// Position in the destination column (default: end)
        #[arg(short, long)]
        index: Option<usize>,
    },

    /// List tasks, optionally filtered
    Tasks {
        /// Only tasks with this priority (high, medium, low)
        #[arg(short, long)]
        priority: Option<TaskPriority>,

        /// Only tasks in this column
        #[arg(short, long)]
        column: Option<String>,

        /// Only tasks whose customer name contains this text
        #[arg(long)]
        customer: Option<String>,
    },

    /// List column IDs and titles
    Columns,

    /// List stored boards
    Boards,
}

/// Output format for the show command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Brief,
}

impl Cli {
    /// Returns the state directory path, using default if not specified.
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir
            .clone()
            .unwrap_or_else(config::default_state_dir)
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
