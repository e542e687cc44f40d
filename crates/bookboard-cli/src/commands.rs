//! Command handlers for the booking board CLI.

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use bookboard_board::{Board, BoardError, BoardManager, LogErrorSink, LogNotifier, TaskFilter};
use bookboard_models::{ColumnId, Task, TaskId};
use bookboard_persistence::{BoardStore, PersistenceError};
use thiserror::Error;
use tracing::{info, warn};

use crate::cli::{Commands, OutputFormat};
use crate::seed;

/// Errors from CLI commands.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("board '{0}' not found, run `bookboard init` first")]
    BoardNotFound(String),

    #[error("board '{0}' already exists (use --force to overwrite)")]
    AlreadyExists(String),

    #[error("failed to start notification worker: {0}")]
    Notifier(#[from] std::io::Error),

    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for command operations.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Executes a CLI command against the named board.
pub fn execute(cmd: Commands, state_dir: &Path, board_name: &str) -> Result<()> {
    let store = BoardStore::new(state_dir);

    let output = match cmd {
        Commands::Init { seed, force } => init(&store, board_name, seed.as_deref(), force)?,
        Commands::Show { format } => render(&load(&store, board_name)?, format)?,
        Commands::Move {
            task,
            column,
            index,
        } => move_task(&store, board_name, &task.into(), &column.into(), index)?,
        Commands::Tasks {
            priority,
            column,
            customer,
        } => {
            let mut filter = TaskFilter::new();
            filter.priority = priority;
            if let Some(column) = column {
                filter = filter.with_column(column);
            }
            if let Some(customer) = customer {
                filter = filter.with_customer(customer);
            }
            let manager = BoardManager::new(load(&store, board_name)?);
            render_tasks(&manager.tasks(Some(filter)))
        }
        Commands::Columns => render_columns(&load(&store, board_name)?),
        Commands::Boards => store.list_boards()?.join("\n"),
    };

    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

/// Loads and validates a stored board.
pub fn load(store: &BoardStore, name: &str) -> Result<Board> {
    let snapshot = store
        .load_board_optional(name)?
        .ok_or_else(|| CommandError::BoardNotFound(name.to_string()))?;
    Ok(Board::from_snapshot(snapshot)?)
}

/// Creates a board from a seed file or the built-in seed.
pub fn init(
    store: &BoardStore,
    name: &str,
    seed_file: Option<&Path>,
    force: bool,
) -> Result<String> {
    if store.exists(name) && !force {
        return Err(CommandError::AlreadyExists(name.to_string()));
    }

    let board = match seed_file {
        Some(path) => Board::from_snapshot(seed::load_seed_file(path)?)?,
        None => seed::default_board()?,
    };

    store.save_board(name, &board.to_snapshot())?;
    info!(board = name, tasks = board.task_count(), "Initialized board");

    Ok(format!(
        "Initialized board '{}' with {} column(s) and {} task(s)",
        name,
        board.columns().len(),
        board.task_count()
    ))
}

/// Moves a task and saves the result.
///
/// Staff notification runs on a background worker; it is drained before
/// this returns.
pub fn move_task(
    store: &BoardStore,
    name: &str,
    task_id: &TaskId,
    column: &ColumnId,
    index: Option<usize>,
) -> Result<String> {
    let board = load(store, name)?;
    let manager = BoardManager::with_background_notifier(
        board,
        Arc::new(LogNotifier),
        Arc::new(LogErrorSink),
    )?;

    let before = manager.snapshot();
    let after = manager
        .move_task_to(task_id, column, index)
        .map_err(|e| {
            warn!(task_id = %task_id, column = %column, error = %e, "Move rejected");
            e
        })?;

    if Arc::ptr_eq(&before, &after) {
        return Ok(format!("{} is already at that position", task_id));
    }

    store.save_board(name, &after.to_snapshot())?;

    let (column, position) = after
        .locate(task_id)
        .ok_or_else(|| BoardError::TaskNotFound(task_id.clone()))?;
    let title = after
        .column(&column)
        .map(|c| c.title.as_str())
        .unwrap_or(column.as_str());
    Ok(format!("Moved {} to {} at position {}", task_id, title, position))
}

/// Renders the board in the requested format.
pub fn render(board: &Board, format: OutputFormat) -> Result<String> {
    let out = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&board.to_snapshot())?,
        OutputFormat::Brief => board
            .columns()
            .iter()
            .map(|c| format!("{}: {}", c.id, c.len()))
            .collect::<Vec<_>>()
            .join(", "),
        OutputFormat::Table => {
            let mut out = String::new();
            for column in board.columns() {
                let _ = writeln!(out, "{} ({}) [{}]", column.title, column.id, column.len());
                if column.is_empty() {
                    let _ = writeln!(out, "  (empty)");
                }
                for (pos, task) in column.tasks.iter().enumerate() {
                    let _ = writeln!(out, "  {}. {}", pos, task_line(task));
                }
            }
            out.trim_end().to_string()
        }
    };
    Ok(out)
}

fn task_line(task: &Task) -> String {
    let mut line = format!(
        "{:<12} {:<6} {}  {}: {}",
        task.id.as_str(),
        task.priority.as_str(),
        task.date,
        task.customer,
        task.title
    );
    if !task.package.is_empty() {
        let _ = write!(line, " ({})", task.package);
    }
    line
}

fn render_tasks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No matching tasks".to_string();
    }
    tasks
        .iter()
        .map(|t| format!("[{}] {}", t.status, task_line(t)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_columns(board: &Board) -> String {
    board
        .columns()
        .iter()
        .map(|c| format!("{:<12} {}", c.id.as_str(), c.title))
        .collect::<Vec<_>>()
        .join("\n")
}
