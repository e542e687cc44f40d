//! Assignment notifications.
//!
//! When a booking lands in a new column the manager hands an [`Assignment`]
//! to an [`AssignmentNotifier`]. Delivery is best effort: a failed
//! notification is passed to an [`ErrorSink`] and never undoes the move.
//!
//! Wrap a slow notifier in [`BackgroundNotifier`] so the caller of a move
//! only pays for a channel send.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use bookboard_models::{ColumnId, Task, TaskId};
use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Payload sent when a task changes column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub task_id: TaskId,
    pub title: String,
    pub customer: String,
    pub date: NaiveDate,
    /// Column the task moved into.
    pub column: ColumnId,
    /// Display label of that column.
    pub column_title: String,
}

impl Assignment {
    /// Builds the payload from a task that already carries its new status.
    pub fn new(task: &Task, column_title: impl Into<String>) -> Self {
        Self {
            task_id: task.id.clone(),
            title: task.title.clone(),
            customer: task.customer.clone(),
            date: task.date,
            column: task.status.clone(),
            column_title: column_title.into(),
        }
    }

    /// Human-readable message for staff.
    pub fn message(&self) -> String {
        format!(
            "\"{}\" for {} on {} moved to {}",
            self.title,
            self.customer,
            self.date.format("%Y-%m-%d"),
            self.column_title
        )
    }
}

/// Errors a notifier can report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// The delivery channel refused the notification.
    #[error("notification rejected: {0}")]
    Rejected(String),

    /// The receiving side has gone away.
    #[error("notification channel disconnected")]
    Disconnected,

    /// The notifier panicked while delivering.
    #[error("notifier panicked: {0}")]
    Panicked(String),
}

/// Delivers assignment notifications to staff.
pub trait AssignmentNotifier: Send + Sync {
    fn notify(&self, assignment: &Assignment) -> Result<(), NotifyError>;
}

/// Receives notification failures.
pub trait ErrorSink: Send + Sync {
    fn report(&self, assignment: &Assignment, error: &NotifyError);
}

/// Hands one assignment to `notifier`, passing any failure to `sink`.
///
/// A panicking notifier is caught and reported as [`NotifyError::Panicked`].
pub fn deliver(notifier: &dyn AssignmentNotifier, sink: &dyn ErrorSink, assignment: &Assignment) {
    let result = panic::catch_unwind(AssertUnwindSafe(|| notifier.notify(assignment)))
        .unwrap_or_else(|payload| Err(NotifyError::Panicked(panic_message(payload.as_ref()))));

    if let Err(e) = result {
        sink.report(assignment, &e);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Discards every assignment.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl AssignmentNotifier for NoopNotifier {
    fn notify(&self, _assignment: &Assignment) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Writes assignments to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl AssignmentNotifier for LogNotifier {
    fn notify(&self, assignment: &Assignment) -> Result<(), NotifyError> {
        info!(
            task_id = %assignment.task_id,
            column = %assignment.column,
            "{}",
            assignment.message()
        );
        Ok(())
    }
}

/// Logs notification failures as warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogErrorSink;

impl ErrorSink for LogErrorSink {
    fn report(&self, assignment: &Assignment, error: &NotifyError) {
        warn!(
            task_id = %assignment.task_id,
            column = %assignment.column,
            error = %error,
            "Failed to deliver assignment notification"
        );
    }
}

/// Forwards assignments to an `mpsc` receiver.
pub struct ChannelNotifier {
    sender: Mutex<Sender<Assignment>>,
}

impl ChannelNotifier {
    /// Creates a notifier and the receiver its assignments arrive on.
    pub fn new() -> (Self, Receiver<Assignment>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                sender: Mutex::new(tx),
            },
            rx,
        )
    }
}

impl AssignmentNotifier for ChannelNotifier {
    fn notify(&self, assignment: &Assignment) -> Result<(), NotifyError> {
        let sender = self
            .sender
            .lock()
            .map_err(|e| NotifyError::Rejected(e.to_string()))?;
        sender
            .send(assignment.clone())
            .map_err(|_| NotifyError::Disconnected)
    }
}

/// Runs another notifier on a dedicated worker thread.
///
/// `notify` only queues the assignment. Failures of the wrapped notifier
/// are reported to the sink from the worker thread. Dropping the notifier
/// (or calling [`shutdown`](Self::shutdown)) drains the queue and joins
/// the worker.
pub struct BackgroundNotifier {
    sender: Mutex<Option<Sender<Assignment>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl BackgroundNotifier {
    /// Starts the worker thread.
    pub fn spawn(
        inner: Arc<dyn AssignmentNotifier>,
        sink: Arc<dyn ErrorSink>,
    ) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel::<Assignment>();

        let worker = thread::Builder::new()
            .name("bookboard-notify".to_string())
            .spawn(move || {
                for assignment in rx {
                    deliver(inner.as_ref(), sink.as_ref(), &assignment);
                }
                debug!("Notification worker stopped");
            })?;

        Ok(Self {
            sender: Mutex::new(Some(tx)),
            worker: Mutex::new(Some(worker)),
        })
    }

    /// Stops accepting assignments and waits for queued ones to be delivered.
    pub fn shutdown(&self) {
        if let Ok(mut sender) = self.sender.lock() {
            sender.take();
        }
        let worker = self.worker.lock().ok().and_then(|mut w| w.take());
        if let Some(handle) = worker {
            if handle.join().is_err() {
                warn!("Notification worker panicked");
            }
        }
    }
}

impl AssignmentNotifier for BackgroundNotifier {
    fn notify(&self, assignment: &Assignment) -> Result<(), NotifyError> {
        let sender = self
            .sender
            .lock()
            .map_err(|e| NotifyError::Rejected(e.to_string()))?;
        match sender.as_ref() {
            Some(tx) => tx
                .send(assignment.clone())
                .map_err(|_| NotifyError::Disconnected),
            None => Err(NotifyError::Disconnected),
        }
    }
}

impl Drop for BackgroundNotifier {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment() -> Assignment {
        let date = NaiveDate::from_ymd_opt(2025, 9, 6).unwrap();
        let task = Task::builder("Harbor wedding", "Noor Aziz", date, "shooting")
            .id("b-9")
            .build();
        Assignment::new(&task, "Shooting")
    }

    struct Failing;

    impl AssignmentNotifier for Failing {
        fn notify(&self, _assignment: &Assignment) -> Result<(), NotifyError> {
            Err(NotifyError::Rejected("gateway down".to_string()))
        }
    }

    struct Panicking;

    impl AssignmentNotifier for Panicking {
        fn notify(&self, assignment: &Assignment) -> Result<(), NotifyError> {
            if assignment.task_id.as_str() == "b-9" {
                panic!("sms client crashed");
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct Recording(Mutex<Vec<(TaskId, NotifyError)>>);

    impl ErrorSink for Recording {
        fn report(&self, assignment: &Assignment, error: &NotifyError) {
            self.0
                .lock()
                .unwrap()
                .push((assignment.task_id.clone(), error.clone()));
        }
    }

    #[test]
    fn test_assignment_from_task() {
        let a = assignment();
        assert_eq!(a.task_id.as_str(), "b-9");
        assert_eq!(a.column.as_str(), "shooting");
        assert_eq!(a.message(), "\"Harbor wedding\" for Noor Aziz on 2025-09-06 moved to Shooting");
    }

    #[test]
    fn test_channel_notifier_delivers() {
        let (notifier, rx) = ChannelNotifier::new();
        notifier.notify(&assignment()).unwrap();
        assert_eq!(rx.recv().unwrap(), assignment());
    }

    #[test]
    fn test_channel_notifier_disconnected() {
        let (notifier, rx) = ChannelNotifier::new();
        drop(rx);
        assert_eq!(notifier.notify(&assignment()), Err(NotifyError::Disconnected));
    }

    #[test]
    fn test_background_notifier_delivers_in_order() {
        let (channel, rx) = ChannelNotifier::new();
        let background =
            BackgroundNotifier::spawn(Arc::new(channel), Arc::new(LogErrorSink)).unwrap();

        let first = assignment();
        let mut second = assignment();
        second.task_id = "b-10".into();

        background.notify(&first).unwrap();
        background.notify(&second).unwrap();
        background.shutdown();

        let received: Vec<_> = rx.iter().collect();
        assert_eq!(received, vec![first, second]);
    }

    #[test]
    fn test_background_notifier_reports_failures() {
        let sink = Arc::new(Recording::default());
        let background = BackgroundNotifier::spawn(Arc::new(Failing), sink.clone()).unwrap();

        background.notify(&assignment()).unwrap();
        background.shutdown();

        let reports = sink.0.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].0.as_str(), "b-9");
    }

    #[test]
    fn test_background_notifier_after_shutdown() {
        let background =
            BackgroundNotifier::spawn(Arc::new(NoopNotifier), Arc::new(LogErrorSink)).unwrap();
        background.shutdown();
        assert_eq!(background.notify(&assignment()), Err(NotifyError::Disconnected));
    }

    #[test]
    fn test_deliver_reports_panic() {
        let sink = Recording::default();

        deliver(&Panicking, &sink, &assignment());

        let reports = sink.0.lock().unwrap();
        assert_eq!(
            reports[0],
            ("b-9".into(), NotifyError::Panicked("sms client crashed".to_string()))
        );
    }

    #[test]
    fn test_background_worker_survives_panic() {
        let sink = Arc::new(Recording::default());
        let background = BackgroundNotifier::spawn(Arc::new(Panicking), sink.clone()).unwrap();

        let mut next = assignment();
        next.task_id = "b-10".into();

        background.notify(&assignment()).unwrap();
        assert_eq!(background.notify(&next), Ok(()));
        background.shutdown();

        let reports = sink.0.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].0.as_str(), "b-9");
    }
}
