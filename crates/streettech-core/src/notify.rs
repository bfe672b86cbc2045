//! Transient user-facing notifications.

use std::sync::{Mutex, PoisonError};

use crate::error::DownloaderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Default,
        }
    }

    /// Destructive notification whose description is the error's inline text.
    pub fn from_error(err: &DownloaderError) -> Self {
        Self {
            title: err.title().to_string(),
            description: err.to_string(),
            severity: Severity::Destructive,
        }
    }
}

/// Sink for notifications emitted by a session.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Emits notifications as tracing events.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, n: Notification) {
        match n.severity {
            Severity::Default => tracing::info!(title = %n.title, "{}", n.description),
            Severity::Destructive => tracing::warn!(title = %n.title, "{}", n.description),
        }
    }
}

/// Keeps every notification in memory, for tests and embedding.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}
