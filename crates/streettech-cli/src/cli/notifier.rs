//! Notifications on the console.

use streettech_core::notify::{Notification, Notifier, Severity};

/// Prints informational notifications to stderr. Destructive ones are only
/// logged, since the failing command reports the same text as its error.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, n: Notification) {
        match n.severity {
            Severity::Default => eprintln!("{}: {}", n.title, n.description),
            Severity::Destructive => tracing::warn!(title = %n.title, "{}", n.description),
        }
    }
}
