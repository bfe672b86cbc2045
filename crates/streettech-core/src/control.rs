//! Cancellation for scheduled work: shared tokens and a per-session registry.
//!
//! Each timer-driven task (the resolver delay, the download ticker) is
//! registered with a token. Cancelling a token wakes the task at its next
//! suspension point; disposing the registry cancels every token, including
//! ones registered afterwards.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::Notify;

#[derive(Debug, Default)]
struct TokenInner {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Cloneable cancellation flag that async code can wait on.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<TokenInner>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Resolves once [`cancel`](Self::cancel) has been called.
    pub async fn cancelled(&self) {
        loop {
            // Register before checking the flag so a concurrent cancel is not missed.
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// Kinds of scheduled work a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Resolve,
    Download,
}

#[derive(Debug, Default)]
struct Registry {
    tokens: HashMap<TaskKind, CancelToken>,
    disposed: bool,
}

/// Registry of task kind -> cancel token for one session.
#[derive(Debug, Default)]
pub struct SessionControl {
    registry: Mutex<Registry>,
}

impl SessionControl {
    pub fn new() -> Self {
        Self::default()
    }

    fn registry(&self) -> std::sync::MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a task; returns the token it must race its waits against.
    /// After [`dispose`](Self::dispose) the returned token is already cancelled.
    pub fn register(&self, kind: TaskKind) -> CancelToken {
        let token = CancelToken::new();
        let mut reg = self.registry();
        if reg.disposed {
            token.cancel();
        }
        reg.tokens.insert(kind, token.clone());
        token
    }

    /// Unregister a task (call when it finishes, success or failure).
    pub fn unregister(&self, kind: TaskKind) {
        self.registry().tokens.remove(&kind);
    }

    /// Cancel one running task. Returns false if none was registered.
    pub fn request_cancel(&self, kind: TaskKind) -> bool {
        match self.registry().tokens.get(&kind) {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Cancel every task and refuse new ones.
    pub fn dispose(&self) {
        let mut reg = self.registry();
        reg.disposed = true;
        for token in reg.tokens.values() {
            token.cancel();
        }
        reg.tokens.clear();
    }

    pub fn is_disposed(&self) -> bool {
        self.registry().disposed
    }
}
