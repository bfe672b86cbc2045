//! RAII guard that releases a session task when its future is dropped.

use crate::control::{CancelToken, TaskKind};
use crate::resolver::ResolverState;
use crate::simulator::DownloadState;

use super::Session;

/// Registers a task on creation and unregisters it when dropped. If the
/// owning future is dropped before [`finish`](Self::finish), the busy state it
/// set is rolled back so the session accepts new requests.
pub(super) struct TaskGuard<'a> {
    session: &'a Session,
    kind: TaskKind,
    token: CancelToken,
    finished: bool,
}

impl<'a> TaskGuard<'a> {
    pub(super) fn register(session: &'a Session, kind: TaskKind) -> Self {
        let token = session.control.register(kind);
        Self {
            session,
            kind,
            token,
            finished: false,
        }
    }

    pub(super) fn token(&self) -> &CancelToken {
        &self.token
    }

    /// Marks the task as having reached its own end; drop only unregisters.
    pub(super) fn finish(&mut self) {
        self.finished = true;
    }
}

impl Drop for TaskGuard<'_> {
    fn drop(&mut self) {
        self.session.control.unregister(self.kind);
        if self.finished || self.session.control.is_disposed() {
            return;
        }
        let mut st = self.session.state();
        match self.kind {
            TaskKind::Resolve => {
                if st.resolver.is_busy() {
                    st.resolver = ResolverState::Idle;
                }
            }
            TaskKind::Download => {
                if st.download == DownloadState::Downloading {
                    st.download = DownloadState::Cancelled;
                    st.progress = 0.0;
                }
            }
        }
        tracing::debug!(kind = ?self.kind, "task dropped before finishing; state released");
    }
}
