//! One downloader session: the UI-facing state plus the wiring between the
//! validator, resolver, simulator and history store.
//!
//! All methods take `&self`; state lives behind a mutex that is never held
//! across an await. A second `process` while one is in flight, or a second
//! `download` while one is running, fails with [`DownloaderError::Busy`].
//! Dropping or disposing the session cancels every pending timer, after which
//! interrupted work neither mutates state nor notifies. Dropping an in-flight
//! `process` or `download` future releases its busy state.

mod guard;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tokio::sync::mpsc;

use crate::clipboard::Clipboard;
use crate::config::StreettechConfig;
use crate::control::{SessionControl, TaskKind};
use crate::error::DownloaderError;
use crate::history::{HistoryEntry, HistoryStore};
use crate::notify::{Notification, Notifier};
use crate::quality::Quality;
use crate::resolver::{MetadataResolver, ResolverState};
use crate::simulator::{
    DownloadSimulator, DownloadState, IncrementSource, Progress, SimulationOutcome,
    SystemIncrements,
};
use crate::video::VideoInfo;

use guard::TaskGuard;

/// Observable state of a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub resolver: ResolverState,
    pub download: DownloadState,
    /// Percent in `[0, 100]` of the current or last download.
    pub progress: f64,
    /// URL the current video was processed from.
    pub url: Option<String>,
    /// Inline message for the URL field.
    pub url_error: Option<String>,
    pub quality: Quality,
}

pub struct Session {
    resolver: MetadataResolver,
    simulator: DownloadSimulator,
    history: Arc<HistoryStore>,
    notifier: Arc<dyn Notifier>,
    clipboard: Arc<dyn Clipboard>,
    control: SessionControl,
    state: Mutex<SessionState>,
}

impl Session {
    /// Session with default timing and OS randomness.
    pub fn new(
        history: Arc<HistoryStore>,
        notifier: Arc<dyn Notifier>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self::with_parts(
            MetadataResolver::default(),
            DownloadSimulator::with_defaults(),
            history,
            notifier,
            clipboard,
        )
    }

    pub fn from_config(
        cfg: &StreettechConfig,
        history: Arc<HistoryStore>,
        notifier: Arc<dyn Notifier>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        let source: Arc<dyn IncrementSource> = Arc::new(SystemIncrements::new());
        let mut session = Self::with_parts(
            MetadataResolver::new(cfg.resolve_delay()),
            DownloadSimulator::new(cfg.tick_interval(), cfg.max_increment, source),
            history,
            notifier,
            clipboard,
        );
        session.state.get_mut().unwrap_or_else(PoisonError::into_inner).quality =
            cfg.default_quality;
        session
    }

    pub fn with_parts(
        resolver: MetadataResolver,
        simulator: DownloadSimulator,
        history: Arc<HistoryStore>,
        notifier: Arc<dyn Notifier>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self {
            resolver,
            simulator,
            history,
            notifier,
            clipboard,
            control: SessionControl::new(),
            state: Mutex::new(SessionState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.state().clone()
    }

    pub fn current_video(&self) -> Option<VideoInfo> {
        self.state().resolver.ready_video().cloned()
    }

    pub fn history(&self) -> &Arc<HistoryStore> {
        &self.history
    }

    pub fn quality(&self) -> Quality {
        self.state().quality
    }

    /// Quality used by the next download. A running download keeps its own.
    pub fn select_quality(&self, quality: Quality) {
        self.state().quality = quality;
        tracing::debug!(%quality, "quality selected");
    }

    fn fail(&self, err: DownloaderError) -> DownloaderError {
        {
            let mut st = self.state();
            st.resolver = ResolverState::Failed(err.clone());
            st.url_error = Some(err.to_string());
        }
        tracing::info!("processing failed: {}", err);
        self.notifier.notify(Notification::from_error(&err));
        err
    }

    /// Validates `raw_url` and resolves its metadata, replacing the current video.
    pub async fn process(&self, raw_url: &str) -> Result<VideoInfo, DownloaderError> {
        if self.control.is_disposed() {
            return Err(DownloaderError::Cancelled);
        }
        {
            let mut st = self.state();
            if st.resolver.is_busy() || st.download == DownloadState::Downloading {
                tracing::debug!("process rejected: session busy");
                return Err(DownloaderError::Busy);
            }
            st.resolver = ResolverState::Validating;
            st.url = None;
            st.url_error = None;
            st.download = DownloadState::Idle;
            st.progress = 0.0;
        }

        let id = self.resolver.check(raw_url).map_err(|e| self.fail(e))?;

        let mut guard = TaskGuard::register(self, TaskKind::Resolve);
        self.state().resolver = ResolverState::Resolving;
        tracing::debug!(video_id = %id, delay_ms = self.resolver.delay().as_millis() as u64, "resolving");
        let result = self.resolver.resolve(&id, guard.token()).await;
        guard.finish();
        drop(guard);

        match result {
            Ok(info) => {
                {
                    let mut st = self.state();
                    st.resolver = ResolverState::Ready(info.clone());
                    st.url = Some(raw_url.to_string());
                    st.url_error = None;
                }
                tracing::info!(video_id = %info.id, "video ready");
                self.notifier.notify(Notification::info(
                    "Success!",
                    "Video information loaded. Start the download to continue.",
                ));
                Ok(info)
            }
            Err(DownloaderError::Cancelled) => {
                if !self.control.is_disposed() {
                    self.state().resolver = ResolverState::Idle;
                }
                Err(DownloaderError::Cancelled)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Simulates downloading the current video in the selected quality.
    ///
    /// Returns `Ok(None)` without side effects when no video is ready. On
    /// completion the new history entry is returned. Each tick's progress is
    /// also offered to `progress_tx`, dropping values if it is full.
    pub async fn download(
        &self,
        progress_tx: Option<mpsc::Sender<Progress>>,
    ) -> Result<Option<HistoryEntry>, DownloaderError> {
        if self.control.is_disposed() {
            return Err(DownloaderError::Cancelled);
        }
        let (video, url, quality) = {
            let mut st = self.state();
            if st.download == DownloadState::Downloading {
                tracing::debug!("download rejected: already downloading");
                return Err(DownloaderError::Busy);
            }
            let Some(video) = st.resolver.ready_video().cloned() else {
                tracing::debug!("download ignored: no video ready");
                return Ok(None);
            };
            st.download = DownloadState::Downloading;
            st.progress = 0.0;
            (video, st.url.clone().unwrap_or_default(), st.quality)
        };

        tracing::info!(video_id = %video.id, %quality, "download started");
        self.notifier.notify(Notification::info(
            "Download started",
            format!("Downloading in {} quality.", quality),
        ));

        let mut guard = TaskGuard::register(self, TaskKind::Download);
        let outcome = self
            .simulator
            .run(guard.token(), |p| {
                self.state().progress = p.value();
                if let Some(tx) = &progress_tx {
                    let _ = tx.try_send(p);
                }
            })
            .await;
        guard.finish();
        drop(guard);

        match outcome {
            SimulationOutcome::Completed { ticks } => {
                let (entry, persisted) = self.history.record(&url, &video, quality, Utc::now());
                if let Err(e) = persisted {
                    tracing::warn!("durable history update failed: {:#}", e);
                }
                {
                    let mut st = self.state();
                    st.download = DownloadState::Completed;
                    st.progress = 100.0;
                }
                tracing::info!(video_id = %video.id, ticks, "download completed");
                self.notifier.notify(Notification::info(
                    "Download complete",
                    format!("{} downloaded in {} quality.", video.title, quality),
                ));
                Ok(Some(entry))
            }
            SimulationOutcome::Cancelled { progress } => {
                if !self.control.is_disposed() {
                    {
                        let mut st = self.state();
                        st.download = DownloadState::Cancelled;
                        st.progress = 0.0;
                    }
                    tracing::info!(discarded = progress, "download cancelled");
                    self.notifier.notify(Notification::info(
                        "Download cancelled",
                        "The download was stopped. Nothing was saved.",
                    ));
                }
                Err(DownloaderError::Cancelled)
            }
        }
    }

    /// Stops a running download. Returns false if none was running.
    pub fn cancel_download(&self) -> bool {
        self.control.request_cancel(TaskKind::Download)
    }

    /// Empties the history, in memory and on disk.
    pub fn clear_history(&self) -> anyhow::Result<()> {
        self.history.clear()?;
        self.notifier.notify(Notification::info(
            "History cleared",
            "All download history was removed.",
        ));
        Ok(())
    }

    /// Copies the URL of `entry` to the clipboard.
    pub fn copy_url(&self, entry: &HistoryEntry) -> anyhow::Result<()> {
        self.clipboard.write_text(&entry.url)?;
        self.notifier.notify(Notification::info(
            "URL copied",
            "The video URL was copied to the clipboard.",
        ));
        Ok(())
    }

    /// Cancels all pending timers. Later operations fail with `Cancelled`.
    pub fn dispose(&self) {
        if !self.control.is_disposed() {
            tracing::debug!("session disposed");
        }
        self.control.dispose();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.control.dispose();
    }
}
