//! Simulated metadata resolution.
//!
//! Validation and sentinel checks run synchronously; any other identifier
//! resolves after a fixed delay that can be cut short by a cancel token.

mod sentinel;
mod synth;

pub use sentinel::{sentinel_failure, NOT_FOUND_ID, PRIVATE_ID, TOO_LONG_ID};
pub use synth::synthesize;

use std::time::Duration;

use crate::control::CancelToken;
use crate::error::DownloaderError;
use crate::url_model::{self, VideoId};
use crate::video::VideoInfo;

/// Default simulated lookup latency.
pub const DEFAULT_RESOLVE_DELAY: Duration = Duration::from_millis(2000);

/// Resolver state as seen by the session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResolverState {
    #[default]
    Idle,
    Validating,
    Resolving,
    Failed(DownloaderError),
    Ready(VideoInfo),
}

impl ResolverState {
    /// True while a `process` call is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self, ResolverState::Validating | ResolverState::Resolving)
    }

    pub fn ready_video(&self) -> Option<&VideoInfo> {
        match self {
            ResolverState::Ready(info) => Some(info),
            _ => None,
        }
    }
}

/// Fake metadata lookup with a fixed latency.
#[derive(Debug, Clone)]
pub struct MetadataResolver {
    delay: Duration,
}

impl Default for MetadataResolver {
    fn default() -> Self {
        Self::new(DEFAULT_RESOLVE_DELAY)
    }
}

impl MetadataResolver {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Validation plus sentinel checks. No timer is involved.
    pub fn check(&self, raw_url: &str) -> Result<VideoId, DownloaderError> {
        let id = url_model::validate(raw_url)?;
        if let Some(err) = sentinel_failure(&id) {
            tracing::debug!(video_id = %id, "sentinel identifier: {}", err);
            return Err(err);
        }
        Ok(id)
    }

    /// Waits out the simulated latency, then synthesizes metadata.
    /// Returns `Cancelled` if `cancel` fires first.
    pub async fn resolve(
        &self,
        id: &VideoId,
        cancel: &CancelToken,
    ) -> Result<VideoInfo, DownloaderError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(DownloaderError::Cancelled),
            _ = tokio::time::sleep(self.delay) => synthesize(id),
        }
    }
}
