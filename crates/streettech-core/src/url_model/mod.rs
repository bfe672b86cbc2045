//! URL validation and video identifier extraction.
//!
//! Accepts `youtube.com/watch?v=`, `youtu.be/` and `youtube.com/embed/` URLs,
//! optionally prefixed with a scheme and `www.`, and pulls out the identifier
//! token that follows.

mod identifier;
mod prefix;

pub use identifier::leading_token;
pub use prefix::{strip_video_prefix, VIDEO_PREFIXES};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DownloaderError;

/// Video identifier extracted from a URL. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// True if `raw` has one of the accepted YouTube URL shapes.
pub fn is_youtube_url(raw: &str) -> bool {
    strip_video_prefix(raw).is_some()
}

/// Extracts the identifier if `raw` is an accepted URL with a non-empty token.
pub fn extract_video_id(raw: &str) -> Option<VideoId> {
    strip_video_prefix(raw)
        .and_then(leading_token)
        .map(|t| VideoId(t.to_string()))
}

/// Validates `raw` and returns its identifier.
///
/// # Examples
///
/// - `validate("https://www.youtube.com/watch?v=abc123&t=10")` → `abc123`
/// - `validate("")` → `Err(MissingUrl)`
/// - `validate("https://youtu.be/")` → `Err(MissingIdentifier)`
pub fn validate(raw: &str) -> Result<VideoId, DownloaderError> {
    if raw.is_empty() {
        return Err(DownloaderError::MissingUrl);
    }
    let rest = strip_video_prefix(raw).ok_or(DownloaderError::InvalidUrlFormat)?;
    let token = leading_token(rest).ok_or(DownloaderError::MissingIdentifier)?;
    Ok(VideoId(token.to_string()))
}
