//! Identifiers that fail deterministically, standing in for backend checks.

use crate::error::DownloaderError;
use crate::url_model::VideoId;

pub const NOT_FOUND_ID: &str = "fake-error";
pub const PRIVATE_ID: &str = "private-video";
pub const TOO_LONG_ID: &str = "long-video";

/// Returns the canned failure for a sentinel identifier, if `id` is one.
pub fn sentinel_failure(id: &VideoId) -> Option<DownloaderError> {
    match id.as_str() {
        NOT_FOUND_ID => Some(DownloaderError::VideoNotFound),
        PRIVATE_ID => Some(DownloaderError::VideoPrivate),
        TOO_LONG_ID => Some(DownloaderError::VideoTooLong),
        _ => None,
    }
}
