//! Errors reported for a processing or download attempt.
//!
//! Every variant is terminal for the current attempt and never fatal to the
//! session. The `Display` text is what the URL field shows inline and what the
//! notification carries as its description.

/// Failure of a single `process` or `download` attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DownloaderError {
    #[error("Please enter a YouTube URL.")]
    MissingUrl,
    #[error("Please enter a valid YouTube URL.")]
    InvalidUrlFormat,
    #[error("The URL does not contain a video identifier.")]
    MissingIdentifier,
    #[error("Video not found. Check the URL and try again.")]
    VideoNotFound,
    #[error("This video is private and cannot be downloaded.")]
    VideoPrivate,
    #[error("This video is too long to be downloaded.")]
    VideoTooLong,
    #[error("Could not process the video. Please try again.")]
    ResolutionFailed,
    /// A request of the same kind is still in flight.
    #[error("A request is already in progress. Wait for it to finish.")]
    Busy,
    /// The work was cancelled or the session was disposed.
    #[error("The operation was cancelled.")]
    Cancelled,
}

impl DownloaderError {
    /// Short heading used for the notification.
    pub fn title(&self) -> &'static str {
        match self {
            DownloaderError::MissingUrl => "URL required",
            DownloaderError::InvalidUrlFormat | DownloaderError::MissingIdentifier => "Invalid URL",
            DownloaderError::VideoNotFound => "Video not found",
            DownloaderError::VideoPrivate => "Private video",
            DownloaderError::VideoTooLong => "Video too long",
            DownloaderError::ResolutionFailed => "Error",
            DownloaderError::Busy => "Busy",
            DownloaderError::Cancelled => "Cancelled",
        }
    }

    /// True for failures caught before any delay-based state is entered.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DownloaderError::MissingUrl
                | DownloaderError::InvalidUrlFormat
                | DownloaderError::MissingIdentifier
        )
    }
}
