//! Metadata record for the currently processed video.

use serde::{Deserialize, Serialize};

use crate::quality::Quality;
use crate::url_model::VideoId;

/// Metadata shown once a URL has been processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    pub id: VideoId,
    pub title: String,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<String>,
    pub thumbnail: String,
    pub available_qualities: Vec<Quality>,
}

/// Canonical thumbnail URL for an identifier.
pub fn thumbnail_url(id: &VideoId) -> String {
    format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", id)
}
