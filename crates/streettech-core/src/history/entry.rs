//! Record of a completed simulated download.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::quality::Quality;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Completion time in milliseconds since the epoch, made unique per store.
    pub id: String,
    pub url: String,
    pub title: String,
    pub quality: Quality,
    /// RFC 3339 on disk.
    pub timestamp: DateTime<Utc>,
    pub thumbnail: String,
}

impl HistoryEntry {
    /// Numeric form of `id`, if it has one.
    pub fn id_millis(&self) -> Option<i64> {
        self.id.parse().ok()
    }
}
