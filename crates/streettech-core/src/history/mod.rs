//! Download history: newest first, capped, persisted as one JSON value.
//!
//! The store is built once per session from a [`KeyValueStore`] and shared by
//! reference. Every mutation writes the whole collection back under
//! [`HISTORY_KEY`].

mod entry;
mod storage;

pub use entry::HistoryEntry;
pub use storage::{DirStore, KeyValueStore, MemoryStore};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::quality::Quality;
use crate::video::VideoInfo;

/// Storage key of the persisted collection.
pub const HISTORY_KEY: &str = "streettech-download-history";
/// Maximum number of retained entries.
pub const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Default)]
struct Inner {
    entries: Vec<HistoryEntry>,
    /// Highest id handed out, so ids stay unique within a millisecond.
    last_id: i64,
}

pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
    inner: Mutex<Inner>,
}

/// Decodes a persisted collection. `None` if `raw` is not a JSON array of entries.
pub fn decode_history(raw: &str) -> Option<Vec<HistoryEntry>> {
    serde_json::from_str(raw).ok()
}

impl HistoryStore {
    /// Restores the persisted collection. Absent, unreadable or malformed data
    /// yields an empty history; the latter two are logged.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let entries = match store.get(HISTORY_KEY) {
            Ok(Some(raw)) => match decode_history(&raw) {
                Some(mut entries) => {
                    entries.truncate(HISTORY_LIMIT);
                    entries
                }
                None => {
                    tracing::warn!(key = HISTORY_KEY, "stored history is malformed; starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(key = HISTORY_KEY, "could not read stored history: {:#}", e);
                Vec::new()
            }
        };
        let last_id = entries
            .iter()
            .filter_map(HistoryEntry::id_millis)
            .max()
            .unwrap_or(0);
        tracing::debug!(count = entries.len(), "history loaded");
        Self {
            store,
            inner: Mutex::new(Inner { entries, last_id }),
        }
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the collection, newest first.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.inner().entries.clone()
    }

    pub fn first(&self) -> Option<HistoryEntry> {
        self.inner().entries.first().cloned()
    }

    pub fn get(&self, index: usize) -> Option<HistoryEntry> {
        self.inner().entries.get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner().entries.is_empty()
    }

    /// Prepends `entry`, drops anything past the limit and persists.
    /// The in-memory collection is updated even if the write fails.
    pub fn append(&self, entry: HistoryEntry) -> Result<()> {
        let json = {
            let mut inner = self.inner();
            if let Some(id) = entry.id_millis() {
                inner.last_id = inner.last_id.max(id);
            }
            inner.entries.insert(0, entry);
            inner.entries.truncate(HISTORY_LIMIT);
            serde_json::to_string(&inner.entries).context("serialize history")?
        };
        self.store
            .set(HISTORY_KEY, &json)
            .context("persist history")
    }

    /// Builds an entry for a finished download at time `at` and appends it.
    pub fn record(
        &self,
        url: &str,
        video: &VideoInfo,
        quality: Quality,
        at: DateTime<Utc>,
    ) -> (HistoryEntry, Result<()>) {
        let entry = HistoryEntry {
            id: self.next_id(at).to_string(),
            url: url.to_string(),
            title: video.title.clone(),
            quality,
            timestamp: at,
            thumbnail: video.thumbnail.clone(),
        };
        let persisted = self.append(entry.clone());
        (entry, persisted)
    }

    fn next_id(&self, at: DateTime<Utc>) -> i64 {
        let mut inner = self.inner();
        let id = at.timestamp_millis().max(inner.last_id + 1);
        inner.last_id = id;
        id
    }

    /// Empties the collection and removes the persisted key.
    pub fn clear(&self) -> Result<()> {
        self.inner().entries.clear();
        self.store.remove(HISTORY_KEY).context("remove stored history")
    }
}
