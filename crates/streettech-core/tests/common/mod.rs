//! Shared fixtures: an in-memory session with scripted progress.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use streettech_core::clipboard::MemoryClipboard;
use streettech_core::history::{HistoryStore, MemoryStore};
use streettech_core::notify::RecordingNotifier;
use streettech_core::resolver::{MetadataResolver, DEFAULT_RESOLVE_DELAY};
use streettech_core::session::Session;
use streettech_core::simulator::{
    DownloadSimulator, ScriptedIncrements, DEFAULT_MAX_INCREMENT, DEFAULT_TICK,
};

pub struct Fixture {
    pub session: Arc<Session>,
    pub kv: Arc<MemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub clipboard: Arc<MemoryClipboard>,
}

/// Session over `kv` whose downloads advance by `step` percent per tick.
pub fn fixture_with_store(kv: Arc<MemoryStore>, step: f64) -> Fixture {
    let notifier = Arc::new(RecordingNotifier::new());
    let clipboard = Arc::new(MemoryClipboard::new());
    let history = Arc::new(HistoryStore::load(kv.clone()));
    let simulator = DownloadSimulator::new(
        DEFAULT_TICK,
        DEFAULT_MAX_INCREMENT,
        Arc::new(ScriptedIncrements::constant(step)),
    );
    let session = Session::with_parts(
        MetadataResolver::new(DEFAULT_RESOLVE_DELAY),
        simulator,
        history,
        notifier.clone(),
        clipboard.clone(),
    );
    Fixture {
        session: Arc::new(session),
        kv,
        notifier,
        clipboard,
    }
}

pub fn fixture(step: f64) -> Fixture {
    fixture_with_store(Arc::new(MemoryStore::new()), step)
}

/// Ticks needed to reach 100 with a constant step.
pub fn ticks_for(step: f64) -> u32 {
    (100.0 / step).ceil() as u32
}

pub fn download_time(step: f64) -> Duration {
    DEFAULT_TICK * ticks_for(step)
}
