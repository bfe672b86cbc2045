//! Session flow tests: process, download, history and teardown on a paused clock.

mod common;

use std::sync::Arc;

use streettech_core::error::DownloaderError;
use streettech_core::history::{decode_history, KeyValueStore, MemoryStore, HISTORY_KEY, HISTORY_LIMIT};
use streettech_core::notify::Severity;
use streettech_core::quality::Quality;
use streettech_core::resolver::{ResolverState, DEFAULT_RESOLVE_DELAY};
use streettech_core::simulator::DownloadState;
use tokio::time::Instant;

use common::{download_time, fixture, fixture_with_store};

#[tokio::test(start_paused = true)]
async fn process_resolves_after_delay() {
    let f = fixture(9.0);
    let start = Instant::now();
    let info = f
        .session
        .process("https://www.youtube.com/watch?v=abc123&t=10")
        .await
        .unwrap();
    assert!(start.elapsed() >= DEFAULT_RESOLVE_DELAY);
    assert_eq!(info.id.as_str(), "abc123");
    assert_eq!(info.thumbnail, "https://img.youtube.com/vi/abc123/maxresdefault.jpg");

    let st = f.session.snapshot();
    assert_eq!(st.resolver, ResolverState::Ready(info.clone()));
    assert_eq!(st.url_error, None);
    assert_eq!(f.session.current_video(), Some(info));
    let n = f.notifier.last().unwrap();
    assert_eq!(n.severity, Severity::Default);
    assert_eq!(n.title, "Success!");
}

#[tokio::test(start_paused = true)]
async fn empty_url_fails_inline_and_notifies_same_text() {
    let f = fixture(9.0);
    let err = f.session.process("").await.unwrap_err();
    assert_eq!(err, DownloaderError::MissingUrl);
    let st = f.session.snapshot();
    assert_eq!(st.resolver, ResolverState::Failed(DownloaderError::MissingUrl));
    let n = f.notifier.last().unwrap();
    assert_eq!(n.severity, Severity::Destructive);
    assert_eq!(Some(n.description), st.url_error);
}

#[tokio::test(start_paused = true)]
async fn sentinels_fail_without_delay() {
    let f = fixture(9.0);
    for (url, expected) in [
        ("https://youtu.be/fake-error", DownloaderError::VideoNotFound),
        ("https://youtu.be/private-video", DownloaderError::VideoPrivate),
        ("https://www.youtube.com/watch?v=long-video", DownloaderError::VideoTooLong),
    ] {
        let start = Instant::now();
        let err = f.session.process(url).await.unwrap_err();
        assert_eq!(err, expected);
        assert_eq!(start.elapsed(), std::time::Duration::ZERO);
        assert_eq!(f.session.snapshot().resolver, ResolverState::Failed(expected));
    }
    assert_eq!(f.notifier.notifications().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn new_request_replaces_current_video() {
    let f = fixture(9.0);
    f.session.process("youtu.be/first").await.unwrap();
    assert!(f.session.current_video().is_some());
    let _ = f.session.process("not a url").await;
    assert_eq!(f.session.current_video(), None);
    let second = f.session.process("youtu.be/second").await.unwrap();
    assert_eq!(f.session.current_video(), Some(second));
}

#[tokio::test(start_paused = true)]
async fn concurrent_process_is_busy() {
    let f = fixture(9.0);
    let first = {
        let session = Arc::clone(&f.session);
        tokio::spawn(async move { session.process("youtu.be/one").await })
    };
    tokio::task::yield_now().await;
    assert_eq!(f.session.snapshot().resolver, ResolverState::Resolving);
    assert_eq!(
        f.session.process("youtu.be/two").await,
        Err(DownloaderError::Busy)
    );
    let info = first.await.unwrap().unwrap();
    assert_eq!(info.id.as_str(), "one");
}

#[tokio::test(start_paused = true)]
async fn download_without_ready_video_is_noop() {
    let f = fixture(9.0);
    assert_eq!(f.session.download(None).await, Ok(None));
    assert_eq!(f.session.snapshot().download, DownloadState::Idle);
    assert!(f.notifier.notifications().is_empty());
    assert!(f.session.history().is_empty());
}

#[tokio::test(start_paused = true)]
async fn download_completes_and_records_history() {
    let f = fixture(9.0);
    let url = "https://youtu.be/abc123";
    let info = f.session.process(url).await.unwrap();
    f.session.select_quality(Quality::Hd720);

    let (tx, mut rx) = tokio::sync::mpsc::channel(64);
    let start = Instant::now();
    let entry = f.session.download(Some(tx)).await.unwrap().unwrap();
    assert!(start.elapsed() >= download_time(9.0));

    let mut seen = Vec::new();
    while let Ok(p) = rx.try_recv() {
        seen.push(p.value());
    }
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(seen.iter().filter(|v| **v >= 100.0).count(), 1);
    assert_eq!(*seen.last().unwrap(), 100.0);

    let st = f.session.snapshot();
    assert_eq!(st.download, DownloadState::Completed);
    assert_eq!(st.progress, 100.0);

    let first = f.session.history().first().unwrap();
    assert_eq!(first, entry);
    assert_eq!(first.url, url);
    assert_eq!(first.quality, Quality::Hd720);
    assert_eq!(first.title, info.title);
    assert_eq!(first.thumbnail, info.thumbnail);

    let stored = decode_history(&f.kv.get(HISTORY_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(stored[0], entry);

    let n = f.notifier.last().unwrap();
    assert_eq!(n.title, "Download complete");
    assert!(n.description.contains("720p"));
}

#[tokio::test(start_paused = true)]
async fn history_capped_across_many_downloads() {
    let f = fixture(50.0);
    f.session.process("youtu.be/repeat").await.unwrap();
    for _ in 0..(HISTORY_LIMIT + 3) {
        f.session.download(None).await.unwrap().unwrap();
        assert!(f.session.history().len() <= HISTORY_LIMIT);
    }
    assert_eq!(f.session.history().len(), HISTORY_LIMIT);
    let stored = decode_history(&f.kv.get(HISTORY_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(stored.len(), HISTORY_LIMIT);
}

#[tokio::test(start_paused = true)]
async fn second_download_while_running_is_busy() {
    let f = fixture(5.0);
    f.session.process("youtu.be/abc").await.unwrap();
    let running = {
        let session = Arc::clone(&f.session);
        tokio::spawn(async move { session.download(None).await })
    };
    tokio::task::yield_now().await;
    assert_eq!(f.session.download(None).await, Err(DownloaderError::Busy));
    assert_eq!(f.session.process("youtu.be/other").await, Err(DownloaderError::Busy));
    assert!(running.await.unwrap().unwrap().is_some());
    assert_eq!(f.session.history().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn cancel_discards_progress_and_history() {
    let f = fixture(5.0);
    f.session.process("youtu.be/abc").await.unwrap();
    let running = {
        let session = Arc::clone(&f.session);
        tokio::spawn(async move { session.download(None).await })
    };
    tokio::time::sleep(common::download_time(5.0) / 2).await;
    assert!(f.session.snapshot().progress > 0.0);
    assert!(f.session.cancel_download());

    assert_eq!(running.await.unwrap(), Err(DownloaderError::Cancelled));
    let st = f.session.snapshot();
    assert_eq!(st.download, DownloadState::Cancelled);
    assert_eq!(st.progress, 0.0);
    assert!(f.session.history().is_empty());
    assert!(!f.kv.contains_key(HISTORY_KEY));
    assert!(!f.session.cancel_download());

    // The video stays ready, so a new run can start.
    assert!(f.session.download(None).await.unwrap().is_some());
}

#[tokio::test(start_paused = true)]
async fn dispose_stops_pending_resolution_silently() {
    let f = fixture(9.0);
    let pending = {
        let session = Arc::clone(&f.session);
        tokio::spawn(async move { session.process("youtu.be/abc").await })
    };
    tokio::task::yield_now().await;
    f.session.dispose();
    assert_eq!(pending.await.unwrap(), Err(DownloaderError::Cancelled));
    assert_eq!(f.session.snapshot().resolver, ResolverState::Resolving);
    assert!(f.notifier.notifications().is_empty());
    assert_eq!(f.session.process("youtu.be/abc").await, Err(DownloaderError::Cancelled));
}

#[tokio::test(start_paused = true)]
async fn dispose_stops_running_download_without_history() {
    let f = fixture(5.0);
    f.session.process("youtu.be/abc").await.unwrap();
    let notified = f.notifier.notifications().len();
    let running = {
        let session = Arc::clone(&f.session);
        tokio::spawn(async move { session.download(None).await })
    };
    tokio::task::yield_now().await;
    f.session.dispose();
    assert_eq!(running.await.unwrap(), Err(DownloaderError::Cancelled));
    assert!(f.session.history().is_empty());
    // Only the "download started" notification was emitted.
    assert_eq!(f.notifier.notifications().len(), notified + 1);
}

#[tokio::test(start_paused = true)]
async fn history_survives_a_new_session() {
    let kv = Arc::new(MemoryStore::new());
    {
        let f = fixture_with_store(kv.clone(), 50.0);
        f.session.process("youtu.be/keep").await.unwrap();
        f.session.download(None).await.unwrap();
    }
    let f = fixture_with_store(kv, 50.0);
    assert_eq!(f.session.history().len(), 1);
    assert_eq!(f.session.history().first().unwrap().url, "youtu.be/keep");
}

#[tokio::test(start_paused = true)]
async fn clear_and_copy() {
    let f = fixture(50.0);
    f.session.process("https://youtu.be/copy-me").await.unwrap();
    let entry = f.session.download(None).await.unwrap().unwrap();

    f.session.copy_url(&entry).unwrap();
    assert_eq!(f.clipboard.contents().as_deref(), Some("https://youtu.be/copy-me"));
    assert_eq!(f.notifier.last().unwrap().title, "URL copied");
    assert_eq!(f.session.history().len(), 1);

    f.session.clear_history().unwrap();
    assert!(f.session.history().is_empty());
    assert!(!f.kv.contains_key(HISTORY_KEY));
    assert_eq!(f.notifier.last().unwrap().title, "History cleared");
}

#[tokio::test(start_paused = true)]
async fn dropped_process_releases_busy_state() {
    let f = fixture(9.0);
    let timed_out = tokio::time::timeout(
        std::time::Duration::from_millis(500),
        f.session.process("youtu.be/abc"),
    )
    .await;
    assert!(timed_out.is_err());
    assert_eq!(f.session.snapshot().resolver, ResolverState::Idle);
    assert!(f.notifier.notifications().is_empty());

    let info = f.session.process("youtu.be/abc").await.unwrap();
    assert_eq!(f.session.current_video(), Some(info));
}

#[tokio::test(start_paused = true)]
async fn dropped_download_releases_busy_state_without_history() {
    let f = fixture(5.0);
    f.session.process("youtu.be/abc").await.unwrap();
    let timed_out = tokio::time::timeout(
        std::time::Duration::from_millis(500),
        f.session.download(None),
    )
    .await;
    assert!(timed_out.is_err());
    let st = f.session.snapshot();
    assert_eq!(st.download, DownloadState::Cancelled);
    assert_eq!(st.progress, 0.0);
    assert!(f.session.history().is_empty());
    assert!(!f.session.cancel_download());

    let entry = f.session.download(None).await.unwrap().unwrap();
    assert_eq!(f.session.history().first(), Some(entry));
    assert_eq!(f.session.snapshot().download, DownloadState::Completed);
}

#[tokio::test(start_paused = true)]
async fn unembeddable_identifier_fails_after_delay() {
    let f = fixture(9.0);
    let start = Instant::now();
    let err = f.session.process("https://youtu.be/two words").await.unwrap_err();
    assert_eq!(err, DownloaderError::ResolutionFailed);
    assert!(start.elapsed() >= DEFAULT_RESOLVE_DELAY);
    let st = f.session.snapshot();
    assert_eq!(st.resolver, ResolverState::Failed(DownloaderError::ResolutionFailed));
    let n = f.notifier.last().unwrap();
    assert_eq!(n.severity, Severity::Destructive);
    assert_eq!(Some(n.description), st.url_error);
}
