//! Session and poll loop integration tests
//!
//! Drive the public application API against an in-memory clipboard with
//! tokio's paused clock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use clip_cycle::application::ports::{ClipboardError, ClipboardPort};
use clip_cycle::application::{
    ClearOutcome, ClipboardSession, PollLoop, SessionConfig, SessionEvent,
};
use clip_cycle::domain::cycle::CycleMode;
use clip_cycle::domain::interval::Interval;

/// Clipboard shared between the "user" and the watcher
#[derive(Default)]
struct MemoryClipboard {
    content: Mutex<String>,
    writes: Mutex<Vec<String>>,
}

impl MemoryClipboard {
    fn copy(&self, text: &str) {
        *self.content.lock().unwrap() = text.to_string();
    }

    fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClipboardPort for MemoryClipboard {
    async fn read(&self) -> Result<String, ClipboardError> {
        Ok(self.content.lock().unwrap().clone())
    }

    async fn write(&self, text: &str) -> Result<(), ClipboardError> {
        *self.content.lock().unwrap() = text.to_string();
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

struct Harness {
    session: Arc<ClipboardSession<MemoryClipboard>>,
    events: mpsc::Receiver<SessionEvent>,
    shutdown: Arc<AtomicBool>,
}

impl Harness {
    fn start(config: SessionConfig) -> Self {
        let session = Arc::new(ClipboardSession::new(MemoryClipboard::default(), config).unwrap());
        let (tx, events) = mpsc::channel(64);
        let shutdown = Arc::new(AtomicBool::new(false));
        tokio::spawn(
            PollLoop::new(Arc::clone(&session), Interval::from_millis(500), tx)
                .run(Arc::clone(&shutdown)),
        );
        Self {
            session,
            events,
            shutdown,
        }
    }

    /// Copy as the user would, then let the poll loop see it
    async fn user_copies(&self, text: &str) {
        self.session.clipboard().copy(text);
        settle().await;
    }

    fn drain_events(&mut self) -> usize {
        let mut count = 0;
        while self.events.try_recv().is_ok() {
            count += 1;
        }
        count
    }

    fn history(&self) -> Vec<String> {
        self.session
            .snapshot()
            .entries
            .into_iter()
            .map(|s| s.into_string())
            .collect()
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(600)).await;
}

fn cycling() -> SessionConfig {
    SessionConfig {
        start_cycling: true,
        ..Default::default()
    }
}

#[tokio::test(start_paused = true)]
async fn copies_are_recorded_newest_first() {
    let mut harness = Harness::start(SessionConfig::default());

    harness.user_copies("a").await;
    harness.user_copies("b").await;
    harness.user_copies("c").await;
    harness.user_copies("a").await;

    assert_eq!(harness.history(), vec!["a", "c", "b"]);
    assert_eq!(harness.drain_events(), 4);
}

#[tokio::test(start_paused = true)]
async fn whitespace_copies_are_ignored() {
    let mut harness = Harness::start(SessionConfig::default());

    harness.user_copies("a").await;
    harness.user_copies("   \n").await;
    harness.user_copies("").await;

    assert_eq!(harness.history(), vec!["a"]);
    assert_eq!(harness.drain_events(), 1);
}

#[tokio::test(start_paused = true)]
async fn own_writes_are_never_recorded() {
    let mut harness = Harness::start(cycling());
    for text in ["a", "b", "c"] {
        harness.user_copies(text).await;
    }
    harness.drain_events();

    for _ in 0..4 {
        harness.session.advance().await.unwrap();
        // well past the suppression window
        tokio::time::sleep(Duration::from_secs(3)).await;
    }

    assert_eq!(
        harness.session.clipboard().writes(),
        vec!["a", "b", "c", "a"]
    );
    assert_eq!(harness.history(), vec!["c", "b", "a"]);
    assert_eq!(harness.drain_events(), 0);
}

#[tokio::test(start_paused = true)]
async fn new_copy_restarts_cycle_from_oldest() {
    let harness = Harness::start(cycling());
    for text in ["a", "b", "c"] {
        harness.user_copies(text).await;
    }

    harness.session.advance().await.unwrap();
    harness.session.advance().await.unwrap();
    settle().await;

    harness.user_copies("d").await;
    let injection = harness.session.advance().await.unwrap().unwrap();

    assert_eq!(injection.snippet.as_str(), "a");
    assert_eq!(harness.history(), vec!["d", "c", "b", "a"]);
}

#[tokio::test(start_paused = true)]
async fn clear_stops_cycling_until_next_copy() {
    let harness = Harness::start(cycling());
    harness.user_copies("a").await;
    harness.user_copies("b").await;

    assert!(matches!(harness.session.clear().await, ClearOutcome::Cleared));
    settle().await;

    assert!(harness.history().is_empty());
    assert!(harness.session.advance().await.unwrap().is_none());

    harness.user_copies("c").await;
    let injection = harness.session.advance().await.unwrap().unwrap();
    assert_eq!(injection.snippet.as_str(), "c");
}

#[tokio::test(start_paused = true)]
async fn capacity_evicts_oldest() {
    let harness = Harness::start(SessionConfig {
        capacity: 2,
        ..Default::default()
    });

    for text in ["a", "b", "c"] {
        harness.user_copies(text).await;
    }

    assert_eq!(harness.history(), vec!["c", "b"]);
}

#[tokio::test(start_paused = true)]
async fn toggle_off_makes_advance_a_noop() {
    let harness = Harness::start(cycling());
    harness.user_copies("a").await;

    assert_eq!(harness.session.toggle_enabled(), CycleMode::Off);
    assert!(harness.session.advance().await.unwrap().is_none());
    assert!(harness.session.clipboard().writes().is_empty());
}

#[tokio::test(start_paused = true)]
async fn explicit_selection_is_not_recorded_again() {
    let mut harness = Harness::start(SessionConfig::default());
    for text in ["a", "b", "c"] {
        harness.user_copies(text).await;
    }
    harness.drain_events();

    // display index 2 is the oldest snippet
    let injection = harness.session.select_display(2).await.unwrap();
    assert_eq!(injection.snippet.as_str(), "a");
    tokio::time::sleep(Duration::from_secs(3)).await;

    assert_eq!(harness.history(), vec!["c", "b", "a"]);
    assert_eq!(harness.drain_events(), 0);
    assert_eq!(harness.session.snapshot().cursor, Some(2));
}
