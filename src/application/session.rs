//! Clipboard session use case
//!
//! Owns the history, the cycle cursor and the suppression window as one
//! unit behind a single mutex. The lock is only held while mutating memory;
//! clipboard reads and writes happen outside it.

use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

use thiserror::Error;

use crate::domain::cycle::{CycleController, CycleMode, SuppressionWindow};
use crate::domain::error::{InvalidCapacity, SelectionOutOfRange};
use crate::domain::history::{HistoryStore, ObserveOutcome, Snippet, DEFAULT_MAX_HISTORY};
use crate::domain::interval::Interval;

use super::ports::{ClipboardError, ClipboardPort};

/// Errors from the session use case
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error(transparent)]
    Selection(#[from] SelectionOutOfRange),

    #[error(transparent)]
    Capacity(#[from] InvalidCapacity),
}

/// Configuration for a clipboard session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Maximum number of snippets kept
    pub capacity: usize,
    /// Suppression window opened by `advance`
    pub advance_window: Interval,
    /// Suppression window opened by explicit selection and resets
    pub select_window: Interval,
    /// Write an empty clipboard when history is cleared
    pub clear_clipboard: bool,
    /// Start with cycle mode enabled
    pub start_cycling: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_MAX_HISTORY,
            advance_window: Interval::default_advance_window(),
            select_window: Interval::default_select_window(),
            clear_clipboard: true,
            start_cycling: false,
        }
    }
}

/// What a single clipboard read did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Clipboard text is the one already processed
    Unchanged,
    /// Clipboard text is the echo of our own write
    Suppressed,
    /// Clipboard text was offered to the history
    Observed(ObserveOutcome),
}

impl PollOutcome {
    /// Whether the presentation must be refreshed
    pub const fn refreshes_view(&self) -> bool {
        matches!(
            self,
            Self::Observed(ObserveOutcome::Added) | Self::Observed(ObserveOutcome::Promoted)
        )
    }
}

/// A snippet that was written back onto the clipboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injection {
    /// Storage (oldest-first) index of the snippet
    pub storage_index: usize,
    /// The snippet written
    pub snippet: Snippet,
}

/// Read-only view for presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// History, newest first
    pub entries: Vec<Snippet>,
    /// Cursor as a newest-first display index
    pub cursor: Option<usize>,
    /// Current cycle mode
    pub mode: CycleMode,
    /// History capacity
    pub capacity: usize,
}

impl SessionSnapshot {
    /// Number of snippets held
    pub fn size(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug)]
struct SessionState {
    history: HistoryStore,
    cycle: CycleController,
    suppression: Option<SuppressionWindow>,
    last_seen: Option<String>,
}

/// Cursor and suppression state captured around a clipboard write
#[derive(Debug, Clone, PartialEq, Eq)]
struct Checkpoint {
    cycle: CycleController,
    suppression: Option<SuppressionWindow>,
}

impl Checkpoint {
    fn take(state: &SessionState) -> Self {
        Self {
            cycle: state.cycle.clone(),
            suppression: state.suppression.clone(),
        }
    }

    fn restore(self, state: &mut SessionState) {
        state.cycle = self.cycle;
        state.suppression = self.suppression;
    }
}

/// A prepared injection plus what to restore if its write fails
#[derive(Debug)]
struct PendingWrite {
    injection: Injection,
    before: Checkpoint,
    after: Checkpoint,
}

/// Result of clearing the history
#[derive(Debug)]
pub enum ClearOutcome {
    /// History cleared and, if configured, the clipboard emptied
    Cleared,
    /// History cleared but the clipboard still holds its old text
    ClipboardKept(ClipboardError),
}

/// Clipboard session use case
pub struct ClipboardSession<C>
where
    C: ClipboardPort,
{
    clipboard: C,
    state: Mutex<SessionState>,
    config: SessionConfig,
}

impl<C> ClipboardSession<C>
where
    C: ClipboardPort,
{
    /// Create a new session with empty history
    pub fn new(clipboard: C, config: SessionConfig) -> Result<Self, SessionError> {
        let mut cycle = CycleController::new();
        cycle.set_enabled(config.start_cycling);

        Ok(Self {
            clipboard,
            state: Mutex::new(SessionState {
                history: HistoryStore::new(config.capacity)?,
                cycle,
                suppression: None,
                last_seen: None,
            }),
            config,
        })
    }

    /// The clipboard adapter the session reads and writes
    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Read the clipboard once and feed the result into the history
    pub async fn poll_once(&self) -> Result<PollOutcome, ClipboardError> {
        let text = self.clipboard.read().await?;
        Ok(self.ingest(&text, now()))
    }

    /// Feed clipboard text read at `now` into the history.
    ///
    /// The cursor is reset only when the newest entry changes, so a
    /// promotion of the entry that is already newest keeps a running cycle.
    pub fn ingest(&self, text: &str, now: Instant) -> PollOutcome {
        let mut state = self.lock();

        let (suppressed, expired) = match &state.suppression {
            Some(window) => (window.suppresses(text, now), !window.is_active(now)),
            None => (false, false),
        };
        if suppressed {
            state.last_seen = Some(text.to_owned());
            return PollOutcome::Suppressed;
        }
        if expired {
            state.suppression = None;
        }

        if state.last_seen.as_deref() == Some(text) {
            return PollOutcome::Unchanged;
        }
        state.last_seen = Some(text.to_owned());

        let newest_before = state.history.newest().cloned();
        let outcome = state.history.observe(text);
        if outcome.is_mutation() && state.history.newest() != newest_before.as_ref() {
            state.cycle.reset();
        }

        PollOutcome::Observed(outcome)
    }

    /// Advance the cycle cursor and write its snippet.
    ///
    /// Returns `None` when cycle mode is off or the history is empty.
    pub async fn advance(&self) -> Result<Option<Injection>, ClipboardError> {
        let pending = {
            let mut state = self.lock();
            let before = Checkpoint::take(&state);
            let size = state.history.size();
            state.cycle.advance(size).and_then(|index| {
                Self::prepare(&mut state, before, index, self.config.advance_window)
            })
        };
        self.inject_opt(pending).await
    }

    /// Write the snippet at a storage (oldest-first) index
    pub async fn select_explicit(&self, storage_index: usize) -> Result<Injection, SessionError> {
        let pending = {
            let mut state = self.lock();
            let before = Checkpoint::take(&state);
            let size = state.history.size();
            let index = state.cycle.select_explicit(storage_index, size)?;
            Self::prepare(&mut state, before, index, self.config.select_window).ok_or(
                SelectionOutOfRange {
                    index: storage_index,
                    size,
                },
            )?
        };
        Ok(self.inject(pending).await?)
    }

    /// Write the snippet at a newest-first display index
    pub async fn select_display(&self, display_index: usize) -> Result<Injection, SessionError> {
        let storage_index = {
            let state = self.lock();
            let size = state.history.size();
            state
                .history
                .storage_index(display_index)
                .ok_or(SelectionOutOfRange {
                    index: display_index,
                    size,
                })?
        };
        self.select_explicit(storage_index).await
    }

    /// Point the cursor at the newest snippet and write it
    pub async fn reset_to_newest(&self) -> Result<Option<Injection>, ClipboardError> {
        let pending = {
            let mut state = self.lock();
            let before = Checkpoint::take(&state);
            let size = state.history.size();
            state.cycle.reset_to_newest(size).and_then(|index| {
                Self::prepare(&mut state, before, index, self.config.select_window)
            })
        };
        self.inject_opt(pending).await
    }

    /// Point the cursor at the oldest snippet and write it
    pub async fn reset_to_oldest(&self) -> Result<Option<Injection>, ClipboardError> {
        let pending = {
            let mut state = self.lock();
            let before = Checkpoint::take(&state);
            let size = state.history.size();
            state.cycle.reset_to_oldest(size).and_then(|index| {
                Self::prepare(&mut state, before, index, self.config.select_window)
            })
        };
        self.inject_opt(pending).await
    }

    /// Flip cycle mode. Returns the new mode.
    pub fn toggle_enabled(&self) -> CycleMode {
        self.lock().cycle.toggle_enabled()
    }

    /// Empty the history and forget the cursor.
    ///
    /// With `clear_clipboard` set, the clipboard is emptied as well so the
    /// cleared content cannot be observed again. The history is cleared even
    /// when that write fails; the old clipboard text stays the last processed
    /// text, so it is not re-added.
    pub async fn clear(&self) -> ClearOutcome {
        {
            let mut state = self.lock();
            state.history.clear();
            state.cycle.reset();
            state.suppression = None;
        }

        if !self.config.clear_clipboard {
            return ClearOutcome::Cleared;
        }
        match self.clipboard.write("").await {
            Ok(()) => ClearOutcome::Cleared,
            Err(e) => ClearOutcome::ClipboardKept(e),
        }
    }

    /// Current cycle mode
    pub fn mode(&self) -> CycleMode {
        self.lock().cycle.mode()
    }

    /// Number of snippets held
    pub fn size(&self) -> usize {
        self.lock().history.size()
    }

    /// Copy of the state for presentation
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.lock();
        SessionSnapshot {
            entries: state.history.snapshot_newest_first(),
            cursor: state
                .cycle
                .cursor()
                .and_then(|cursor| state.history.display_index(cursor)),
            mode: state.cycle.mode(),
            capacity: state.history.capacity(),
        }
    }

    /// Pick the snippet at `index` and open its suppression window.
    ///
    /// The window is opened before the write is issued so that a clipboard
    /// change delivered during the write is already suppressed.
    fn prepare(
        state: &mut SessionState,
        before: Checkpoint,
        index: usize,
        window: Interval,
    ) -> Option<PendingWrite> {
        let snippet = state.history.get(index)?.clone();
        state.suppression = Some(SuppressionWindow::open(
            snippet.as_str(),
            now(),
            window.as_std(),
        ));
        Some(PendingWrite {
            injection: Injection {
                storage_index: index,
                snippet,
            },
            before,
            after: Checkpoint::take(state),
        })
    }

    /// Write a prepared snippet.
    ///
    /// A failed write rolls the cursor and suppression window back, unless
    /// another update touched them while the write was in flight.
    async fn inject(&self, pending: PendingWrite) -> Result<Injection, ClipboardError> {
        match self.clipboard.write(pending.injection.snippet.as_str()).await {
            Ok(()) => Ok(pending.injection),
            Err(e) => {
                let mut state = self.lock();
                if Checkpoint::take(&state) == pending.after {
                    pending.before.restore(&mut state);
                }
                Err(e)
            }
        }
    }

    async fn inject_opt(
        &self,
        pending: Option<PendingWrite>,
    ) -> Result<Option<Injection>, ClipboardError> {
        match pending {
            Some(pending) => self.inject(pending).await.map(Some),
            None => Ok(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Current instant, following tokio's clock so paused-time tests apply
fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}
