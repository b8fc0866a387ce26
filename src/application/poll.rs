//! Clipboard polling loop
//!
//! Reads the clipboard at a fixed interval and feeds it into the session.
//! Presentation is never touched from here: refreshes are sent as events to
//! whoever owns the presenter.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::domain::history::ObserveOutcome;
use crate::domain::interval::Interval;

use super::ports::ClipboardPort;
use super::session::{ClipboardSession, PollOutcome};

/// Events emitted by the poll loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// History changed and the view must be redrawn
    HistoryChanged(ObserveOutcome),
}

/// Periodic clipboard reader
pub struct PollLoop<C>
where
    C: ClipboardPort,
{
    session: Arc<ClipboardSession<C>>,
    interval: Interval,
    events: mpsc::Sender<SessionEvent>,
    consecutive_failures: u32,
}

impl<C> PollLoop<C>
where
    C: ClipboardPort,
{
    /// Create a poll loop over a shared session
    pub fn new(
        session: Arc<ClipboardSession<C>>,
        interval: Interval,
        events: mpsc::Sender<SessionEvent>,
    ) -> Self {
        Self {
            session,
            interval,
            events,
            consecutive_failures: 0,
        }
    }

    /// Number of failed reads since the last successful one
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Poll until `shutdown` is raised or the event receiver goes away
    pub async fn run(mut self, shutdown: Arc<AtomicBool>) {
        let mut ticker = tokio::time::interval(self.interval.as_std());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        log::info!("Clipboard polling started with {} interval", self.interval);

        loop {
            ticker.tick().await;
            if shutdown.load(Ordering::SeqCst) || self.events.is_closed() {
                break;
            }
            self.tick().await;
        }

        log::info!("Clipboard polling stopped");
    }

    /// Run a single poll. Read failures are logged and swallowed.
    pub async fn tick(&mut self) -> Option<PollOutcome> {
        let outcome = match self.session.poll_once().await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.consecutive_failures += 1;
                if self.consecutive_failures == 1 {
                    log::warn!("Clipboard read failed: {}", e);
                } else {
                    log::debug!(
                        "Clipboard read failed ({} in a row): {}",
                        self.consecutive_failures,
                        e
                    );
                }
                return None;
            }
        };

        if self.consecutive_failures > 0 {
            log::info!(
                "Clipboard readable again after {} failed read(s)",
                self.consecutive_failures
            );
            self.consecutive_failures = 0;
        }

        match outcome {
            PollOutcome::Observed(observed) if outcome.refreshes_view() => {
                log::debug!("Clipboard change {}, history size {}", observed, self.session.size());
                if self
                    .events
                    .send(SessionEvent::HistoryChanged(observed))
                    .await
                    .is_err()
                {
                    log::debug!("Event receiver closed, dropping refresh");
                }
            }
            PollOutcome::Suppressed => log::trace!("Own clipboard write suppressed"),
            _ => {}
        }

        Some(outcome)
    }
}
