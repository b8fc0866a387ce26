//! Signal handling for the watcher
//!
//! Shutdown signals and control requests from every source (IPC clients,
//! SIGUSR1) arrive on one channel consumed by the watcher loop.

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use super::control::{ControlCommand, ControlReply};

/// A control command with an optional reply slot
#[derive(Debug)]
pub struct ControlRequest {
    pub command: ControlCommand,
    /// Filled once the command has fully run, clipboard write included
    pub reply: Option<oneshot::Sender<ControlReply>>,
}

impl ControlRequest {
    /// Request whose sender does not wait for an answer
    pub fn fire_and_forget(command: ControlCommand) -> Self {
        Self {
            command,
            reply: None,
        }
    }

    /// Request plus the receiver for its reply
    pub fn with_reply(command: ControlCommand) -> (Self, oneshot::Receiver<ControlReply>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                command,
                reply: Some(tx),
            },
            rx,
        )
    }
}

/// Watcher signals
#[derive(Debug)]
pub enum WatcherSignal {
    /// Run a control command
    Control(ControlRequest),
    /// Shutdown watcher (SIGINT/SIGTERM)
    Shutdown,
}

/// Errors setting up a paste trigger source
#[derive(Debug, Error)]
pub enum PasteTriggerError {
    #[error("Failed to register {trigger} paste trigger: {reason}")]
    RegistrationFailed {
        trigger: &'static str,
        reason: String,
    },
}

/// Watcher signal handler
///
/// Handles OS shutdown signals and provides a channel for receiving
/// control requests from other sources.
pub struct WatcherSignalHandler {
    receiver: mpsc::Receiver<WatcherSignal>,
}

impl WatcherSignalHandler {
    /// Create the handler and start listening for shutdown signals.
    ///
    /// Returns the handler and a sender for other request sources.
    pub async fn new() -> Result<(Self, mpsc::Sender<WatcherSignal>), std::io::Error> {
        let (tx, rx) = mpsc::channel(16);
        listen_for_shutdown(tx.clone())?;
        Ok((Self { receiver: rx }, tx))
    }

    /// Wait for the next signal
    pub async fn recv(&mut self) -> Option<WatcherSignal> {
        self.receiver.recv().await
    }
}

#[cfg(unix)]
fn listen_for_shutdown(tx: mpsc::Sender<WatcherSignal>) -> Result<(), std::io::Error> {
    use tokio::signal::unix::{signal, SignalKind};

    for (kind, name) in [
        (SignalKind::interrupt(), "SIGINT"),
        (SignalKind::terminate(), "SIGTERM"),
    ] {
        let mut stream = signal(kind)?;
        let tx = tx.clone();
        tokio::spawn(async move {
            stream.recv().await;
            log::info!("Received {} (shutdown)", name);
            let _ = tx.send(WatcherSignal::Shutdown).await;
        });
    }
    Ok(())
}

#[cfg(not(unix))]
fn listen_for_shutdown(tx: mpsc::Sender<WatcherSignal>) -> Result<(), std::io::Error> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Received Ctrl+C (shutdown)");
            let _ = tx.send(WatcherSignal::Shutdown).await;
        }
    });
    Ok(())
}

/// Treat every SIGUSR1 as a paste trigger (`advance`)
#[cfg(unix)]
pub fn register_paste_signal(tx: mpsc::Sender<WatcherSignal>) -> Result<(), PasteTriggerError> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut stream =
        signal(SignalKind::user_defined1()).map_err(|e| PasteTriggerError::RegistrationFailed {
            trigger: "SIGUSR1",
            reason: e.to_string(),
        })?;

    tokio::spawn(async move {
        while stream.recv().await.is_some() {
            log::debug!("Received SIGUSR1 (advance)");
            let request = ControlRequest::fire_and_forget(ControlCommand::Advance);
            if tx.send(WatcherSignal::Control(request)).await.is_err() {
                break;
            }
        }
    });
    Ok(())
}

#[cfg(not(unix))]
pub fn register_paste_signal(_tx: mpsc::Sender<WatcherSignal>) -> Result<(), PasteTriggerError> {
    Err(PasteTriggerError::RegistrationFailed {
        trigger: "SIGUSR1",
        reason: "signals are not supported on this platform".to_string(),
    })
}
