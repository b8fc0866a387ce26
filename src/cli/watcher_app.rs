//! Watcher app runner
//!
//! Hosts the clipboard session in the foreground: the poll task feeds it,
//! control requests drive it, and this loop owns all terminal output.

use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::ports::{ClipboardPort, Keystroke, NotificationIcon, Notifier};
use crate::application::{
    ClearOutcome, ClipboardSession, Injection, PollLoop, SessionConfig, SessionError, SessionEvent,
};
use crate::infrastructure::{create_clipboard, create_keystroke, create_notifier};

use super::app::{EXIT_ERROR, EXIT_SUCCESS};
use super::args::WatcherOptions;
use super::control::{ControlCommand, ControlReply};
use super::ipc::create_ipc_server;
use super::presenter::Presenter;
use super::signals::{register_paste_signal, PasteTriggerError, WatcherSignal, WatcherSignalHandler};

/// Executes control commands against the session
pub struct WatcherController<C, K, N>
where
    C: ClipboardPort,
    K: Keystroke,
    N: Notifier,
{
    session: Arc<ClipboardSession<C>>,
    keystroke: K,
    notifier: N,
    preview_width: usize,
}

impl<C, K, N> WatcherController<C, K, N>
where
    C: ClipboardPort,
    K: Keystroke,
    N: Notifier,
{
    pub fn new(
        session: Arc<ClipboardSession<C>>,
        keystroke: K,
        notifier: N,
        preview_width: usize,
    ) -> Self {
        Self {
            session,
            keystroke,
            notifier,
            preview_width,
        }
    }

    /// Run one command to completion and describe the result
    pub async fn execute(&self, command: ControlCommand) -> ControlReply {
        log::debug!("Executing control command: {}", command);

        match command {
            ControlCommand::Advance => match self.session.advance().await {
                Ok(injection) => self.injected(injection.as_ref()),
                Err(e) => self.failed(command, e.into()),
            },
            ControlCommand::Paste => self.paste().await,
            ControlCommand::Toggle => {
                let mode = self.session.toggle_enabled();
                log::info!("Cycle mode {}", mode);
                let message = format!("cycle mode {}", mode);
                self.notify("Clipboard cycling", &message, NotificationIcon::Clipboard)
                    .await;
                ControlReply::ok(message)
            }
            ControlCommand::Select(position) => {
                let Some(display_index) = position.checked_sub(1) else {
                    return ControlReply::error("positions start at 1");
                };
                match self.session.select_display(display_index).await {
                    Ok(injection) => self.injected(Some(&injection)),
                    Err(SessionError::Selection(e)) => ControlReply::error(format!(
                        "no snippet at position {} (history holds {})",
                        position, e.size
                    )),
                    Err(e) => self.failed(command, e),
                }
            }
            ControlCommand::Newest => match self.session.reset_to_newest().await {
                Ok(injection) => self.injected(injection.as_ref()),
                Err(e) => self.failed(command, e.into()),
            },
            ControlCommand::Oldest => match self.session.reset_to_oldest().await {
                Ok(injection) => self.injected(injection.as_ref()),
                Err(e) => self.failed(command, e.into()),
            },
            ControlCommand::Clear => {
                let message = match self.session.clear().await {
                    ClearOutcome::Cleared => {
                        log::info!("History cleared");
                        "history cleared".to_string()
                    }
                    ClearOutcome::ClipboardKept(e) => {
                        log::warn!("History cleared, clipboard not emptied: {}", e);
                        format!("history cleared (clipboard not emptied: {})", e)
                    }
                };
                self.notify("Clipboard history", "History cleared", NotificationIcon::Info)
                    .await;
                ControlReply::ok(message)
            }
            ControlCommand::List => {
                let snapshot = self.session.snapshot();
                ControlReply::History {
                    mode: ControlReply::mode_label(snapshot.mode),
                    position: snapshot.cursor.map(|c| c + 1),
                    capacity: snapshot.capacity,
                    entries: self.previews(&snapshot.entries),
                }
            }
            ControlCommand::Status => {
                let snapshot = self.session.snapshot();
                ControlReply::Watcher {
                    pid: std::process::id(),
                    mode: ControlReply::mode_label(snapshot.mode),
                    size: snapshot.size(),
                    capacity: snapshot.capacity,
                    position: snapshot.cursor.map(|c| c + 1),
                }
            }
        }
    }

    /// Render the current history through the presenter
    pub fn render(&self, presenter: &Presenter) {
        let snapshot = self.session.snapshot();
        presenter.history(
            &self.previews(&snapshot.entries),
            snapshot.cursor.map(|c| c + 1),
            snapshot.mode.as_str(),
            snapshot.capacity,
        );
    }

    /// Advance, then press the paste shortcut.
    ///
    /// With cycling off the shortcut still fires so the current clipboard
    /// is pasted as usual.
    async fn paste(&self) -> ControlReply {
        let injection = match self.session.advance().await {
            Ok(injection) => injection,
            Err(e) => return self.failed(ControlCommand::Paste, e.into()),
        };

        if let Err(e) = self.keystroke.paste().await {
            log::warn!("Paste keystroke failed: {}", e);
            return ControlReply::error(format!("clipboard updated but paste failed: {}", e));
        }

        self.injected(injection.as_ref())
    }

    fn injected(&self, injection: Option<&Injection>) -> ControlReply {
        match injection {
            Some(injection) => {
                let position = self
                    .session
                    .snapshot()
                    .cursor
                    .map(|c| (c + 1).to_string())
                    .unwrap_or_else(|| "?".to_string());
                log::debug!(
                    "Wrote snippet at storage index {} to clipboard",
                    injection.storage_index
                );
                ControlReply::ok(format!(
                    "#{} {}",
                    position,
                    injection.snippet.preview(self.preview_width)
                ))
            }
            None => ControlReply::ok("nothing to paste (cycle mode off or history empty)"),
        }
    }

    fn failed(&self, command: ControlCommand, error: SessionError) -> ControlReply {
        log::warn!("Command '{}' failed: {}", command, error);
        ControlReply::error(error.to_string())
    }

    async fn notify(&self, title: &str, message: &str, icon: NotificationIcon) {
        if let Err(e) = self.notifier.notify(title, message, icon).await {
            log::debug!("Notification failed: {}", e);
        }
    }

    fn previews(&self, entries: &[crate::domain::history::Snippet]) -> Vec<String> {
        entries
            .iter()
            .map(|snippet| snippet.preview(self.preview_width))
            .collect()
    }
}

/// Run the watcher until SIGINT/SIGTERM
pub async fn run_watcher(options: WatcherOptions) -> ExitCode {
    let presenter = Presenter::new();

    #[cfg(unix)]
    let mut pid_file = {
        let mut pid_file = super::pid_file::PidFile::new();
        if let Err(e) = pid_file.acquire() {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        pid_file
    };

    let session_config = SessionConfig {
        capacity: options.max_history,
        advance_window: options.advance_window,
        select_window: options.select_window,
        clear_clipboard: options.clear_clipboard,
        start_cycling: options.cycle,
    };
    let session = match ClipboardSession::new(create_clipboard(options.backend), session_config) {
        Ok(session) => Arc::new(session),
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let controller = WatcherController::new(
        Arc::clone(&session),
        create_keystroke(options.paste_keystroke),
        create_notifier(options.notify),
        options.preview_width,
    );

    let (mut signals, signal_tx) = match WatcherSignalHandler::new().await {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if let Err(e) = register_paste_signal(signal_tx.clone()) {
        log::warn!("{}", e);
    }

    let ipc_task = match start_ipc_server(signal_tx.clone()) {
        Ok((path, task)) => {
            presenter.info(&format!(
                "PID: {} | Control: {} | SIGINT: exit",
                std::process::id(),
                path
            ));
            Some(task)
        }
        Err(e) => {
            log::warn!("{}; continuing without paste trigger (manual copy only)", e);
            None
        }
    };
    drop(signal_tx);

    let (event_tx, mut events) = mpsc::channel(32);
    let shutdown = Arc::new(AtomicBool::new(false));
    let poll_task = tokio::spawn(
        PollLoop::new(Arc::clone(&session), options.poll_interval, event_tx)
            .run(Arc::clone(&shutdown)),
    );

    presenter.watcher_status(&format!(
        "Watching clipboard ({} backend, every {}, cycle {})",
        options.backend,
        options.poll_interval,
        session.mode()
    ));

    let clean = watcher_loop(&controller, &mut signals, &mut events, &presenter).await;

    presenter.watcher_status("Shutting down...");
    shutdown.store(true, Ordering::SeqCst);
    poll_task.abort();
    let _ = poll_task.await;
    if let Some(task) = ipc_task {
        task.abort();
        let _ = task.await;
    }

    #[cfg(unix)]
    {
        if let Err(e) = pid_file.release() {
            log::warn!("{}", e);
        }
    }

    if clean {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

/// Main loop. Returns false when the signal channel closed unexpectedly.
async fn watcher_loop<C, K, N>(
    controller: &WatcherController<C, K, N>,
    signals: &mut WatcherSignalHandler,
    events: &mut mpsc::Receiver<SessionEvent>,
    presenter: &Presenter,
) -> bool
where
    C: ClipboardPort,
    K: Keystroke,
    N: Notifier,
{
    controller.render(presenter);

    loop {
        tokio::select! {
            Some(event) = events.recv() => match event {
                SessionEvent::HistoryChanged(_) => controller.render(presenter),
            },
            signal = signals.recv() => match signal {
                Some(WatcherSignal::Control(request)) => {
                    let reply = controller.execute(request.command).await;
                    if request.command.mutates() {
                        controller.render(presenter);
                    }
                    if let ControlReply::Error { message } = &reply {
                        presenter.warn(&format!("{}: {}", request.command, message));
                    }
                    if let Some(slot) = request.reply {
                        let _ = slot.send(reply);
                    }
                }
                Some(WatcherSignal::Shutdown) => return true,
                None => return false,
            },
        }
    }
}

fn start_ipc_server(
    tx: mpsc::Sender<WatcherSignal>,
) -> Result<(String, tokio::task::JoinHandle<()>), PasteTriggerError> {
    let mut server = create_ipc_server();
    server
        .bind()
        .map_err(|e| PasteTriggerError::RegistrationFailed {
            trigger: "IPC",
            reason: e.to_string(),
        })?;

    let path = server.path();
    let task = tokio::spawn(async move {
        if let Err(e) = server.run(tx).await {
            log::warn!("IPC server stopped: {}", e);
        }
    });
    Ok((path, task))
}
