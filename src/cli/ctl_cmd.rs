//! Ctl command handler - sends commands to the running watcher via IPC

use super::args::CtlAction;
use super::control::{ControlCommand, ControlReply};
use super::ipc::{create_ipc_client, IpcClient};
use super::presenter::Presenter;

/// Handle ctl subcommand
pub async fn handle_ctl_command(action: CtlAction, presenter: &Presenter) -> Result<(), String> {
    send_and_present(create_ipc_client().as_ref(), action.into(), presenter).await
}

async fn send_and_present(
    client: &dyn IpcClient,
    command: ControlCommand,
    presenter: &Presenter,
) -> Result<(), String> {
    if !client.is_watcher_running() {
        return Err("No watcher running. Start it with: clip-cycle".to_string());
    }

    let line = client
        .send_command(&command.to_string())
        .await
        .map_err(|e| format!("Failed to communicate with watcher: {}", e))?;

    let reply = ControlReply::from_line(&line)
        .map_err(|e| format!("Unexpected reply from watcher: {}", e))?;

    present(reply, presenter)
}

fn present(reply: ControlReply, presenter: &Presenter) -> Result<(), String> {
    match reply {
        ControlReply::Ok { message } => presenter.success(&message),
        ControlReply::Error { message } => return Err(message),
        ControlReply::History {
            mode,
            position,
            capacity,
            entries,
        } => presenter.history(&entries, position, &mode, capacity),
        ControlReply::Watcher {
            pid,
            mode,
            size,
            capacity,
            position,
        } => {
            presenter.key_value("pid", &pid.to_string());
            presenter.key_value("cycle", &mode);
            presenter.key_value("history", &format!("{}/{}", size, capacity));
            presenter.key_value(
                "position",
                &position
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "(none)".to_string()),
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::io;
    use std::sync::Mutex;

    struct FakeClient {
        running: bool,
        reply: String,
        sent: Mutex<Vec<String>>,
    }

    impl FakeClient {
        fn new(running: bool, reply: &str) -> Self {
            Self {
                running,
                reply: reply.to_string(),
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl IpcClient for FakeClient {
        fn is_watcher_running(&self) -> bool {
            self.running
        }

        async fn send_command(&self, cmd: &str) -> io::Result<String> {
            self.sent.lock().unwrap().push(cmd.to_string());
            Ok(self.reply.clone())
        }
    }

    #[tokio::test]
    async fn no_watcher_is_an_error() {
        let client = FakeClient::new(false, "");
        let err = send_and_present(&client, ControlCommand::Status, &Presenter::new())
            .await
            .unwrap_err();
        assert!(err.contains("No watcher running"));
        assert!(client.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn sends_wire_command() {
        let client = FakeClient::new(true, &ControlReply::ok("#1 a").to_line());
        send_and_present(&client, ControlCommand::Select(1), &Presenter::new())
            .await
            .unwrap();
        assert_eq!(client.sent.lock().unwrap().as_slice(), ["select 1"]);
    }

    #[tokio::test]
    async fn error_reply_becomes_error() {
        let client = FakeClient::new(true, &ControlReply::error("no snippet").to_line());
        let err = send_and_present(&client, ControlCommand::Select(9), &Presenter::new())
            .await
            .unwrap_err();
        assert_eq!(err, "no snippet");
    }

    #[tokio::test]
    async fn garbage_reply_is_reported() {
        let client = FakeClient::new(true, "ok\n");
        let err = send_and_present(&client, ControlCommand::Advance, &Presenter::new())
            .await
            .unwrap_err();
        assert!(err.contains("Unexpected reply"));
    }
}
