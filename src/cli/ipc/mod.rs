//! IPC (Inter-Process Communication) module for watcher control
//!
//! Provides platform-specific implementations:
//! - Unix (Linux/macOS): Unix Domain Sockets
//! - Windows: Named Pipes

#[cfg(windows)]
mod named_pipe;
#[cfg(unix)]
mod unix_socket;

#[cfg(windows)]
pub use named_pipe::{NamedPipeClient, NamedPipeServer, PipePath};
#[cfg(unix)]
pub use unix_socket::{SocketPath, UnixSocketClient, UnixSocketServer};

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use super::control::{ControlCommand, ControlReply};
use super::signals::{ControlRequest, WatcherSignal};

/// Trait for IPC servers that listen for control commands
#[async_trait::async_trait]
pub trait IpcServer: Send + Sync {
    /// Bind to the IPC endpoint
    fn bind(&mut self) -> io::Result<()>;

    /// Get the path/name of the IPC endpoint
    fn path(&self) -> String;

    /// Accept connections until the task is dropped.
    ///
    /// Each request is forwarded to the watcher loop and the connection
    /// stays open until the watcher has answered it.
    async fn run(&self, tx: mpsc::Sender<WatcherSignal>) -> io::Result<()>;

    /// Cleanup IPC resources
    fn cleanup(&self);
}

/// Trait for IPC clients that send commands to the watcher
#[async_trait::async_trait]
pub trait IpcClient: Send + Sync {
    /// Check if a watcher appears to be running (endpoint exists)
    fn is_watcher_running(&self) -> bool;

    /// Send a command and receive the raw reply line
    async fn send_command(&self, cmd: &str) -> io::Result<String>;
}

/// Forward one request line to the watcher and wait for its reply
pub(crate) async fn dispatch(line: &str, tx: &mpsc::Sender<WatcherSignal>) -> ControlReply {
    let command = match line.parse::<ControlCommand>() {
        Ok(command) => command,
        Err(e) => return ControlReply::error(e.to_string()),
    };

    let (request, reply) = ControlRequest::with_reply(command);
    if tx.send(WatcherSignal::Control(request)).await.is_err() {
        return ControlReply::error("watcher is shutting down");
    }

    reply
        .await
        .unwrap_or_else(|_| ControlReply::error("watcher dropped the request"))
}

/// Serve a single connection: read one line, answer with one line
pub(crate) async fn serve_connection<R, W>(
    mut reader: R,
    mut writer: W,
    tx: &mpsc::Sender<WatcherSignal>,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();
    reader.read_line(&mut line).await?;

    let reply = dispatch(&line, tx).await;
    log::debug!("IPC {:?} -> {}", line.trim(), reply.to_line());

    writer
        .write_all(format!("{}\n", reply.to_line()).as_bytes())
        .await?;
    writer.flush().await
}

/// Create the appropriate IPC server for the current platform
#[cfg(unix)]
pub fn create_ipc_server() -> Box<dyn IpcServer> {
    Box::new(UnixSocketServer::new(SocketPath::new()))
}

#[cfg(windows)]
pub fn create_ipc_server() -> Box<dyn IpcServer> {
    Box::new(NamedPipeServer::new(PipePath::new()))
}

/// Create the appropriate IPC client for the current platform
#[cfg(unix)]
pub fn create_ipc_client() -> Box<dyn IpcClient> {
    Box::new(UnixSocketClient::new(SocketPath::new()))
}

#[cfg(windows)]
pub fn create_ipc_client() -> Box<dyn IpcClient> {
    Box::new(NamedPipeClient::new(PipePath::new()))
}
