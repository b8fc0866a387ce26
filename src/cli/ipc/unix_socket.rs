//! Unix Domain Socket communication for watcher control
//!
//! Used on Linux and macOS.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;

use super::{serve_connection, IpcClient, IpcServer};
use crate::cli::signals::WatcherSignal;

/// Socket file name inside the runtime directory
const SOCKET_NAME: &str = "clip-cycle.sock";

/// Socket path resolver
#[derive(Debug, Clone)]
pub struct SocketPath {
    path: PathBuf,
}

impl SocketPath {
    /// Create socket path, preferring XDG_RUNTIME_DIR
    pub fn new() -> Self {
        let path = std::env::var("XDG_RUNTIME_DIR")
            .map(|dir| PathBuf::from(dir).join(SOCKET_NAME))
            .unwrap_or_else(|_| std::env::temp_dir().join(SOCKET_NAME));
        Self { path }
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the socket path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if socket file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Remove socket file if it exists
    pub fn cleanup(&self) -> io::Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

impl Default for SocketPath {
    fn default() -> Self {
        Self::new()
    }
}

/// Unix Domain Socket server for watcher commands
pub struct UnixSocketServer {
    socket_path: SocketPath,
    listener: Option<UnixListener>,
}

impl UnixSocketServer {
    /// Create a new socket server
    pub fn new(socket_path: SocketPath) -> Self {
        Self {
            socket_path,
            listener: None,
        }
    }
}

impl Drop for UnixSocketServer {
    fn drop(&mut self) {
        if self.listener.is_some() {
            self.cleanup();
        }
    }
}

#[async_trait]
impl IpcServer for UnixSocketServer {
    fn bind(&mut self) -> io::Result<()> {
        // Remove stale socket file; the PID file guards against a live owner
        self.socket_path.cleanup()?;

        let listener = UnixListener::bind(self.socket_path.path())?;
        self.listener = Some(listener);
        Ok(())
    }

    fn path(&self) -> String {
        self.socket_path.path().to_string_lossy().to_string()
    }

    async fn run(&self, tx: mpsc::Sender<WatcherSignal>) -> io::Result<()> {
        let listener = self
            .listener
            .as_ref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "Socket not bound"))?;

        loop {
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let (reader, writer) = stream.into_split();
                        if let Err(e) = serve_connection(BufReader::new(reader), writer, &tx).await
                        {
                            log::warn!("Socket connection error: {}", e);
                        }
                    });
                }
                Err(e) => {
                    log::warn!("Socket accept error: {}", e);
                }
            }
        }
    }

    fn cleanup(&self) {
        if let Err(e) = self.socket_path.cleanup() {
            log::debug!("Failed to remove socket file: {}", e);
        }
    }
}

/// Unix Domain Socket client for sending commands to the watcher
pub struct UnixSocketClient {
    socket_path: SocketPath,
}

impl UnixSocketClient {
    /// Create a new socket client
    pub fn new(socket_path: SocketPath) -> Self {
        Self { socket_path }
    }
}

#[async_trait]
impl IpcClient for UnixSocketClient {
    fn is_watcher_running(&self) -> bool {
        self.socket_path.exists()
    }

    async fn send_command(&self, cmd: &str) -> io::Result<String> {
        let stream = UnixStream::connect(self.socket_path.path()).await?;
        let (reader, mut writer) = stream.into_split();

        writer.write_all(format!("{}\n", cmd).as_bytes()).await?;
        writer.flush().await?;

        let mut reader = BufReader::new(reader);
        let mut response = String::new();
        reader.read_line(&mut response).await?;

        Ok(response)
    }
}
