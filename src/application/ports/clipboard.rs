//! Clipboard port interface

use async_trait::async_trait;
use thiserror::Error;

/// Clipboard errors
///
/// Every variant is transient from the watcher's point of view: the failed
/// operation is skipped and retried on the next tick or command.
#[derive(Debug, Clone, Error)]
pub enum ClipboardError {
    #[error("{0} not found. Please install wl-clipboard.")]
    ToolNotFound(&'static str),

    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("Failed to read clipboard: {0}")]
    ReadFailed(String),

    #[error("Failed to write clipboard: {0}")]
    WriteFailed(String),
}

/// Port for the system clipboard (plain text only)
#[async_trait]
pub trait ClipboardPort: Send + Sync {
    /// Read the current clipboard text.
    ///
    /// A clipboard holding no text (or non-text content) reads as an
    /// empty string.
    async fn read(&self) -> Result<String, ClipboardError>;

    /// Replace the clipboard contents with `text`.
    async fn write(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Blanket implementation for boxed clipboard types
#[async_trait]
impl ClipboardPort for Box<dyn ClipboardPort> {
    async fn read(&self) -> Result<String, ClipboardError> {
        self.as_ref().read().await
    }

    async fn write(&self, text: &str) -> Result<(), ClipboardError> {
        self.as_ref().write(text).await
    }
}
