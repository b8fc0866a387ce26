//! Cross-platform clipboard adapter using arboard
//!
//! Works on Windows, macOS, and Linux (X11/Wayland).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::application::ports::{ClipboardError, ClipboardPort};

/// Cross-platform clipboard adapter using arboard
///
/// Keeps one arboard handle alive for the adapter's lifetime: on X11 the
/// written selection is served by that handle, so dropping it after every
/// write would lose the text. A failed call discards the handle and the
/// next call opens a fresh one.
#[derive(Default)]
pub struct ArboardClipboard {
    handle: Arc<Mutex<Option<arboard::Clipboard>>>,
}

impl ArboardClipboard {
    /// Create a new arboard clipboard adapter
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `op` against the shared handle on the blocking pool
    async fn with_handle<T, F>(&self, op: F) -> Result<T, ClipboardError>
    where
        T: Send + 'static,
        F: FnOnce(&mut arboard::Clipboard) -> Result<T, ClipboardError> + Send + 'static,
    {
        let handle = Arc::clone(&self.handle);

        // arboard operations are blocking, so run in spawn_blocking
        tokio::task::spawn_blocking(move || {
            let mut guard = handle.lock().unwrap_or_else(|e| e.into_inner());
            if guard.is_none() {
                let clipboard = arboard::Clipboard::new()
                    .map_err(|e| ClipboardError::ClipboardUnavailable(e.to_string()))?;
                *guard = Some(clipboard);
            }

            let result = match guard.as_mut() {
                Some(clipboard) => op(clipboard),
                None => Err(ClipboardError::ClipboardUnavailable(
                    "clipboard handle missing".to_string(),
                )),
            };
            if result.is_err() {
                *guard = None;
            }
            result
        })
        .await
        .map_err(|e| ClipboardError::ClipboardUnavailable(format!("Task join error: {}", e)))?
    }
}

#[async_trait]
impl ClipboardPort for ArboardClipboard {
    async fn read(&self) -> Result<String, ClipboardError> {
        self.with_handle(|clipboard| match clipboard.get_text() {
            Ok(text) => Ok(text),
            // empty clipboard or non-text content
            Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
            Err(arboard::Error::ClipboardOccupied) => Err(ClipboardError::ClipboardUnavailable(
                "clipboard is occupied by another process".to_string(),
            )),
            Err(e) => Err(ClipboardError::ReadFailed(e.to_string())),
        })
        .await
    }

    async fn write(&self, text: &str) -> Result<(), ClipboardError> {
        let text = text.to_owned();
        self.with_handle(move |clipboard| {
            let result = if text.is_empty() {
                clipboard.clear()
            } else {
                clipboard.set_text(text)
            };
            result.map_err(|e| ClipboardError::WriteFailed(e.to_string()))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipboard_creates_without_opening_handle() {
        let clipboard = ArboardClipboard::new();
        assert!(clipboard.handle.lock().unwrap().is_none());
    }
}
