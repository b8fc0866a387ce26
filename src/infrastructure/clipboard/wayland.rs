//! Wayland clipboard adapter using wl-paste / wl-copy

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::application::ports::{ClipboardError, ClipboardPort};

/// Messages wl-paste prints when the selection is empty
const EMPTY_SELECTION_MARKERS: &[&str] = &["Nothing is copied", "No selection", "No suitable type"];

/// Wayland clipboard adapter using wl-clipboard tools
#[derive(Debug, Default)]
pub struct WaylandClipboard;

impl WaylandClipboard {
    /// Create a new Wayland clipboard adapter
    pub fn new() -> Self {
        Self
    }

    fn spawn_error(tool: &'static str, e: std::io::Error) -> ClipboardError {
        if e.kind() == std::io::ErrorKind::NotFound {
            ClipboardError::ToolNotFound(tool)
        } else {
            ClipboardError::ClipboardUnavailable(e.to_string())
        }
    }

    fn is_empty_selection(stderr: &str) -> bool {
        EMPTY_SELECTION_MARKERS
            .iter()
            .any(|marker| stderr.contains(marker))
    }
}

#[async_trait]
impl ClipboardPort for WaylandClipboard {
    async fn read(&self) -> Result<String, ClipboardError> {
        let output = Command::new("wl-paste")
            .args(["--no-newline", "--type", "text"])
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| Self::spawn_error("wl-paste", e))?;

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if Self::is_empty_selection(&stderr) {
            return Ok(String::new());
        }

        Err(ClipboardError::ReadFailed(format!(
            "wl-paste exited with status {}: {}",
            output.status,
            stderr.trim()
        )))
    }

    async fn write(&self, text: &str) -> Result<(), ClipboardError> {
        if text.is_empty() {
            let status = Command::new("wl-copy")
                .arg("--clear")
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await
                .map_err(|e| Self::spawn_error("wl-copy", e))?;
            if !status.success() {
                return Err(ClipboardError::WriteFailed(format!(
                    "wl-copy --clear exited with status: {}",
                    status
                )));
            }
            return Ok(());
        }

        let mut child = Command::new("wl-copy")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Self::spawn_error("wl-copy", e))?;

        // Write text to stdin, then close it so wl-copy takes ownership
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| ClipboardError::WriteFailed(e.to_string()))?;
        }

        let status = child
            .wait()
            .await
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))?;

        if !status.success() {
            return Err(ClipboardError::WriteFailed(format!(
                "wl-copy exited with status: {}",
                status
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_detected() {
        assert!(WaylandClipboard::is_empty_selection("Nothing is copied\n"));
        assert!(WaylandClipboard::is_empty_selection("No selection"));
        assert!(!WaylandClipboard::is_empty_selection("Failed to connect to a Wayland server"));
    }

    #[test]
    fn missing_tool_maps_to_tool_not_found() {
        let err = WaylandClipboard::spawn_error(
            "wl-paste",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert!(matches!(err, ClipboardError::ToolNotFound("wl-paste")));
        assert!(err.to_string().contains("wl-paste"));
    }
}
