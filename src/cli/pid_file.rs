//! PID file guarding against a second watcher

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process;

use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;

/// PID file name inside the runtime directory
const PID_FILE_NAME: &str = "clip-cycle.pid";

/// PID file for the watcher process
pub struct PidFile {
    path: PathBuf,
    owned: bool,
}

impl PidFile {
    /// Create a PID file manager, preferring XDG_RUNTIME_DIR
    pub fn new() -> Self {
        let path = std::env::var("XDG_RUNTIME_DIR")
            .map(|dir| PathBuf::from(dir).join(PID_FILE_NAME))
            .unwrap_or_else(|_| std::env::temp_dir().join(PID_FILE_NAME));
        Self::with_path(path)
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            owned: false,
        }
    }

    /// Get the PID file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// PID of a live watcher recorded in the file, if any.
    ///
    /// A file naming a dead process is removed.
    pub fn is_running(&self) -> Option<u32> {
        let mut contents = String::new();
        File::open(&self.path)
            .and_then(|mut file| file.read_to_string(&mut contents))
            .ok()?;

        let pid: u32 = contents.trim().parse().ok()?;
        if pid == process::id() {
            return None;
        }

        // Signal 0 only checks that the process exists
        match kill(Pid::from_raw(pid as i32), None::<Signal>) {
            Ok(()) | Err(Errno::EPERM) => Some(pid),
            Err(Errno::ESRCH) => {
                let _ = fs::remove_file(&self.path);
                None
            }
            Err(_) => None,
        }
    }

    /// Acquire the PID file (fails if another watcher is running)
    pub fn acquire(&mut self) -> Result<(), PidFileError> {
        if let Some(pid) = self.is_running() {
            return Err(PidFileError::AlreadyRunning(pid));
        }

        let mut file = File::create(&self.path).map_err(|e| {
            PidFileError::WriteFailed(format!("Failed to create PID file: {}", e))
        })?;

        write!(file, "{}", process::id())
            .map_err(|e| PidFileError::WriteFailed(format!("Failed to write PID: {}", e)))?;

        self.owned = true;
        Ok(())
    }

    /// Release the PID file if this process owns it
    pub fn release(&mut self) -> Result<(), PidFileError> {
        if self.owned && self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                PidFileError::RemoveFailed(format!("Failed to remove PID file: {}", e))
            })?;
        }
        self.owned = false;
        Ok(())
    }
}

impl Default for PidFile {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PidFile {
    fn drop(&mut self) {
        let _ = self.release();
    }
}

/// PID file errors
#[derive(Debug, thiserror::Error)]
pub enum PidFileError {
    #[error("Another watcher is already running (PID: {0})")]
    AlreadyRunning(u32),

    #[error("Failed to write PID file: {0}")]
    WriteFailed(String),

    #[error("Failed to remove PID file: {0}")]
    RemoveFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn custom_path() {
        let pid_file = PidFile::with_path("/custom/path.pid");
        assert_eq!(pid_file.path(), &PathBuf::from("/custom/path.pid"));
    }

    #[test]
    fn default_path_name() {
        assert!(PidFile::new().path().ends_with(PID_FILE_NAME));
    }

    #[test]
    fn is_running_returns_none_for_nonexistent_file() {
        let dir = TempDir::new().unwrap();
        let pid_file = PidFile::with_path(dir.path().join("missing.pid"));
        assert!(pid_file.is_running().is_none());
    }

    #[test]
    fn acquire_and_release() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("watcher.pid");
        let mut pid_file = PidFile::with_path(&path);

        pid_file.acquire().unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, process::id().to_string());

        pid_file.release().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn garbage_pid_file_is_not_running() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("watcher.pid");
        fs::write(&path, "not a pid").unwrap();
        assert!(PidFile::with_path(&path).is_running().is_none());
    }

    #[test]
    fn live_foreign_pid_blocks_acquire() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("watcher.pid");
        // PID 1 always exists
        fs::write(&path, "1").unwrap();

        let mut pid_file = PidFile::with_path(&path);
        assert!(matches!(
            pid_file.acquire(),
            Err(PidFileError::AlreadyRunning(1))
        ));
        drop(pid_file);
        assert!(path.exists());
    }
}
