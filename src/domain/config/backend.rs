//! Clipboard backend selector

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidBackendError;

/// All available clipboard backends
pub const ALL_BACKENDS: &[ClipboardBackend] = &[ClipboardBackend::Arboard, ClipboardBackend::Wayland];

/// Which clipboard adapter the watcher talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClipboardBackend {
    /// Cross-platform in-process clipboard (arboard)
    #[default]
    Arboard,
    /// wl-paste / wl-copy subprocesses
    Wayland,
}

impl ClipboardBackend {
    /// Get the string identifier for this backend
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Arboard => "arboard",
            Self::Wayland => "wayland",
        }
    }
}

impl FromStr for ClipboardBackend {
    type Err = InvalidBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "arboard" => Ok(Self::Arboard),
            "wayland" | "wl-clipboard" => Ok(Self::Wayland),
            _ => Err(InvalidBackendError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ClipboardBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
