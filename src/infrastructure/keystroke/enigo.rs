//! Cross-platform paste keystroke using enigo
//!
//! Works on Windows, macOS, and Linux (X11).

use async_trait::async_trait;

use crate::application::ports::{Keystroke, KeystrokeError};

/// Modifier held for the paste shortcut on this platform
#[cfg(target_os = "macos")]
const PASTE_MODIFIER: enigo::Key = enigo::Key::Meta;
#[cfg(not(target_os = "macos"))]
const PASTE_MODIFIER: enigo::Key = enigo::Key::Control;

/// Paste keystroke adapter using enigo
pub struct EnigoKeystroke;

impl EnigoKeystroke {
    /// Create a new enigo keystroke adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnigoKeystroke {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Keystroke for EnigoKeystroke {
    async fn paste(&self) -> Result<(), KeystrokeError> {
        // enigo operations are blocking, so run in spawn_blocking
        tokio::task::spawn_blocking(move || {
            use enigo::{Direction, Enigo, Key, Keyboard, Settings};

            let mut enigo = Enigo::new(&Settings::default()).map_err(|e| {
                KeystrokeError::Unavailable(format!("Failed to create enigo: {}", e))
            })?;

            let send = |e: enigo::InputError| KeystrokeError::SendFailed(e.to_string());

            enigo.key(PASTE_MODIFIER, Direction::Press).map_err(send)?;
            let clicked = enigo.key(Key::Unicode('v'), Direction::Click);
            // release the modifier even when the click failed
            let released = enigo.key(PASTE_MODIFIER, Direction::Release);
            clicked.map_err(send)?;
            released.map_err(send)
        })
        .await
        .map_err(|e| KeystrokeError::SendFailed(format!("Task join error: {}", e)))?
    }
}
