//! No-op keystroke adapter

use async_trait::async_trait;

use crate::application::ports::{Keystroke, KeystrokeError};

/// Keystroke adapter used when `paste_keystroke` is disabled
///
/// The clipboard still receives the selected snippet; the user pastes it.
pub struct NoOpKeystroke;

impl NoOpKeystroke {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpKeystroke {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Keystroke for NoOpKeystroke {
    async fn paste(&self) -> Result<(), KeystrokeError> {
        Ok(())
    }
}
