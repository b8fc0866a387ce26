//! Keystroke port interface

use async_trait::async_trait;
use thiserror::Error;

/// Keystroke errors
#[derive(Debug, Clone, Error)]
pub enum KeystrokeError {
    #[error("Keystroke injection unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to send paste keystroke: {0}")]
    SendFailed(String),
}

/// Port for keystroke injection
#[async_trait]
pub trait Keystroke: Send + Sync {
    /// Press the platform paste shortcut in the currently focused window.
    async fn paste(&self) -> Result<(), KeystrokeError>;
}

/// Blanket implementation for boxed keystroke types
#[async_trait]
impl Keystroke for Box<dyn Keystroke> {
    async fn paste(&self) -> Result<(), KeystrokeError> {
        self.as_ref().paste().await
    }
}
