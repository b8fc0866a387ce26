//! Clipboard infrastructure module
//!
//! Provides cross-platform clipboard support using arboard (primary)
//! or wl-clipboard tools on Wayland.

mod arboard;
mod wayland;

pub use arboard::ArboardClipboard;
pub use wayland::WaylandClipboard;

use crate::application::ports::ClipboardPort;
use crate::domain::config::ClipboardBackend;

/// Create the clipboard adapter for the configured backend
pub fn create_clipboard(backend: ClipboardBackend) -> Box<dyn ClipboardPort> {
    match backend {
        ClipboardBackend::Arboard => Box::new(ArboardClipboard::new()),
        ClipboardBackend::Wayland => Box::new(WaylandClipboard::new()),
    }
}
