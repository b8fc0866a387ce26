//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces: the system
//! clipboard, the paste keystroke, desktop notifications and the config file.

pub mod clipboard;
pub mod config;
pub mod keystroke;
pub mod notification;

// Re-export adapters
pub use clipboard::{create_clipboard, ArboardClipboard, WaylandClipboard};
pub use config::XdgConfigStore;
pub use keystroke::{create_keystroke, EnigoKeystroke, NoOpKeystroke};
pub use notification::{create_notifier, NoOpNotifier, NotifyRustNotifier};
