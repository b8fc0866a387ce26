//! Notification infrastructure module
//!
//! Desktop notifications via notify-rust, or nothing when disabled.

mod noop;
mod notify_rust;

pub use noop::NoOpNotifier;
pub use notify_rust::NotifyRustNotifier;

use crate::application::ports::Notifier;

/// Create the notifier for the `notify` setting
pub fn create_notifier(enabled: bool) -> Box<dyn Notifier> {
    if enabled {
        Box::new(NotifyRustNotifier::new())
    } else {
        Box::new(NoOpNotifier)
    }
}
