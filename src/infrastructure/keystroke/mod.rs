//! Keystroke infrastructure module
//!
//! Sends the paste shortcut after a snippet has been placed on the
//! clipboard.

mod enigo;
mod noop;

pub use enigo::EnigoKeystroke;
pub use noop::NoOpKeystroke;

use crate::application::ports::Keystroke;

/// Create the keystroke adapter, or a no-op one when disabled
pub fn create_keystroke(enabled: bool) -> Box<dyn Keystroke> {
    if enabled {
        Box::new(EnigoKeystroke::new())
    } else {
        Box::new(NoOpKeystroke::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_keystroke_is_noop() {
        let keystroke = create_keystroke(false);
        assert!(keystroke.paste().await.is_ok());
    }
}
