//! Notification port interface

use async_trait::async_trait;
use thiserror::Error;

/// Notification errors
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("Failed to show notification: {0}")]
    SendFailed(String),
}

/// Icon shown with a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationIcon {
    /// History changes such as clear
    Info,
    /// Cycle mode changes
    Clipboard,
}

impl NotificationIcon {
    /// Freedesktop icon name
    pub const fn icon_name(&self) -> &'static str {
        match self {
            Self::Info => "dialog-information",
            Self::Clipboard => "edit-paste",
        }
    }
}

/// Port for desktop notifications about watcher state changes
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Show a desktop notification.
    async fn notify(
        &self,
        title: &str,
        message: &str,
        icon: NotificationIcon,
    ) -> Result<(), NotificationError>;
}

/// Blanket implementation for boxed notifier types
#[async_trait]
impl Notifier for Box<dyn Notifier> {
    async fn notify(
        &self,
        title: &str,
        message: &str,
        icon: NotificationIcon,
    ) -> Result<(), NotificationError> {
        self.as_ref().notify(title, message, icon).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_names_are_freedesktop_names() {
        assert_eq!(NotificationIcon::Clipboard.icon_name(), "edit-paste");
        assert_eq!(NotificationIcon::Info.icon_name(), "dialog-information");
    }
}
