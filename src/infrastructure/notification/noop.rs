//! No-op notifier

use async_trait::async_trait;

use crate::application::ports::{NotificationError, NotificationIcon, Notifier};

/// Notifier used when desktop notifications are turned off
#[derive(Debug, Default)]
pub struct NoOpNotifier;

#[async_trait]
impl Notifier for NoOpNotifier {
    async fn notify(
        &self,
        _title: &str,
        _message: &str,
        _icon: NotificationIcon,
    ) -> Result<(), NotificationError> {
        Ok(())
    }
}
