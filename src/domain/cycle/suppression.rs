//! Suppression window for programmatic clipboard writes

use std::time::{Duration, Instant};

/// A time-bounded acknowledgement of our own clipboard write.
///
/// While active, a clipboard read equal to `echo` is our write coming back
/// and must not be treated as a user copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuppressionWindow {
    echo: String,
    deadline: Instant,
}

impl SuppressionWindow {
    /// Open a window for `echo` lasting `length` from `now`
    pub fn open(echo: impl Into<String>, now: Instant, length: Duration) -> Self {
        Self {
            echo: echo.into(),
            deadline: now + length,
        }
    }

    /// Whether the deadline has not yet passed
    pub fn is_active(&self, now: Instant) -> bool {
        now < self.deadline
    }

    /// Whether `text` read at `now` is the echo of our write
    pub fn suppresses(&self, text: &str, now: Instant) -> bool {
        self.is_active(now) && self.echo == text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suppresses_echo_before_deadline() {
        let now = Instant::now();
        let window = SuppressionWindow::open("a", now, Duration::from_millis(1200));
        assert!(window.suppresses("a", now));
        assert!(window.suppresses("a", now + Duration::from_millis(1199)));
    }

    #[test]
    fn expires_at_deadline() {
        let now = Instant::now();
        let window = SuppressionWindow::open("a", now, Duration::from_millis(1000));
        assert!(!window.is_active(now + Duration::from_millis(1000)));
        assert!(!window.suppresses("a", now + Duration::from_secs(2)));
    }

    #[test]
    fn other_text_is_not_suppressed() {
        let now = Instant::now();
        let window = SuppressionWindow::open("a", now, Duration::from_secs(1));
        assert!(!window.suppresses("b", now));
        assert!(window.suppresses("a", now + Duration::from_millis(999)));
    }
}
