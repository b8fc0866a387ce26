//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::history::DEFAULT_MAX_HISTORY;
use crate::domain::interval::Interval;

use super::backend::ClipboardBackend;

/// Default preview width in characters
pub const DEFAULT_PREVIEW_WIDTH: usize = 70;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub max_history: Option<usize>,
    pub poll_interval: Option<String>,
    pub advance_window: Option<String>,
    pub select_window: Option<String>,
    pub clear_clipboard: Option<bool>,
    pub cycle: Option<bool>,
    pub notify: Option<bool>,
    pub paste_keystroke: Option<bool>,
    pub preview_width: Option<usize>,
    pub backend: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            max_history: Some(DEFAULT_MAX_HISTORY),
            poll_interval: Some(Interval::default_poll().to_string()),
            advance_window: Some(Interval::default_advance_window().to_string()),
            select_window: Some(Interval::default_select_window().to_string()),
            clear_clipboard: Some(true),
            cycle: Some(false),
            notify: Some(false),
            paste_keystroke: Some(true),
            preview_width: Some(DEFAULT_PREVIEW_WIDTH),
            backend: Some(ClipboardBackend::default().to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            max_history: other.max_history.or(self.max_history),
            poll_interval: other.poll_interval.or(self.poll_interval),
            advance_window: other.advance_window.or(self.advance_window),
            select_window: other.select_window.or(self.select_window),
            clear_clipboard: other.clear_clipboard.or(self.clear_clipboard),
            cycle: other.cycle.or(self.cycle),
            notify: other.notify.or(self.notify),
            paste_keystroke: other.paste_keystroke.or(self.paste_keystroke),
            preview_width: other.preview_width.or(self.preview_width),
            backend: other.backend.or(self.backend),
        }
    }

    /// Get history capacity, or default if not set
    pub fn max_history_or_default(&self) -> usize {
        self.max_history.unwrap_or(DEFAULT_MAX_HISTORY)
    }

    /// Get poll interval as parsed Interval, or default if not set/invalid
    pub fn poll_interval_or_default(&self) -> Interval {
        Self::parse_interval(self.poll_interval.as_deref()).unwrap_or_else(Interval::default_poll)
    }

    /// Get advance suppression window, or default if not set/invalid
    pub fn advance_window_or_default(&self) -> Interval {
        Self::parse_interval(self.advance_window.as_deref())
            .unwrap_or_else(Interval::default_advance_window)
    }

    /// Get select suppression window, or default if not set/invalid
    pub fn select_window_or_default(&self) -> Interval {
        Self::parse_interval(self.select_window.as_deref())
            .unwrap_or_else(Interval::default_select_window)
    }

    /// Get clear_clipboard setting, or true if not set
    pub fn clear_clipboard_or_default(&self) -> bool {
        self.clear_clipboard.unwrap_or(true)
    }

    /// Get cycle setting, or false if not set
    pub fn cycle_or_default(&self) -> bool {
        self.cycle.unwrap_or(false)
    }

    /// Get notify setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }

    /// Get paste_keystroke setting, or true if not set
    pub fn paste_keystroke_or_default(&self) -> bool {
        self.paste_keystroke.unwrap_or(true)
    }

    /// Get preview width, or default if not set
    pub fn preview_width_or_default(&self) -> usize {
        self.preview_width
            .filter(|w| *w > 0)
            .unwrap_or(DEFAULT_PREVIEW_WIDTH)
    }

    /// Get backend as parsed ClipboardBackend, or default if not set/invalid
    pub fn backend_or_default(&self) -> ClipboardBackend {
        self.backend
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Suppression windows that are shorter than two poll intervals.
    ///
    /// Such a window may close before the poll loop ever reads the echo.
    pub fn short_windows(&self) -> Vec<(&'static str, Interval)> {
        let floor = self.poll_interval_or_default().as_millis().saturating_mul(2);
        [
            ("advance_window", self.advance_window_or_default()),
            ("select_window", self.select_window_or_default()),
        ]
        .into_iter()
        .filter(|(_, window)| window.as_millis() < floor)
        .collect()
    }

    fn parse_interval(value: Option<&str>) -> Option<Interval> {
        value.and_then(|s| s.parse().ok())
    }
}
