//! Cycle controller state machine

use std::fmt;

use crate::domain::error::SelectionOutOfRange;

/// Whether paste triggers advance through history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CycleMode {
    #[default]
    Off,
    On,
}

impl CycleMode {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
        }
    }
}

impl From<bool> for CycleMode {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::On
        } else {
            Self::Off
        }
    }
}

impl fmt::Display for CycleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cursor bookkeeping for re-injecting history entries.
///
/// All indices are storage indices (oldest-first). The controller never
/// touches the clipboard itself: each operation returns the index whose
/// snippet the caller must write.
///
/// Transitions:
///   advance (first after reset)  -> cursor = 0, sequence started
///   advance (sequence started)   -> cursor = (cursor + 1) mod size
///   select / newest / oldest     -> cursor = target, sequence not started
///   toggle / reset               -> cursor unset, sequence not started
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleController {
    enabled: bool,
    cursor: Option<usize>,
    sequence_started: bool,
}

impl CycleController {
    /// Create a controller with cycle mode disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether cycle mode is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current cycle mode
    pub fn mode(&self) -> CycleMode {
        CycleMode::from(self.enabled)
    }

    /// Current cursor, if set
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Whether an advance sequence is in progress
    pub fn sequence_started(&self) -> bool {
        self.sequence_started
    }

    /// Flip cycle mode and forget the cursor. Returns the new mode.
    pub fn toggle_enabled(&mut self) -> CycleMode {
        self.set_enabled(!self.enabled);
        self.mode()
    }

    /// Set cycle mode explicitly and forget the cursor
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.reset();
    }

    /// Forget the cursor and any running sequence
    pub fn reset(&mut self) {
        self.cursor = None;
        self.sequence_started = false;
    }

    /// Move to the next entry of a history holding `size` snippets.
    ///
    /// Returns `None` when cycle mode is off or the history is empty.
    pub fn advance(&mut self, size: usize) -> Option<usize> {
        if !self.enabled || size == 0 {
            return None;
        }

        let next = match (self.sequence_started, self.cursor) {
            (true, Some(cursor)) => (cursor + 1) % size,
            _ => 0,
        };
        self.cursor = Some(next);
        self.sequence_started = true;
        Some(next)
    }

    /// Point the cursor at an explicit storage index
    pub fn select_explicit(
        &mut self,
        storage_index: usize,
        size: usize,
    ) -> Result<usize, SelectionOutOfRange> {
        if storage_index >= size {
            return Err(SelectionOutOfRange {
                index: storage_index,
                size,
            });
        }
        self.cursor = Some(storage_index);
        self.sequence_started = false;
        Ok(storage_index)
    }

    /// Point the cursor at the newest entry
    pub fn reset_to_newest(&mut self, size: usize) -> Option<usize> {
        let newest = size.checked_sub(1)?;
        self.cursor = Some(newest);
        self.sequence_started = false;
        Some(newest)
    }

    /// Point the cursor at the oldest entry
    pub fn reset_to_oldest(&mut self, size: usize) -> Option<usize> {
        if size == 0 {
            return None;
        }
        self.cursor = Some(0);
        self.sequence_started = false;
        Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled() -> CycleController {
        let mut controller = CycleController::new();
        controller.toggle_enabled();
        controller
    }

    #[test]
    fn new_controller_is_disabled_and_unset() {
        let controller = CycleController::new();
        assert!(!controller.is_enabled());
        assert_eq!(controller.cursor(), None);
        assert!(!controller.sequence_started());
    }

    #[test]
    fn advance_when_disabled_is_noop() {
        let mut controller = CycleController::new();
        assert_eq!(controller.advance(3), None);
        assert_eq!(controller.cursor(), None);
        assert!(!controller.sequence_started());
    }

    #[test]
    fn advance_on_empty_history_is_noop() {
        let mut controller = enabled();
        assert_eq!(controller.advance(0), None);
        assert_eq!(controller.cursor(), None);
    }

    #[test]
    fn advance_starts_at_oldest_then_wraps() {
        let mut controller = enabled();
        let picks: Vec<_> = (0..4).map(|_| controller.advance(3).unwrap()).collect();
        assert_eq!(picks, vec![0, 1, 2, 0]);
        assert!(controller.sequence_started());
    }

    #[test]
    fn toggle_resets_sequence() {
        let mut controller = enabled();
        controller.advance(3);
        controller.advance(3);
        assert_eq!(controller.toggle_enabled(), CycleMode::Off);
        assert_eq!(controller.cursor(), None);
        assert!(!controller.sequence_started());

        controller.toggle_enabled();
        assert_eq!(controller.advance(3), Some(0));
    }

    #[test]
    fn select_explicit_sets_cursor_without_sequence() {
        let mut controller = enabled();
        controller.advance(3);
        assert_eq!(controller.select_explicit(2, 3), Ok(2));
        assert_eq!(controller.cursor(), Some(2));
        assert!(!controller.sequence_started());

        // next advance restarts from the oldest entry
        assert_eq!(controller.advance(3), Some(0));
    }

    #[test]
    fn select_explicit_works_when_disabled() {
        let mut controller = CycleController::new();
        assert_eq!(controller.select_explicit(1, 2), Ok(1));
    }

    #[test]
    fn select_explicit_out_of_range_leaves_state() {
        let mut controller = enabled();
        controller.advance(3);
        let err = controller.select_explicit(3, 3).unwrap_err();
        assert_eq!(err, SelectionOutOfRange { index: 3, size: 3 });
        assert_eq!(controller.cursor(), Some(0));
        assert!(controller.sequence_started());
    }

    #[test]
    fn reset_to_newest_and_oldest() {
        let mut controller = CycleController::new();
        assert_eq!(controller.reset_to_newest(4), Some(3));
        assert_eq!(controller.cursor(), Some(3));
        assert_eq!(controller.reset_to_oldest(4), Some(0));
        assert_eq!(controller.cursor(), Some(0));
        assert!(!controller.sequence_started());
    }

    #[test]
    fn reset_on_empty_history_is_noop() {
        let mut controller = CycleController::new();
        assert_eq!(controller.reset_to_newest(0), None);
        assert_eq!(controller.reset_to_oldest(0), None);
        assert_eq!(controller.cursor(), None);
    }

    #[test]
    fn advance_tolerates_shrunken_history() {
        let mut controller = enabled();
        controller.advance(5);
        controller.advance(5);
        controller.advance(5);
        // cursor = 2, history shrank to 2 entries
        assert_eq!(controller.advance(2), Some(1));
    }

    #[test]
    fn mode_display() {
        assert_eq!(CycleMode::On.to_string(), "on");
        assert_eq!(CycleMode::Off.to_string(), "off");
        assert_eq!(CycleMode::from(true), CycleMode::On);
    }
}
