//! Bounded, de-duplicated history of snippets

use std::collections::VecDeque;
use std::fmt;

use crate::domain::error::InvalidCapacity;

use super::snippet::Snippet;

/// Default number of snippets kept in history
pub const DEFAULT_MAX_HISTORY: usize = 20;

/// Upper bound accepted for a configured capacity
pub const MAX_HISTORY_LIMIT: usize = 1000;

/// Result of offering text to the history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObserveOutcome {
    /// Text was new and appended as the newest entry
    Added,
    /// Text was already present and moved to the newest position
    Promoted,
    /// Text was empty or whitespace-only; history untouched
    Ignored,
}

impl ObserveOutcome {
    /// Whether the history was mutated
    pub const fn is_mutation(&self) -> bool {
        matches!(self, Self::Added | Self::Promoted)
    }

    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Promoted => "promoted",
            Self::Ignored => "ignored",
        }
    }
}

impl fmt::Display for ObserveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// History store entity.
///
/// Stores snippets oldest-first. Invariants:
///   - no two entries are equal
///   - length never exceeds capacity
///   - re-observing a present snippet moves it to the newest end
///   - overflow evicts from the oldest end
#[derive(Debug, Clone)]
pub struct HistoryStore {
    entries: VecDeque<Snippet>,
    capacity: usize,
}

impl HistoryStore {
    /// Create an empty store with the given capacity
    pub fn new(capacity: usize) -> Result<Self, InvalidCapacity> {
        if capacity == 0 || capacity > MAX_HISTORY_LIMIT {
            return Err(InvalidCapacity {
                requested: capacity,
                max: MAX_HISTORY_LIMIT,
            });
        }
        Ok(Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        })
    }

    /// Offer clipboard text to the history
    pub fn observe(&mut self, text: &str) -> ObserveOutcome {
        let Ok(snippet) = Snippet::new(text) else {
            return ObserveOutcome::Ignored;
        };

        let outcome = match self.position(&snippet) {
            Some(index) => {
                self.entries.remove(index);
                ObserveOutcome::Promoted
            }
            None => ObserveOutcome::Added,
        };
        self.entries.push_back(snippet);

        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }

        outcome
    }

    /// Remove every snippet
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Copy of the history, newest first
    pub fn snapshot_newest_first(&self) -> Vec<Snippet> {
        self.entries.iter().rev().cloned().collect()
    }

    /// Iterate oldest first (storage order)
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Snippet> {
        self.entries.iter()
    }

    /// Snippet at a storage (oldest-first) index
    pub fn get(&self, storage_index: usize) -> Option<&Snippet> {
        self.entries.get(storage_index)
    }

    /// Most recently observed snippet
    pub fn newest(&self) -> Option<&Snippet> {
        self.entries.back()
    }

    /// Least recently observed snippet
    pub fn oldest(&self) -> Option<&Snippet> {
        self.entries.front()
    }

    /// Number of snippets held
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Check if the history is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of snippets held
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Convert a storage index to its newest-first display index
    pub fn display_index(&self, storage_index: usize) -> Option<usize> {
        (storage_index < self.size()).then(|| self.size() - 1 - storage_index)
    }

    /// Convert a newest-first display index to its storage index
    pub fn storage_index(&self, display_index: usize) -> Option<usize> {
        (display_index < self.size()).then(|| self.size() - 1 - display_index)
    }

    fn position(&self, snippet: &Snippet) -> Option<usize> {
        self.entries.iter().position(|s| s == snippet)
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self {
            entries: VecDeque::with_capacity(DEFAULT_MAX_HISTORY + 1),
            capacity: DEFAULT_MAX_HISTORY,
        }
    }
}
