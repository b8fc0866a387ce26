//! Domain error types

use thiserror::Error;

/// Error when parsing an interval string
#[derive(Debug, Clone, Error)]
#[error("Invalid interval format: \"{input}\". Expected <number>ms, <number>s, <number>m or a combination (e.g., 500ms, 2s, 1s200ms)")]
pub struct IntervalParseError {
    pub input: String,
}

/// Text that is empty or whitespace-only and therefore not a snippet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Snippet text is empty or whitespace-only")]
pub struct EmptySnippet;

/// Error when a history capacity is out of bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid history capacity {requested}: must be between 1 and {max}")]
pub struct InvalidCapacity {
    pub requested: usize,
    pub max: usize,
}

/// Error when an explicit selection points outside the history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Selection {index} is out of range (history holds {size} item(s))")]
pub struct SelectionOutOfRange {
    pub index: usize,
    pub size: usize,
}

/// Error when an invalid clipboard backend name is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid backend: \"{input}\". Valid backends are: arboard, wayland")]
pub struct InvalidBackendError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
