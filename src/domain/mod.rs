//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod cycle;
pub mod error;
pub mod history;
pub mod interval;

// Re-export common types
pub use config::{AppConfig, ClipboardBackend};
pub use cycle::{CycleController, CycleMode, SuppressionWindow};
pub use error::*;
pub use history::{HistoryStore, ObserveOutcome, Snippet};
pub use interval::Interval;
