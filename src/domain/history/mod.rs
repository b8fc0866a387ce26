//! History domain module

mod snippet;
mod store;

pub use snippet::Snippet;
pub use store::{HistoryStore, ObserveOutcome, DEFAULT_MAX_HISTORY, MAX_HISTORY_LIMIT};
