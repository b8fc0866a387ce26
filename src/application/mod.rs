//! Application layer - Use cases and port interfaces
//!
//! Contains the clipboard session (history, cycle cursor and suppression
//! under one lock), the polling loop that feeds it, and the trait
//! definitions for external system interactions.

pub mod poll;
pub mod ports;
pub mod session;

// Re-export use cases
pub use poll::{PollLoop, SessionEvent};
pub use session::{
    ClearOutcome, ClipboardSession, Injection, PollOutcome, SessionConfig, SessionError, SessionSnapshot,
};
