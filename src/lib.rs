//! clip-cycle - clipboard history with paste cycling
//!
//! Watches the system clipboard, keeps a bounded most-recently-used history
//! of text snippets, and lets each paste trigger cycle through it.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: History store, cycle controller, suppression window, config values
//! - **Application**: Clipboard session, poll loop and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (arboard, wl-clipboard, enigo, notify-rust)
//! - **CLI**: Argument parsing, watcher loop, control IPC and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
