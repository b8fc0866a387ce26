//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! the watcher runner and the control client.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod control;
pub mod ctl_cmd;
pub mod ipc;
#[cfg(unix)]
pub mod pid_file;
pub mod presenter;
pub mod signals;
pub mod watcher_app;

// Re-export commonly used types
pub use app::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, CtlAction, WatcherOptions};
pub use ctl_cmd::handle_ctl_command;
pub use presenter::Presenter;
pub use watcher_app::run_watcher;
