//! CLI argument definitions using Clap

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::config::ClipboardBackend;
use crate::domain::interval::Interval;

use super::control::ControlCommand;

/// clip-cycle - clipboard history with paste cycling
#[derive(Parser, Debug)]
#[command(name = "clip-cycle")]
#[command(version)]
#[command(about = "Clipboard history watcher that cycles through recent snippets on paste")]
#[command(long_about = None)]
pub struct Cli {
    /// Number of snippets kept in history (1-1000)
    #[arg(short = 'm', long, value_name = "N")]
    pub max_history: Option<usize>,

    /// Clipboard polling interval (e.g., 500ms, 1s)
    #[arg(short = 'p', long, value_name = "TIME")]
    pub poll_interval: Option<String>,

    /// Clipboard backend
    #[arg(short = 'b', long, value_name = "BACKEND")]
    pub backend: Option<BackendArg>,

    /// Start with cycle mode enabled
    #[arg(short = 'c', long)]
    pub cycle: bool,

    /// Show desktop notifications on mode changes
    #[arg(short = 'n', long)]
    pub notify: bool,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Send a command to the running watcher
    Ctl {
        #[command(subcommand)]
        action: CtlAction,
    },
}

/// Watcher control actions
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtlAction {
    /// Advance the cycle cursor and put its snippet on the clipboard
    Advance,
    /// Advance, then send the paste keystroke to the focused window
    Paste,
    /// Turn cycle mode on or off
    Toggle,
    /// Put the snippet at a history position on the clipboard
    Select {
        /// Position in history, 1 = newest
        position: usize,
    },
    /// Jump to the newest snippet
    Newest,
    /// Jump to the oldest snippet
    Oldest,
    /// Forget all snippets
    Clear,
    /// Print the history, newest first
    List,
    /// Show watcher status
    Status,
}

impl From<CtlAction> for ControlCommand {
    fn from(action: CtlAction) -> Self {
        match action {
            CtlAction::Advance => ControlCommand::Advance,
            CtlAction::Paste => ControlCommand::Paste,
            CtlAction::Toggle => ControlCommand::Toggle,
            CtlAction::Select { position } => ControlCommand::Select(position),
            CtlAction::Newest => ControlCommand::Newest,
            CtlAction::Oldest => ControlCommand::Oldest,
            CtlAction::Clear => ControlCommand::Clear,
            CtlAction::List => ControlCommand::List,
            CtlAction::Status => ControlCommand::Status,
        }
    }
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Backend argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    Arboard,
    Wayland,
}

impl From<BackendArg> for ClipboardBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Arboard => ClipboardBackend::Arboard,
            BackendArg::Wayland => ClipboardBackend::Wayland,
        }
    }
}

/// Parsed watcher options
#[derive(Debug, Clone)]
pub struct WatcherOptions {
    pub max_history: usize,
    pub poll_interval: Interval,
    pub advance_window: Interval,
    pub select_window: Interval,
    pub clear_clipboard: bool,
    pub cycle: bool,
    pub notify: bool,
    pub paste_keystroke: bool,
    pub preview_width: usize,
    pub backend: ClipboardBackend,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "max_history",
    "poll_interval",
    "advance_window",
    "select_window",
    "clear_clipboard",
    "cycle",
    "notify",
    "paste_keystroke",
    "preview_width",
    "backend",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
