//! Control protocol between `clip-cycle ctl` and the running watcher
//!
//! One request line per connection, answered by one JSON reply line.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::cycle::CycleMode;

/// Error when a request line is not a known command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown command: \"{0}\"")]
pub struct UnknownCommand(pub String);

/// Command sent to the watcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    Advance,
    Paste,
    Toggle,
    /// 1-based position, newest first
    Select(usize),
    Newest,
    Oldest,
    Clear,
    List,
    Status,
}

impl ControlCommand {
    /// Whether the command can change what the watcher displays
    pub const fn mutates(&self) -> bool {
        !matches!(self, Self::List | Self::Status)
    }
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Advance => write!(f, "advance"),
            Self::Paste => write!(f, "paste"),
            Self::Toggle => write!(f, "toggle"),
            Self::Select(position) => write!(f, "select {}", position),
            Self::Newest => write!(f, "newest"),
            Self::Oldest => write!(f, "oldest"),
            Self::Clear => write!(f, "clear"),
            Self::List => write!(f, "list"),
            Self::Status => write!(f, "status"),
        }
    }
}

impl FromStr for ControlCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();
        let unknown = || UnknownCommand(s.trim().to_string());

        let command = match (name, arg) {
            ("advance", None) => Self::Advance,
            ("paste", None) => Self::Paste,
            ("toggle", None) => Self::Toggle,
            ("select", Some(position)) => {
                Self::Select(position.parse().map_err(|_| unknown())?)
            }
            ("newest", None) => Self::Newest,
            ("oldest", None) => Self::Oldest,
            ("clear", None) => Self::Clear,
            ("list", None) => Self::List,
            ("status", None) => Self::Status,
            _ => return Err(unknown()),
        };

        if parts.next().is_some() {
            return Err(unknown());
        }
        Ok(command)
    }
}

/// Reply sent back to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ControlReply {
    /// Command ran; `message` describes the effect
    Ok { message: String },
    /// Command was rejected or failed
    Error { message: String },
    /// History listing, newest first
    History {
        mode: String,
        position: Option<usize>,
        capacity: usize,
        entries: Vec<String>,
    },
    /// Watcher state summary
    Watcher {
        pid: u32,
        mode: String,
        size: usize,
        capacity: usize,
        position: Option<usize>,
    },
}

impl ControlReply {
    pub fn ok(message: impl Into<String>) -> Self {
        Self::Ok {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Mode string as sent on the wire
    pub fn mode_label(mode: CycleMode) -> String {
        mode.as_str().to_string()
    }

    /// Encode as a single line, without the trailing newline
    pub fn to_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"status":"error","message":"reply encoding failed: {}"}}"#, e)
        })
    }

    /// Decode a reply line
    pub fn from_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_commands() {
        assert_eq!("advance".parse(), Ok(ControlCommand::Advance));
        assert_eq!("paste\n".parse(), Ok(ControlCommand::Paste));
        assert_eq!("  status ".parse(), Ok(ControlCommand::Status));
    }

    #[test]
    fn parse_select_position() {
        assert_eq!("select 4".parse(), Ok(ControlCommand::Select(4)));
        assert!("select".parse::<ControlCommand>().is_err());
        assert!("select x".parse::<ControlCommand>().is_err());
        assert!("select 1 2".parse::<ControlCommand>().is_err());
    }

    #[test]
    fn parse_rejects_unknown_and_extra_args() {
        assert_eq!(
            "cancel".parse::<ControlCommand>(),
            Err(UnknownCommand("cancel".to_string()))
        );
        assert!("toggle now".parse::<ControlCommand>().is_err());
        assert!("".parse::<ControlCommand>().is_err());
    }

    #[test]
    fn display_matches_parse() {
        for command in [
            ControlCommand::Advance,
            ControlCommand::Select(12),
            ControlCommand::Oldest,
        ] {
            assert_eq!(command.to_string().parse(), Ok(command));
        }
    }

    #[test]
    fn only_queries_do_not_mutate() {
        assert!(ControlCommand::Advance.mutates());
        assert!(ControlCommand::Clear.mutates());
        assert!(!ControlCommand::List.mutates());
        assert!(!ControlCommand::Status.mutates());
    }

    #[test]
    fn reply_is_tagged_single_line_json() {
        let line = ControlReply::ok("cycle mode on").to_line();
        assert!(!line.contains('\n'));
        assert_eq!(line, r#"{"status":"ok","message":"cycle mode on"}"#);
    }

    #[test]
    fn history_reply_decodes() {
        let reply = ControlReply::History {
            mode: "on".to_string(),
            position: Some(2),
            capacity: 20,
            entries: vec!["c".to_string(), "b\nline".to_string()],
        };
        let line = reply.to_line();
        assert!(!line.contains('\n'));
        assert_eq!(ControlReply::from_line(&line).unwrap(), reply);
    }
}
