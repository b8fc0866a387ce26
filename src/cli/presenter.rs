//! CLI presenter for output formatting

use colored::*;

/// Shown for an empty history
const EMPTY_HISTORY: &str = "(history is empty)";

/// Presenter for CLI output formatting
#[derive(Debug, Default)]
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print watcher status
    pub fn watcher_status(&self, state: &str) {
        eprintln!("{} Watcher: {}", "●".cyan(), state);
    }

    /// Print a key-value pair (for config list and status)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print the history, newest first, highlighting the cursor.
    ///
    /// `previews` are already truncated; `position` is 1-based.
    pub fn history(&self, previews: &[String], position: Option<usize>, mode: &str, capacity: usize) {
        println!(
            "{}",
            Self::history_header(previews.len(), capacity, mode).bold()
        );

        if previews.is_empty() {
            println!("  {}", EMPTY_HISTORY.dimmed());
            return;
        }

        for (index, preview) in previews.iter().enumerate() {
            let line_position = index + 1;
            let is_cursor = position == Some(line_position);
            let line = Self::history_line(line_position, preview, is_cursor);
            if is_cursor {
                println!("{}", line.cyan().bold());
            } else {
                println!("{}", line);
            }
        }
    }

    /// Header line above the history listing
    pub fn history_header(size: usize, capacity: usize, mode: &str) -> String {
        format!("History {}/{} | cycle {}", size, capacity, mode)
    }

    /// One history row without colors
    pub fn history_line(position: usize, preview: &str, is_cursor: bool) -> String {
        let marker = if is_cursor { "▶" } else { " " };
        format!("{} {:>3}  {}", marker, position, preview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_line_marks_cursor() {
        assert_eq!(Presenter::history_line(1, "hello", true), "▶   1  hello");
        assert_eq!(Presenter::history_line(12, "x", false), "   12  x");
    }

    #[test]
    fn history_header_shows_fill_and_mode() {
        assert_eq!(
            Presenter::history_header(3, 20, "on"),
            "History 3/20 | cycle on"
        );
    }
}
