//! Snippet value object

use std::fmt;

use crate::domain::error::EmptySnippet;

/// A piece of copied text held in history.
///
/// Never empty or whitespace-only; two snippets are the same snippet when
/// their text is equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snippet(String);

impl Snippet {
    /// Validate and wrap clipboard text
    pub fn new(text: impl Into<String>) -> Result<Self, EmptySnippet> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(EmptySnippet);
        }
        Ok(Self(text))
    }

    /// Borrow the snippet text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the snippet, returning its text
    pub fn into_string(self) -> String {
        self.0
    }

    /// Single-line preview limited to `max_chars` characters.
    ///
    /// Line breaks and tabs are flattened to spaces; truncated previews end
    /// with "...".
    pub fn preview(&self, max_chars: usize) -> String {
        let flat: String = self
            .0
            .chars()
            .map(|c| if c.is_whitespace() { ' ' } else { c })
            .collect();

        if flat.chars().count() <= max_chars {
            flat
        } else {
            let mut cut: String = flat.chars().take(max_chars).collect();
            cut.push_str("...");
            cut
        }
    }
}

impl AsRef<str> for Snippet {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Snippet {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Snippet {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Snippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_whitespace() {
        assert_eq!(Snippet::new(""), Err(EmptySnippet));
        assert_eq!(Snippet::new("   "), Err(EmptySnippet));
        assert_eq!(Snippet::new("\n\t "), Err(EmptySnippet));
    }

    #[test]
    fn keeps_surrounding_whitespace() {
        let snippet = Snippet::new("  padded  ").unwrap();
        assert_eq!(snippet.as_str(), "  padded  ");
    }

    #[test]
    fn equality_is_by_value() {
        assert_eq!(Snippet::new("abc").unwrap(), Snippet::new("abc").unwrap());
        assert_ne!(Snippet::new("abc").unwrap(), Snippet::new("abd").unwrap());
        assert_eq!(Snippet::new("abc").unwrap(), "abc");
    }

    #[test]
    fn preview_short_text_unchanged() {
        let snippet = Snippet::new("hello").unwrap();
        assert_eq!(snippet.preview(70), "hello");
    }

    #[test]
    fn preview_truncates_with_ellipsis() {
        let snippet = Snippet::new("a".repeat(80)).unwrap();
        let preview = snippet.preview(70);
        assert_eq!(preview.len(), 73);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn preview_flattens_newlines() {
        let snippet = Snippet::new("line one\nline two").unwrap();
        assert_eq!(snippet.preview(70), "line one line two");
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        let snippet = Snippet::new("héllo wörld").unwrap();
        assert_eq!(snippet.preview(5), "héllo...");
    }
}
