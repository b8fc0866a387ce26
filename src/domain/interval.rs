//! Interval value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::IntervalParseError;

/// Default clipboard polling interval (500 milliseconds)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Default suppression window after a cycle advance (1.2 seconds)
pub const DEFAULT_ADVANCE_WINDOW_MS: u64 = 1200;

/// Default suppression window after an explicit selection (1 second)
pub const DEFAULT_SELECT_WINDOW_MS: u64 = 1000;

/// Value object representing a short time span such as a polling interval
/// or a suppression window. Immutable, validated on creation, never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    milliseconds: u64,
}

impl Interval {
    /// Create an Interval from milliseconds
    pub const fn from_millis(ms: u64) -> Self {
        Self { milliseconds: ms }
    }

    /// Create an Interval from seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            milliseconds: secs * 1000,
        }
    }

    /// Default polling interval
    pub const fn default_poll() -> Self {
        Self::from_millis(DEFAULT_POLL_INTERVAL_MS)
    }

    /// Default suppression window for cycle advances
    pub const fn default_advance_window() -> Self {
        Self::from_millis(DEFAULT_ADVANCE_WINDOW_MS)
    }

    /// Default suppression window for explicit selections and resets
    pub const fn default_select_window() -> Self {
        Self::from_millis(DEFAULT_SELECT_WINDOW_MS)
    }

    /// Get interval in milliseconds
    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.milliseconds)
    }
}

impl FromStr for Interval {
    type Err = IntervalParseError;

    /// Parse an interval string.
    /// Supported formats: "500ms", "2s", "1m", "1s200ms"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        let err = || IntervalParseError {
            input: s.to_string(),
        };

        let mut total_ms: u64 = 0;
        let mut current_num = String::new();
        let mut found_any = false;
        let mut chars = input.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch.is_ascii_digit() {
                current_num.push(ch);
                continue;
            }
            if current_num.is_empty() {
                return Err(err());
            }
            let value: u64 = current_num.parse().map_err(|_| err())?;
            let factor = match ch {
                'm' if chars.peek() == Some(&'s') => {
                    chars.next();
                    1
                }
                'm' => 60_000,
                's' => 1000,
                _ => return Err(err()),
            };
            total_ms = value
                .checked_mul(factor)
                .and_then(|ms| total_ms.checked_add(ms))
                .ok_or_else(err)?;
            current_num.clear();
            found_any = true;
        }

        if !current_num.is_empty() || !found_any || total_ms == 0 {
            return Err(err());
        }

        Ok(Self {
            milliseconds: total_ms,
        })
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.milliseconds;
        if ms % 60_000 == 0 {
            write!(f, "{}m", ms / 60_000)
        } else if ms % 1000 == 0 {
            write!(f, "{}s", ms / 1000)
        } else {
            write!(f, "{}ms", ms)
        }
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::default_poll()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_milliseconds() {
        let i: Interval = "500ms".parse().unwrap();
        assert_eq!(i.as_millis(), 500);
    }

    #[test]
    fn parse_seconds() {
        let i: Interval = "2s".parse().unwrap();
        assert_eq!(i.as_millis(), 2000);
    }

    #[test]
    fn parse_minutes() {
        let i: Interval = "1m".parse().unwrap();
        assert_eq!(i.as_millis(), 60_000);
    }

    #[test]
    fn parse_combined() {
        let i: Interval = "1s200ms".parse().unwrap();
        assert_eq!(i.as_millis(), 1200);

        let i: Interval = "1m30s".parse().unwrap();
        assert_eq!(i.as_millis(), 90_000);
    }

    #[test]
    fn parse_case_insensitive_and_trimmed() {
        let i: Interval = "  750MS ".parse().unwrap();
        assert_eq!(i.as_millis(), 750);
    }

    #[test]
    fn parse_invalid() {
        assert!("".parse::<Interval>().is_err());
        assert!("500".parse::<Interval>().is_err());
        assert!("ms".parse::<Interval>().is_err());
        assert!("5x".parse::<Interval>().is_err());
        assert!("0ms".parse::<Interval>().is_err());
    }

    #[test]
    fn display_picks_largest_whole_unit() {
        assert_eq!(Interval::from_millis(500).to_string(), "500ms");
        assert_eq!(Interval::from_millis(1200).to_string(), "1200ms");
        assert_eq!(Interval::from_secs(2).to_string(), "2s");
        assert_eq!(Interval::from_secs(120).to_string(), "2m");
    }

    #[test]
    fn display_parses_back() {
        for ms in [250, 1200, 3000, 60_000] {
            let i = Interval::from_millis(ms);
            assert_eq!(i.to_string().parse::<Interval>().unwrap(), i);
        }
    }

    #[test]
    fn default_values() {
        assert_eq!(Interval::default_poll().as_millis(), 500);
        assert_eq!(Interval::default_advance_window().as_millis(), 1200);
        assert_eq!(Interval::default_select_window().as_millis(), 1000);
        assert_eq!(Interval::default_poll().as_std(), StdDuration::from_millis(500));
    }
}
