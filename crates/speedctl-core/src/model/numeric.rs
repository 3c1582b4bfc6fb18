// ── Numeric readings ──

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// A numeric field as the device reported it.
///
/// Radios report values like `Auto` for the channel, so text that doesn't
/// parse is kept verbatim for display instead of being dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Numeric<T> {
    Parsed(T),
    Raw(String),
}

impl<T: FromStr> Numeric<T> {
    /// Parse `text`, keeping it raw when it isn't a `T`.
    pub fn parse(text: &str) -> Self {
        text.trim()
            .parse()
            .map_or_else(|_| Self::Raw(text.to_owned()), Self::Parsed)
    }
}

impl<T> Numeric<T> {
    /// The parsed value, if the device sent a number.
    pub fn parsed(&self) -> Option<&T> {
        match self {
            Self::Parsed(v) => Some(v),
            Self::Raw(_) => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Numeric<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parsed(v) => v.fmt(f),
            Self::Raw(s) => f.write_str(s),
        }
    }
}
