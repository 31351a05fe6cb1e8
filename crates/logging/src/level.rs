//! crates/logging/src/level.rs
//! Severity levels attached to every log call.

use std::fmt;
use std::str::FromStr;

use crate::filter::level_from_filter_name;
use crate::format::level_label;

/// Ordered severity of a log call.
///
/// Variants compare by severity (`Debug < Info < Warning < Error`), never by
/// name. The name accepted in filter specifications (`warning`) and the name
/// rendered into log lines (`WARN`) are deliberately different; see
/// [`Level::filter_name`] and [`Level::label`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Level {
    /// Verbose diagnostics.
    Debug,
    /// Regular informational output.
    Info,
    /// Something unexpected that does not stop the program.
    Warning,
    /// A failure.
    Error,
}

impl Level {
    /// Every level, from least to most severe.
    pub const ALL: [Self; 4] = [Self::Debug, Self::Info, Self::Warning, Self::Error];

    /// Label written into rendered log lines (`DEBUG`, `INFO`, `WARN`, `ERROR`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        level_label(self)
    }

    /// Token accepted for this level in a filter specification.
    #[must_use]
    pub const fn filter_name(self) -> &'static str {
        crate::filter::level_filter_name(self)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a token does not name a [`Level`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown log level '{token}' (expected debug, info, warning or error)")]
pub struct ParseLevelError {
    token: String,
}

impl ParseLevelError {
    /// The rejected token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Parses the lowercase filter-side name (`debug`, `info`, `warning`, `error`).
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        level_from_filter_name(text).ok_or_else(|| ParseLevelError {
            token: text.to_owned(),
        })
    }
}
