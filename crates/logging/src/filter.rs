//! crates/logging/src/filter.rs
//! Per-tag minimum level filtering parsed from `tag=level,tag=level` specs.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::level::Level;

/// Filter-side level names. Kept separate from the rendered labels.
const LEVEL_FILTER_NAMES: [&str; 4] = ["debug", "info", "warning", "error"];

pub(crate) const fn level_filter_name(level: Level) -> &'static str {
    LEVEL_FILTER_NAMES[level as usize]
}

pub(crate) fn level_from_filter_name(name: &str) -> Option<Level> {
    LEVEL_FILTER_NAMES
        .iter()
        .position(|candidate| *candidate == name)
        .map(|index| Level::ALL[index])
}

/// Decides whether a log call should be emitted.
///
/// Implementations must be immutable once built: the dispatcher and the
/// process-wide runtime read them concurrently without synchronisation.
pub trait LogFilter {
    /// Reports whether the filter holds no rules.
    fn is_empty(&self) -> bool;

    /// Reports whether a call at `level` carrying `tags` is enabled.
    fn enabled(&self, level: Level, tags: &[&str]) -> bool;
}

impl<F: LogFilter + ?Sized> LogFilter for &F {
    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn enabled(&self, level: Level, tags: &[&str]) -> bool {
        (**self).enabled(level, tags)
    }
}

impl<F: LogFilter + ?Sized> LogFilter for Box<F> {
    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn enabled(&self, level: Level, tags: &[&str]) -> bool {
        (**self).enabled(level, tags)
    }
}

impl<F: LogFilter + ?Sized> LogFilter for std::sync::Arc<F> {
    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn enabled(&self, level: Level, tags: &[&str]) -> bool {
        (**self).enabled(level, tags)
    }
}

/// Reasons a filter specification is rejected by [`TagFilter::try_parse`].
///
/// Indices are 0-based positions of the comma-separated entry.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum FilterSpecError {
    /// The entry has no `=` separator.
    #[error("filter entry {index} ('{entry}') is missing '='")]
    MissingSeparator {
        /// Position of the entry.
        index: usize,
        /// The entry text.
        entry: String,
    },
    /// Nothing precedes the `=`.
    #[error("filter entry {index} has an empty tag")]
    EmptyTag {
        /// Position of the entry.
        index: usize,
    },
    /// Nothing follows the `=`.
    #[error("filter entry {index} for tag '{tag}' has an empty level")]
    EmptyLevel {
        /// Position of the entry.
        index: usize,
        /// Tag named by the entry.
        tag: String,
    },
    /// The level token is not one of `debug`, `info`, `warning`, `error`.
    #[error("filter entry {index} for tag '{tag}' names unknown level '{level}'")]
    UnknownLevel {
        /// Position of the entry.
        index: usize,
        /// Tag named by the entry.
        tag: String,
        /// The rejected level token.
        level: String,
    },
}

/// Mapping from tag to minimum [`Level`], built once from a filter spec.
///
/// An empty filter enables everything. A non-empty filter enables a call only
/// when at least one of its tags is registered and the call's level reaches
/// that tag's threshold; tags the filter does not know are ignored.
///
/// # Examples
///
/// ```
/// use logging::{Level, LogFilter, TagFilter};
///
/// let filter = TagFilter::parse("gc=info,mm=warning");
/// assert!(filter.enabled(Level::Info, &["gc"]));
/// assert!(!filter.enabled(Level::Info, &["mm"]));
/// assert!(!filter.enabled(Level::Error, &["tls"]));
///
/// // A single malformed entry discards the whole specification.
/// assert!(TagFilter::parse("gc=info,mm=loud").is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct TagFilter {
    rules: BTreeMap<String, Level>,
}

impl TagFilter {
    /// Creates a filter without rules.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Parses `spec`, collapsing to the empty filter if any entry is malformed.
    ///
    /// A broken configuration therefore degrades to "log everything" instead
    /// of applying the subset of entries that happened to be valid.
    #[must_use]
    pub fn parse(spec: &str) -> Self {
        match Self::try_parse(spec) {
            Ok(filter) => filter,
            Err(error) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    target: "logging::filter",
                    error = %error,
                    "malformed log filter; all messages are enabled"
                );
                #[cfg(not(feature = "tracing"))]
                let _ = error;
                Self::new()
            }
        }
    }

    /// Parses `spec`, reporting the first malformed entry.
    ///
    /// The empty string yields the empty filter. When a tag appears more than
    /// once the last entry wins.
    pub fn try_parse(spec: &str) -> Result<Self, FilterSpecError> {
        let mut rules = BTreeMap::new();
        if spec.is_empty() {
            return Ok(Self { rules });
        }

        for (index, entry) in spec.split(',').enumerate() {
            let (tag, level) = parse_entry(index, entry)?;
            rules.insert(tag.to_owned(), level);
        }

        Ok(Self { rules })
    }

    /// Number of registered tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Reports whether no rules are registered; see [`LogFilter::is_empty`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Minimum level registered for `tag`, if any.
    #[must_use]
    pub fn threshold(&self, tag: &str) -> Option<Level> {
        self.rules.get(tag).copied()
    }

    /// Iterates over the rules in lexical tag order.
    pub fn rules(&self) -> impl Iterator<Item = (&str, Level)> + '_ {
        self.rules.iter().map(|(tag, level)| (tag.as_str(), *level))
    }
}

fn parse_entry(index: usize, entry: &str) -> Result<(&str, Level), FilterSpecError> {
    let Some((tag, level)) = entry.split_once('=') else {
        return Err(FilterSpecError::MissingSeparator {
            index,
            entry: entry.to_owned(),
        });
    };

    if tag.is_empty() {
        return Err(FilterSpecError::EmptyTag { index });
    }
    if level.is_empty() {
        return Err(FilterSpecError::EmptyLevel {
            index,
            tag: tag.to_owned(),
        });
    }

    let level = level_from_filter_name(level).ok_or_else(|| FilterSpecError::UnknownLevel {
        index,
        tag: tag.to_owned(),
        level: level.to_owned(),
    })?;
    Ok((tag, level))
}

impl LogFilter for TagFilter {
    fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn enabled(&self, level: Level, tags: &[&str]) -> bool {
        if self.rules.is_empty() {
            return true;
        }

        tags.iter()
            .filter_map(|tag| self.rules.get(*tag))
            .any(|threshold| level >= *threshold)
    }
}

impl FromStr for TagFilter {
    type Err = FilterSpecError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        Self::try_parse(spec)
    }
}

impl TryFrom<String> for TagFilter {
    type Error = FilterSpecError;

    fn try_from(spec: String) -> Result<Self, Self::Error> {
        Self::try_parse(&spec)
    }
}

impl From<TagFilter> for String {
    fn from(filter: TagFilter) -> Self {
        filter.to_string()
    }
}

impl fmt::Display for TagFilter {
    /// Renders the canonical spec, which parses back to an equal filter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, (tag, level)) in self.rules().enumerate() {
            if position > 0 {
                f.write_str(",")?;
            }
            write!(f, "{tag}={}", level_filter_name(level))?;
        }
        Ok(())
    }
}
