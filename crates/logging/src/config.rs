//! crates/logging/src/config.rs
//! Startup configuration: the filter spec and the sink's newline policy.

use std::env;

use crate::filter::TagFilter;
use crate::line_mode::LineMode;

/// Environment variable holding the filter specification.
pub const FILTER_ENV: &str = "TAGLOG_FILTER";

/// Logging configuration read once at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogConfig {
    /// Filter specification (`tag=level,...`); empty enables everything.
    pub filter: String,
    /// Whether emitted lines are newline terminated.
    pub line_mode: LineMode,
}

impl LogConfig {
    /// Creates a configuration from a filter specification.
    #[must_use]
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            ..Self::default()
        }
    }

    /// Reads the filter specification from [`FILTER_ENV`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_var(FILTER_ENV)
    }

    /// Reads the filter specification from the variable `name`.
    ///
    /// A missing variable, or one that is not valid Unicode, yields an empty
    /// specification.
    #[must_use]
    pub fn from_env_var(name: &str) -> Self {
        Self::with_filter(env::var(name).unwrap_or_default())
    }

    /// Builds the filter, falling back to the empty filter on malformed input.
    #[must_use]
    pub fn build_filter(&self) -> TagFilter {
        TagFilter::parse(&self.filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::LogFilter;
    use crate::level::Level;

    #[test]
    fn default_config_enables_everything() {
        let config = LogConfig::default();
        assert!(config.filter.is_empty());
        assert_eq!(config.line_mode, LineMode::WithNewline);
        assert!(config.build_filter().enabled(Level::Debug, &["any"]));
    }

    #[test]
    fn build_filter_parses_spec() {
        let filter = LogConfig::with_filter("gc=warning").build_filter();
        assert_eq!(filter.threshold("gc"), Some(Level::Warning));
    }

    #[test]
    fn build_filter_fails_closed() {
        assert!(LogConfig::with_filter("gc=loud").build_filter().is_empty());
    }

    #[test]
    fn missing_variable_yields_empty_spec() {
        let config = LogConfig::from_env_var("TAGLOG_TEST_VARIABLE_THAT_IS_NEVER_SET");
        assert_eq!(config, LogConfig::default());
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn config_round_trips_through_json() {
            let config = LogConfig {
                filter: "gc=info".into(),
                line_mode: LineMode::WithoutNewline,
            };
            let json = serde_json::to_string(&config).unwrap();
            let expected = r#"{"filter":"gc=info","line_mode":"without-newline"}"#;
            assert_eq!(json, expected);

            let decoded: LogConfig = serde_json::from_str(&json).unwrap();
            assert_eq!(decoded, config);
        }

        #[test]
        fn missing_fields_take_defaults() {
            let decoded: LogConfig = serde_json::from_str("{}").unwrap();
            assert_eq!(decoded, LogConfig::default());
        }
    }
}
