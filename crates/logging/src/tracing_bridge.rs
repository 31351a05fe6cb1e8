//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the tag filter.
//!
//! [`TagLayer`] is a tracing-subscriber layer that feeds `tracing` events
//! through a [`LogFilter`] and hands enabled events, rendered as tagged lines,
//! to a [`Logger`]. The event target supplies the tags: each `::`-separated
//! segment becomes one tag, so `tracing::info!(target: "gc::mark", ...)`
//! logs with tags `["gc", "mark"]`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{LineSink, TagFilter, init_tracing};
//!
//! init_tracing(TagFilter::parse("gc=info"), LineSink::stderr())?;
//!
//! tracing::info!(target: "gc", "collection finished");
//! tracing::debug!(target: "gc", "suppressed by the filter");
//! ```

use std::fmt;

use tracing::{Level as TracingLevel, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

use crate::filter::LogFilter;
use crate::format::{ENTRY_CAPACITY, format_log_entry};
use crate::level::Level;
use crate::logger::Logger;

/// Most target segments turned into tags for a single event.
const MAX_TARGET_TAGS: usize = 8;

/// Tracing layer that routes events through a filter and a logger.
pub struct TagLayer<F, L> {
    filter: F,
    logger: L,
}

impl<F, L> TagLayer<F, L> {
    /// Creates a layer from a filter and the logger that receives its lines.
    #[must_use]
    pub const fn new(filter: F, logger: L) -> Self {
        Self { filter, logger }
    }

    /// Map a tracing level onto the four-level scale; TRACE folds into Debug.
    const fn map_level(level: &TracingLevel) -> Level {
        match *level {
            TracingLevel::ERROR => Level::Error,
            TracingLevel::WARN => Level::Warning,
            TracingLevel::INFO => Level::Info,
            TracingLevel::DEBUG | TracingLevel::TRACE => Level::Debug,
        }
    }
}

/// Splits a tracing target into tags, dropping empty segments.
fn target_tags<'a>(target: &'a str, tags: &mut [&'a str; MAX_TARGET_TAGS]) -> usize {
    let mut count = 0;
    for segment in target.split("::").filter(|segment| !segment.is_empty()) {
        if count == MAX_TARGET_TAGS {
            break;
        }
        tags[count] = segment;
        count += 1;
    }
    count
}

impl<S, F, L> Layer<S> for TagLayer<F, L>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    F: LogFilter + Send + Sync + 'static,
    L: Logger + Send + Sync + 'static,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Self::map_level(metadata.level());

        let mut storage = [""; MAX_TARGET_TAGS];
        let count = target_tags(metadata.target(), &mut storage);
        let tags = &storage[..count];

        if !self.filter.enabled(level, tags) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let mut buffer = [0u8; ENTRY_CAPACITY];
        let line = format_log_entry(&mut buffer, level, tags, format_args!("{visitor}"));
        self.logger.log(level, tags, line);
    }
}

/// Collects the event message followed by any other fields as `name=value`.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
    fields: Vec<(&'static str, String)>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            self.fields.push((field.name(), format!("{value:?}")));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        } else {
            self.fields.push((field.name(), value.to_owned()));
        }
    }
}

impl fmt::Display for MessageVisitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separator = "";
        if let Some(message) = &self.message {
            f.write_str(message)?;
            separator = " ";
        }
        for (name, value) in &self.fields {
            write!(f, "{separator}{name}={value}")?;
            separator = " ";
        }
        Ok(())
    }
}

/// Installs a global tracing subscriber that logs through `filter` and `logger`.
///
/// Fails if a global subscriber is already set.
pub fn init_tracing<F, L>(filter: F, logger: L) -> Result<(), TryInitError>
where
    F: LogFilter + Send + Sync + 'static,
    L: Logger + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(TagLayer::new(filter, logger))
        .try_init()
}
