//! Integration tests for routing `tracing` events through the tag filter.

use std::sync::Arc;

use logging::{Level, RecordingLogger, TagFilter, TagLayer};
use tracing_subscriber::layer::SubscriberExt;

fn with_layer(spec: &str, body: impl FnOnce()) -> Vec<logging::LogRecord> {
    let logger = Arc::new(RecordingLogger::new());
    let subscriber = tracing_subscriber::registry()
        .with(TagLayer::new(TagFilter::parse(spec), Arc::clone(&logger)));
    tracing::subscriber::with_default(subscriber, body);
    logger.drain()
}

/// Verifies event targets become tags and enabled events are rendered.
#[test]
fn target_segments_become_tags() {
    let records = with_layer("gc=info", || {
        tracing::info!(target: "gc::mark", "marked {} roots", 4);
    });

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, Level::Info);
    assert_eq!(records[0].tags, vec!["gc", "mark"]);
    assert_eq!(records[0].text, "[INFO][gc,mark] marked 4 roots");
}

/// Verifies the filter suppresses events below a tag's threshold.
#[test]
fn filter_thresholds_apply_to_events() {
    let records = with_layer("gc=warning", || {
        tracing::debug!(target: "gc", "too verbose");
        tracing::info!(target: "gc", "still too verbose");
        tracing::warn!(target: "gc", "kept");
        tracing::error!(target: "mm", "unknown tag");
    });

    let texts: Vec<_> = records.into_iter().map(|record| record.text).collect();
    assert_eq!(texts, vec!["[WARN][gc] kept"]);
}

/// Verifies structured fields follow the message.
#[test]
fn fields_are_appended_to_the_message() {
    let records = with_layer("", || {
        tracing::error!(target: "tls", slot = 3, "release failed");
    });

    assert_eq!(records[0].text, "[ERROR][tls] release failed slot=3");
}

/// Verifies TRACE events are treated as debug output.
#[test]
fn trace_events_map_to_debug() {
    let records = with_layer("gc=debug", || {
        tracing::trace!(target: "gc", "fine detail");
    });

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, Level::Debug);
    assert_eq!(records[0].text, "[DEBUG][gc] fine detail");
}

/// Verifies a malformed spec reports itself through tracing and enables everything.
#[test]
fn malformed_spec_warning_is_observable() {
    let records = with_layer("", || {
        let filter = TagFilter::parse("gc=loud");
        assert!(filter.is_empty());
    });

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].tags, vec!["logging", "filter"]);
    let text = &records[0].text;
    let prefix = "[WARN][logging,filter] malformed log filter";
    assert!(text.starts_with(prefix));
    assert!(text.contains("'loud'"));
}
