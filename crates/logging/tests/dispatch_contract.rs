//! Integration tests for the filter-then-format dispatch contract.
//!
//! A counting filter and a counting logger stand in for the real
//! collaborators so the tests can observe exactly which calls happen.

use std::cell::{Cell, RefCell};
use std::fmt;

use logging::{Level, LogFilter, Logger, TagFilter, format_log_entry, log};

#[derive(Default)]
struct CountingFilter {
    answer: bool,
    calls: Cell<usize>,
    seen: RefCell<Vec<(Level, Vec<String>)>>,
}

impl LogFilter for CountingFilter {
    fn is_empty(&self) -> bool {
        false
    }

    fn enabled(&self, level: Level, tags: &[&str]) -> bool {
        self.calls.set(self.calls.get() + 1);
        let tags = tags.iter().map(ToString::to_string).collect();
        self.seen.borrow_mut().push((level, tags));
        self.answer
    }
}

#[derive(Default)]
struct CountingLogger {
    lines: RefCell<Vec<(Level, Vec<String>, String)>>,
}

impl Logger for CountingLogger {
    fn log(&self, level: Level, tags: &[&str], message: &str) {
        let tags = tags.iter().map(ToString::to_string).collect();
        let mut lines = self.lines.borrow_mut();
        lines.push((level, tags, message.to_owned()));
    }
}

struct Expensive<'a>(&'a Cell<bool>);

impl fmt::Display for Expensive<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.set(true);
        f.write_str("expensive")
    }
}

// ============================================================================
// Disabled Path
// ============================================================================

/// Verifies a rejected call never reaches the logger.
#[test]
fn rejected_call_invokes_logger_zero_times() {
    let filter = CountingFilter::default();
    let logger = CountingLogger::default();

    log(
        &filter,
        &logger,
        Level::Info,
        &["t1", "t2"],
        format_args!("Message {}", 42),
    );

    assert_eq!(filter.calls.get(), 1);
    assert_eq!(
        *filter.seen.borrow(),
        vec![(Level::Info, vec!["t1".to_owned(), "t2".to_owned()])]
    );
    assert!(logger.lines.borrow().is_empty());
}

/// Verifies a rejected call never formats its arguments.
#[test]
fn rejected_call_skips_formatting() {
    let filter = CountingFilter::default();
    let logger = CountingLogger::default();
    let touched = Cell::new(false);

    log(
        &filter,
        &logger,
        Level::Error,
        &[],
        format_args!("{}", Expensive(&touched)),
    );

    assert!(!touched.get());
}

// ============================================================================
// Enabled Path
// ============================================================================

/// Verifies an accepted call reaches the logger once with the rendered line.
#[test]
fn accepted_call_invokes_logger_once() {
    let filter = CountingFilter {
        answer: true,
        ..CountingFilter::default()
    };
    let logger = CountingLogger::default();

    log(
        &filter,
        &logger,
        Level::Info,
        &["t1", "t2"],
        format_args!("Message {}", 42),
    );

    let lines = logger.lines.borrow();
    assert_eq!(lines.len(), 1);
    let (level, tags, text) = &lines[0];
    assert_eq!(*level, Level::Info);
    assert_eq!(tags, &["t1", "t2"]);
    assert_eq!(text, "[INFO][t1,t2] Message 42");
}

/// Verifies the logger receives exactly what the formatter renders.
#[test]
fn logger_text_matches_formatter_output() {
    let filter = TagFilter::new();
    let logger = CountingLogger::default();

    for level in [Level::Debug, Level::Info, Level::Warning, Level::Error] {
        log(&filter, &logger, level, &["gc"], format_args!("pass {}", 7));

        let mut buffer = [0u8; 256];
        let expected = format_log_entry(&mut buffer, level, &["gc"], format_args!("pass {}", 7));
        let lines = logger.lines.borrow();
        let last = lines.last().map(|(_, _, text)| text.as_str());
        assert_eq!(last, Some(expected));
    }
}

/// Verifies a real filter drives the dispatcher per its thresholds.
#[test]
fn tag_filter_gates_dispatch() {
    let filter = TagFilter::parse("gc=warning");
    let logger = CountingLogger::default();

    let below_threshold = log(
        &filter,
        &logger,
        Level::Info,
        &["gc"],
        format_args!("quiet"),
    );
    let at_threshold = log(
        &filter,
        &logger,
        Level::Warning,
        &["gc"],
        format_args!("loud"),
    );
    let unknown_tag = log(
        &filter,
        &logger,
        Level::Error,
        &["mm"],
        format_args!("unknown tag"),
    );

    assert!(!below_threshold);
    assert!(at_threshold);
    assert!(!unknown_tag);

    let lines = logger.lines.borrow();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].2, "[WARN][gc] loud");
}
