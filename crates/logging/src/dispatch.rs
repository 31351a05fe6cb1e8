//! crates/logging/src/dispatch.rs
//! Filter-then-format dispatch of a single log call to a [`Logger`].

use std::fmt;

use crate::filter::LogFilter;
use crate::format::{ENTRY_CAPACITY, format_log_entry};
use crate::level::Level;
use crate::logger::Logger;

/// Logs one call through `filter` and `logger`.
///
/// When the filter rejects the call nothing else happens: `message` is never
/// formatted and the logger is not invoked. Otherwise the line is rendered into
/// a stack buffer of [`ENTRY_CAPACITY`] bytes private to this call and handed
/// to the logger. Returns whether the call was emitted.
///
/// # Examples
///
/// ```
/// use logging::{Level, RecordingLogger, TagFilter, log};
///
/// let filter = TagFilter::parse("gc=info");
/// let logger = RecordingLogger::new();
///
/// assert!(log(&filter, &logger, Level::Info, &["gc"], format_args!("freed {} objects", 12)));
/// assert!(!log(&filter, &logger, Level::Debug, &["gc"], format_args!("suppressed")));
///
/// let records = logger.drain();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].text, "[INFO][gc] freed 12 objects");
/// ```
pub fn log<F, L>(
    filter: &F,
    logger: &L,
    level: Level,
    tags: &[&str],
    message: fmt::Arguments<'_>,
) -> bool
where
    F: LogFilter + ?Sized,
    L: Logger + ?Sized,
{
    if !filter.enabled(level, tags) {
        return false;
    }

    let mut buffer = [0u8; ENTRY_CAPACITY];
    emit(&mut buffer, logger, level, tags, message);
    true
}

/// Variant of [`log`] that renders into caller-provided scratch space.
///
/// The scratch slice bounds the rendered line exactly as it would bound
/// [`format_log_entry`]; callers must not share it between concurrent calls.
pub fn log_with_buffer<F, L>(
    filter: &F,
    logger: &L,
    scratch: &mut [u8],
    level: Level,
    tags: &[&str],
    message: fmt::Arguments<'_>,
) -> bool
where
    F: LogFilter + ?Sized,
    L: Logger + ?Sized,
{
    if !filter.enabled(level, tags) {
        return false;
    }

    emit(scratch, logger, level, tags, message);
    true
}

fn emit<L: Logger + ?Sized>(
    scratch: &mut [u8],
    logger: &L,
    level: Level,
    tags: &[&str],
    message: fmt::Arguments<'_>,
) {
    let line = format_log_entry(scratch, level, tags, message);
    logger.log(level, tags, line);
}
