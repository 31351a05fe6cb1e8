//! crates/logging/src/runtime.rs
//! Process-wide filter and sink used by the logging macros.

use std::fmt;
use std::io;
use std::sync::OnceLock;

use crate::config::LogConfig;
use crate::dispatch;
use crate::filter::LogFilter;
use crate::level::Level;
use crate::logger::Logger;
use crate::sink::LineSink;

static RUNTIME: OnceLock<LogRuntime> = OnceLock::new();

/// A filter paired with the logger that receives the lines it enables.
///
/// Both halves are fixed at construction; a runtime is only ever read, so a
/// shared reference can be used from any number of threads.
pub struct LogRuntime {
    filter: Box<dyn LogFilter + Send + Sync>,
    logger: Box<dyn Logger + Send + Sync>,
}

impl LogRuntime {
    /// Pairs `filter` with `logger`.
    pub fn new<F, L>(filter: F, logger: L) -> Self
    where
        F: LogFilter + Send + Sync + 'static,
        L: Logger + Send + Sync + 'static,
    {
        Self {
            filter: Box::new(filter),
            logger: Box::new(logger),
        }
    }

    /// Builds the filter from `config` and writes lines to standard error.
    #[must_use]
    pub fn from_config(config: &LogConfig) -> Self {
        Self::new(
            config.build_filter(),
            LineSink::with_line_mode(io::stderr(), config.line_mode),
        )
    }

    /// The filter consulted for every call.
    #[must_use]
    pub fn filter(&self) -> &(dyn LogFilter + Send + Sync) {
        &*self.filter
    }

    /// Reports whether a call at `level` with `tags` would be emitted.
    #[must_use]
    pub fn enabled(&self, level: Level, tags: &[&str]) -> bool {
        self.filter.enabled(level, tags)
    }

    /// Dispatches one call; see [`dispatch::log`].
    pub fn log(&self, level: Level, tags: &[&str], message: fmt::Arguments<'_>) -> bool {
        dispatch::log(&*self.filter, &*self.logger, level, tags, message)
    }
}

impl fmt::Debug for LogRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogRuntime")
            .field("filter_is_empty", &self.filter.is_empty())
            .finish_non_exhaustive()
    }
}

/// Returned by [`install`] when a runtime is already in place.
#[derive(Debug, thiserror::Error)]
#[error("the logging runtime is already installed")]
pub struct InstallError {
    rejected: LogRuntime,
}

impl InstallError {
    /// Returns the runtime that could not be installed.
    #[must_use]
    pub fn into_runtime(self) -> LogRuntime {
        self.rejected
    }
}

/// Installs the process-wide runtime.
///
/// Succeeds only if no runtime has been installed or lazily created yet; the
/// first successful call happens-before every later read.
pub fn install(runtime: LogRuntime) -> Result<(), InstallError> {
    RUNTIME
        .set(runtime)
        .map_err(|rejected| InstallError { rejected })
}

/// Returns the process-wide runtime.
///
/// Without a prior [`install`], the runtime is built from
/// [`LogConfig::from_env`] on first use.
pub fn runtime() -> &'static LogRuntime {
    RUNTIME.get_or_init(|| LogRuntime::from_config(&LogConfig::from_env()))
}

/// Logs one call through the process-wide runtime.
pub fn emit(level: Level, tags: &[&str], message: fmt::Arguments<'_>) -> bool {
    runtime().log(level, tags, message)
}

/// Reports whether the process-wide runtime enables `level` for `tags`.
pub fn enabled(level: Level, tags: &[&str]) -> bool {
    runtime().enabled(level, tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::TagFilter;
    use crate::record::RecordingLogger;
    use std::sync::Arc;

    #[test]
    fn runtime_dispatches_through_its_parts() {
        let logger = Arc::new(RecordingLogger::new());
        let runtime = LogRuntime::new(TagFilter::parse("gc=info"), Arc::clone(&logger));

        assert!(runtime.enabled(Level::Info, &["gc"]));
        assert!(!runtime.log(Level::Debug, &["gc"], format_args!("hidden")));
        assert!(runtime.log(Level::Warning, &["gc", "mm"], format_args!("{} left", 3)));

        let records = logger.drain();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "[WARN][gc,mm] 3 left");
    }

    #[test]
    fn runtime_is_shareable_across_threads() {
        let logger = Arc::new(RecordingLogger::new());
        let runtime = Arc::new(LogRuntime::new(TagFilter::new(), Arc::clone(&logger)));

        let handles: Vec<_> = (0..4)
            .map(|index| {
                let runtime = Arc::clone(&runtime);
                std::thread::spawn(move || {
                    runtime.log(Level::Info, &["worker"], format_args!("{index}"));
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("thread completes");
        }

        assert_eq!(logger.len(), 4);
    }

    #[test]
    fn debug_output_reports_filter_state() {
        let runtime = LogRuntime::new(TagFilter::new(), RecordingLogger::new());
        let rendered = format!("{runtime:?}");
        assert!(rendered.contains("filter_is_empty: true"));
        assert!(runtime.filter().is_empty());
    }
}
