//! crates/logging/src/sink.rs
//! [`Logger`] implementation that writes rendered lines to an [`io::Write`] target.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::level::Level;
use crate::line_mode::LineMode;
use crate::logger::Logger;

/// Writes each rendered log line to a wrapped writer.
///
/// The writer sits behind a mutex so the sink can be shared as a [`Logger`]
/// across threads; a line and its terminator are written while the lock is
/// held, so concurrent lines never interleave. Write failures are dropped by
/// the [`Logger`] impl; call [`write_line`](Self::write_line) directly to
/// observe them.
///
/// # Examples
///
/// ```
/// use logging::{Level, LineSink, Logger};
///
/// let sink = LineSink::new(Vec::new());
/// sink.log(Level::Info, &["gc"], "[INFO][gc] done");
///
/// assert_eq!(sink.into_inner(), b"[INFO][gc] done\n");
/// ```
pub struct LineSink<W> {
    writer: Mutex<W>,
    line_mode: LineMode,
}

impl LineSink<io::Stderr> {
    /// Creates a newline-terminated sink on standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W> LineSink<W> {
    /// Creates a sink that appends a newline after each line.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_line_mode(writer, LineMode::WithNewline)
    }

    /// Creates a sink with the provided [`LineMode`].
    #[must_use]
    pub const fn with_line_mode(writer: W, line_mode: LineMode) -> Self {
        Self {
            writer: Mutex::new(writer),
            line_mode,
        }
    }

    /// Returns the configured [`LineMode`].
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, W> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write> LineSink<W> {
    /// Writes `line` followed by the configured terminator.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self.lock();
        writer.write_all(line.as_bytes())?;
        writer.write_all(self.line_mode.terminator())
    }

    /// Flushes the underlying writer.
    pub fn flush(&self) -> io::Result<()> {
        self.lock().flush()
    }
}

impl<W: Write> Logger for LineSink<W> {
    fn log(&self, _level: Level, _tags: &[&str], message: &str) {
        let _ = self.write_line(message);
    }
}

impl<W> fmt::Debug for LineSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineSink")
            .field("line_mode", &self.line_mode)
            .finish_non_exhaustive()
    }
}
