//! crates/logging/src/record.rs
//! In-memory logger that captures emitted lines.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::level::Level;
use crate::logger::Logger;

/// One line captured by a [`RecordingLogger`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRecord {
    /// Level of the call.
    pub level: Level,
    /// Tags in the order the caller supplied them.
    pub tags: Vec<String>,
    /// The fully rendered line.
    pub text: String,
}

/// [`Logger`] that keeps every line it receives, in arrival order.
///
/// Useful as a stand-in sink in tests and when embedding the filter in a host
/// that forwards lines elsewhere in batches.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingLogger {
    /// Creates a logger with no captured lines.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    /// Number of lines captured since the last [`drain`](Self::drain).
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Reports whether no lines are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copies the pending lines without removing them.
    #[must_use]
    pub fn snapshot(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    /// Removes and returns every pending line.
    pub fn drain(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: Level, tags: &[&str], message: &str) {
        self.lock().push(LogRecord {
            level,
            tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
            text: message.to_owned(),
        });
    }
}
