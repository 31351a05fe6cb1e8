//! crates/logging/src/logger.rs
//! The sink capability rendered log lines are handed to.

use std::sync::Arc;

use crate::level::Level;

/// Destination for fully rendered log lines.
///
/// The dispatcher calls [`log`](Self::log) exactly once per enabled call, with
/// the tags exactly as the caller supplied them and `message` holding the
/// complete `[LEVEL][tags] text` line without a trailing newline. Failures to
/// emit are the implementation's concern and are not reported back.
pub trait Logger {
    /// Emits one rendered line.
    fn log(&self, level: Level, tags: &[&str], message: &str);
}

impl<L: Logger + ?Sized> Logger for &L {
    fn log(&self, level: Level, tags: &[&str], message: &str) {
        (**self).log(level, tags, message);
    }
}

impl<L: Logger + ?Sized> Logger for Box<L> {
    fn log(&self, level: Level, tags: &[&str], message: &str) {
        (**self).log(level, tags, message);
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn log(&self, level: Level, tags: &[&str], message: &str) {
        (**self).log(level, tags, message);
    }
}
