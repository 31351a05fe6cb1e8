//! crates/logging/src/format.rs
//! Rendering of `[LEVEL][tag1,tag2] message` lines into bounded buffers.
//!
//! The formatter never allocates. It writes into a caller-owned byte slice,
//! truncating once the slice is full and always leaving a NUL byte directly
//! after the written text, so the buffer can be handed to consumers that
//! expect a terminated string.

use std::fmt::{self, Write as _};

use crate::level::Level;

/// Size of the scratch buffer the dispatcher renders each entry into.
pub const ENTRY_CAPACITY: usize = 1024;

/// Render-side level labels. Kept separate from the filter-side names.
const LEVEL_LABELS: [&str; 4] = ["DEBUG", "INFO", "WARN", "ERROR"];

pub(crate) const fn level_label(level: Level) -> &'static str {
    LEVEL_LABELS[level as usize]
}

/// Renders a complete log line into `buffer` and returns the written prefix.
///
/// The output is exactly `"[" LEVEL "]" TAGPART " " message`, where `TAGPART`
/// is empty for zero tags and `"[" tag1 "," tag2 ... "]"` otherwise. Tags are
/// emitted in caller order without sorting or deduplication.
///
/// One byte of `buffer` is reserved for the NUL terminator. When the line does
/// not fit it is cut at the last UTF-8 character boundary that does, so the
/// returned slice is always valid text; an empty buffer yields `""`.
///
/// # Examples
///
/// ```
/// use logging::{format_log_entry, Level};
///
/// let mut buffer = [0u8; 64];
/// let line = format_log_entry(&mut buffer, Level::Info, &["gc", "mm"], format_args!("Log #{}", 42));
/// assert_eq!(line, "[INFO][gc,mm] Log #42");
/// ```
pub fn format_log_entry<'a>(
    buffer: &'a mut [u8],
    level: Level,
    tags: &[&str],
    message: fmt::Arguments<'_>,
) -> &'a str {
    let mut writer = BoundedWriter::new(buffer);
    // `BoundedWriter` never reports an error; overflow is recorded as truncation.
    let _ = write_entry(&mut writer, level, tags, message);
    writer.finish()
}

fn write_entry(
    out: &mut BoundedWriter<'_>,
    level: Level,
    tags: &[&str],
    message: fmt::Arguments<'_>,
) -> fmt::Result {
    out.write_char('[')?;
    out.write_str(level_label(level))?;
    out.write_char(']')?;

    if let Some((first, rest)) = tags.split_first() {
        out.write_char('[')?;
        out.write_str(first)?;
        for tag in rest {
            out.write_char(',')?;
            out.write_str(tag)?;
        }
        out.write_char(']')?;
    }

    out.write_char(' ')?;
    out.write_fmt(message)
}

/// [`fmt::Write`] adapter over a fixed byte slice that truncates on overflow.
///
/// Once any fragment fails to fit completely, every later fragment is dropped
/// so the written bytes stay a prefix of the full rendering.
struct BoundedWriter<'a> {
    buffer: &'a mut [u8],
    len: usize,
    truncated: bool,
}

impl<'a> BoundedWriter<'a> {
    fn new(buffer: &'a mut [u8]) -> Self {
        Self {
            buffer,
            len: 0,
            truncated: false,
        }
    }

    /// Bytes available for text, excluding the terminator slot.
    fn capacity(&self) -> usize {
        self.buffer.len().saturating_sub(1)
    }

    fn finish(self) -> &'a str {
        let Self { buffer, len, .. } = self;
        if let Some(terminator) = buffer.get_mut(len) {
            *terminator = 0;
        }
        valid_prefix(&buffer[..len])
    }
}

impl fmt::Write for BoundedWriter<'_> {
    fn write_str(&mut self, text: &str) -> fmt::Result {
        if self.truncated {
            return Ok(());
        }

        let remaining = self.capacity() - self.len;
        let take = if text.len() <= remaining {
            text.len()
        } else {
            self.truncated = true;
            floor_char_boundary(text, remaining)
        };

        self.buffer[self.len..self.len + take].copy_from_slice(&text.as_bytes()[..take]);
        self.len += take;
        Ok(())
    }
}

fn floor_char_boundary(text: &str, max: usize) -> usize {
    let mut index = max.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn valid_prefix(bytes: &[u8]) -> &str {
    match std::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(error) => std::str::from_utf8(&bytes[..error.valid_up_to()]).unwrap_or_default(),
    }
}
