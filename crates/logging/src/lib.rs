#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging/src/lib.rs
//!
//! # Overview
//!
//! `logging` is a small, low-overhead logging core built around tags. Every
//! log call carries a [`Level`] and an ordered list of tags; a [`TagFilter`]
//! parsed from a compact `tag=level,tag=level` specification decides whether
//! the call is emitted, and enabled calls are rendered as
//! `[LEVEL][tag1,tag2] message` lines and handed to a [`Logger`].
//!
//! # Design
//!
//! - [`format_log_entry`] renders into a caller-owned byte buffer, truncating
//!   on overflow and NUL-terminating within bounds. It never allocates.
//! - [`TagFilter`] is immutable after construction. Parsing is all-or-nothing:
//!   a single malformed entry discards the whole specification and leaves the
//!   empty filter, which enables every call.
//! - [`log`] consults the filter first and skips formatting and the logger
//!   entirely for disabled calls.
//! - [`Logger`] and [`LogFilter`] are traits so the sink and the filter can be
//!   replaced, for example by [`RecordingLogger`] in tests.
//! - The process-wide [`LogRuntime`] backs the `log_*!` macros. It is built
//!   once, either through [`install`] or lazily from [`LogConfig::from_env`].
//!
//! # Invariants
//!
//! - Rendered level labels (`WARN`) and filter-spec level names (`warning`)
//!   are separate tables and intentionally differ.
//! - Tags are rendered in caller order; they are never sorted or deduplicated.
//! - The filter's answer does not depend on the order of the queried tags.
//!
//! # Examples
//!
//! ```
//! use logging::{Level, RecordingLogger, TagFilter, log};
//!
//! let filter = TagFilter::parse("t1=info,t2=warning");
//! let logger = RecordingLogger::new();
//!
//! log(&filter, &logger, Level::Info, &["t1", "t2"], format_args!("Message {}", 42));
//! log(&filter, &logger, Level::Info, &["t2"], format_args!("filtered out"));
//!
//! let records = logger.drain();
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].text, "[INFO][t1,t2] Message 42");
//! ```
//!
//! # Features
//!
//! - `serde`: (de)serialization for [`Level`], [`LineMode`], [`LogConfig`]
//!   and [`TagFilter`].
//! - `tracing`: `TagLayer`, a tracing-subscriber layer that logs `tracing`
//!   events through a filter and logger, plus a warning event when a filter
//!   specification is malformed.

mod config;
mod dispatch;
mod filter;
mod format;
mod level;
mod line_mode;
mod logger;
mod macros;
mod record;
mod runtime;
mod sink;

#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use config::{FILTER_ENV, LogConfig};
pub use dispatch::{log, log_with_buffer};
pub use filter::{FilterSpecError, LogFilter, TagFilter};
pub use format::{ENTRY_CAPACITY, format_log_entry};
pub use level::{Level, ParseLevelError};
pub use line_mode::LineMode;
pub use logger::Logger;
pub use record::{LogRecord, RecordingLogger};
pub use runtime::{InstallError, LogRuntime, emit, enabled, install, runtime};
pub use sink::LineSink;

#[cfg(feature = "tracing")]
pub use tracing_bridge::{TagLayer, init_tracing};
