//! crates/logging/src/macros.rs
//! Call-site macros that log through the process-wide runtime.
//!
//! Tags are given as a bracketed list ahead of the format arguments. The
//! arguments are only formatted when the runtime's filter enables the call.

/// Logs at an explicit [`Level`](crate::Level).
///
/// Evaluates to `true` when the line was emitted.
///
/// # Example
/// ```ignore
/// log_at!(Level::Info, ["gc", "mm"], "collected {} objects", count);
/// ```
#[macro_export]
macro_rules! log_at {
    ($level:expr, [$($tag:expr),* $(,)?], $($arg:tt)+) => {
        $crate::emit($level, &[$($tag),*], ::std::format_args!($($arg)+))
    };
}

/// Logs at [`Level::Debug`](crate::Level::Debug).
///
/// # Example
/// ```ignore
/// log_debug!(["gc"], "marking {} roots", roots.len());
/// ```
#[macro_export]
macro_rules! log_debug {
    ([$($tag:expr),* $(,)?], $($arg:tt)+) => {
        $crate::log_at!($crate::Level::Debug, [$($tag),*], $($arg)+)
    };
}

/// Logs at [`Level::Info`](crate::Level::Info).
///
/// # Example
/// ```ignore
/// log_info!(["gc"], "collection finished in {:?}", elapsed);
/// ```
#[macro_export]
macro_rules! log_info {
    ([$($tag:expr),* $(,)?], $($arg:tt)+) => {
        $crate::log_at!($crate::Level::Info, [$($tag),*], $($arg)+)
    };
}

/// Logs at [`Level::Warning`](crate::Level::Warning).
///
/// # Example
/// ```ignore
/// log_warning!(["mm"], "heap at {}% of limit", percent);
/// ```
#[macro_export]
macro_rules! log_warning {
    ([$($tag:expr),* $(,)?], $($arg:tt)+) => {
        $crate::log_at!($crate::Level::Warning, [$($tag),*], $($arg)+)
    };
}

/// Logs at [`Level::Error`](crate::Level::Error).
///
/// # Example
/// ```ignore
/// log_error!(["tls"], "failed to release slot {}", slot);
/// ```
#[macro_export]
macro_rules! log_error {
    ([$($tag:expr),* $(,)?], $($arg:tt)+) => {
        $crate::log_at!($crate::Level::Error, [$($tag),*], $($arg)+)
    };
}

/// Reports whether the process-wide runtime enables a level for some tags.
///
/// # Example
/// ```ignore
/// if log_enabled!(Level::Debug, ["gc"]) {
///     let summary = expensive_heap_summary();
///     log_debug!(["gc"], "{summary}");
/// }
/// ```
#[macro_export]
macro_rules! log_enabled {
    ($level:expr, [$($tag:expr),* $(,)?]) => {
        $crate::enabled($level, &[$($tag),*])
    };
}
