#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the command-line front-end for the `taglog` binary. It
//! exposes two operations on top of the [`logging`] crate:
//!
//! - emitting a single message at a chosen level and tag set through a filter
//!   specification, printing the rendered line to standard error when the
//!   filter enables it;
//! - validating a filter specification with `--check-filter`, printing its
//!   canonical form to standard output.
//!
//! # Design
//!
//! [`run`] accepts an iterator of arguments together with handles for
//! standard output and error. A [`clap`] command definition performs the
//! parse; emission goes through [`logging::log`] with a [`LineSink`] wrapping
//! the error handle, so the binary renders lines exactly the way library
//! callers do.
//!
//! When `--filter` is omitted the specification is read from
//! [`logging::FILTER_ENV`]. A malformed `--filter` value is reported as a
//! warning and replaced by the empty filter, which enables everything.
//!
//! # Errors
//!
//! Usage errors exit with status `2`. A rejected `--check-filter`
//! specification or a failure to write output exits with status `1`.
//!
//! # Examples
//!
//! ```
//! use cli::run;
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let status = run(
//!     ["taglog", "--filter", "gc=info", "--level", "info", "--tag", "gc", "collected", "12"],
//!     &mut stdout,
//!     &mut stderr,
//! );
//!
//! assert_eq!(status, 0);
//! assert_eq!(stderr, b"[INFO][gc] collected 12\n");
//! ```

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, Command};
use logging::{Level, LineMode, LineSink, LogConfig, TagFilter};

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Program name used in usage output and diagnostics.
const PROGRAM_NAME: &str = "taglog";

/// Exit status for a rejected specification or an output failure.
const EXIT_FAILURE: i32 = 1;

/// Exit status for command-line usage errors.
const EXIT_USAGE: i32 = 2;

/// Tags attached to diagnostics about the filter itself.
const FILTER_DIAGNOSTIC_TAGS: &[&str] = &["logging", "filter"];

/// Parsed command produced by [`parse_args`].
#[derive(Debug)]
struct ParsedArgs {
    filter: Option<String>,
    level: Level,
    tags: Vec<String>,
    line_mode: LineMode,
    check_filter: Option<String>,
    message: Vec<String>,
}

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Emit a tagged log line through a tag=level filter")
        .arg(
            Arg::new("filter")
                .long("filter")
                .value_name("SPEC")
                .help("Filter specification such as 'gc=info,mm=warning' (default: $TAGLOG_FILTER)")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("level")
                .long("level")
                .short('l')
                .value_name("LEVEL")
                .help("Severity of the message: debug, info, warning or error")
                .default_value("info")
                .value_parser(|value: &str| value.parse::<Level>())
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("tag")
                .long("tag")
                .short('t')
                .value_name("TAG")
                .help("Tag attached to the message; may be repeated")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("no-newline")
                .long("no-newline")
                .help("Do not terminate the emitted line with a newline")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("check-filter")
                .long("check-filter")
                .value_name("SPEC")
                .help("Validate SPEC and print its canonical form")
                .conflicts_with("message")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("message")
                .value_name("MESSAGE")
                .help("Message words, joined with single spaces")
                .required_unless_present("check-filter")
                .num_args(1..)
                .trailing_var_arg(true)
                .action(ArgAction::Append),
        )
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    let filter = matches.remove_one::<String>("filter");
    let level = matches.remove_one::<Level>("level").unwrap_or(Level::Info);
    let tags = matches
        .remove_many::<String>("tag")
        .map(Iterator::collect)
        .unwrap_or_default();
    let line_mode = LineMode::from(!matches.get_flag("no-newline"));
    let check_filter = matches.remove_one::<String>("check-filter");
    let message = matches
        .remove_many::<String>("message")
        .map(Iterator::collect)
        .unwrap_or_default();

    Ok(ParsedArgs {
        filter,
        level,
        tags,
        line_mode,
        check_filter,
        message,
    })
}

/// Runs the CLI using the provided argument iterator and output handles.
///
/// Returns the process exit code the caller should use: `0` on success, `1`
/// when `--check-filter` rejects its specification or output cannot be
/// written, and `2` for usage errors.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    match parse_args(arguments) {
        Ok(parsed) => execute(parsed, stdout, stderr),
        Err(error) => render_clap_error(&error, stdout, stderr),
    }
}

fn render_clap_error<Out: Write, Err: Write>(
    error: &clap::Error,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32 {
    let rendered = error.render().to_string();
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if stdout.write_all(rendered.as_bytes()).is_err() {
                return EXIT_FAILURE;
            }
            0
        }
        _ => {
            let _ = stderr.write_all(rendered.as_bytes());
            EXIT_USAGE
        }
    }
}

fn execute<Out, Err>(parsed: ParsedArgs, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    if let Some(spec) = parsed.check_filter {
        return check_filter(&spec, stdout, stderr);
    }

    let spec = parsed
        .filter
        .unwrap_or_else(|| LogConfig::from_env().filter);
    let sink = LineSink::with_line_mode(stderr, parsed.line_mode);
    let filter = resolve_filter(&spec, &sink);

    let tags: Vec<&str> = parsed.tags.iter().map(String::as_str).collect();
    let message = parsed.message.join(" ");
    logging::log(
        &filter,
        &sink,
        parsed.level,
        &tags,
        format_args!("{message}"),
    );

    match sink.flush() {
        Ok(()) => 0,
        Err(_) => EXIT_FAILURE,
    }
}

/// Parses `spec` strictly, warning through `sink` and enabling everything on failure.
fn resolve_filter<W: Write>(spec: &str, sink: &LineSink<W>) -> TagFilter {
    match TagFilter::try_parse(spec) {
        Ok(filter) => filter,
        Err(error) => {
            let fallback = TagFilter::new();
            logging::log(
                &fallback,
                sink,
                Level::Warning,
                FILTER_DIAGNOSTIC_TAGS,
                format_args!("malformed log filter ignored: {error}"),
            );
            fallback
        }
    }
}

fn check_filter<Out: Write, Err: Write>(spec: &str, stdout: &mut Out, stderr: &mut Err) -> i32 {
    match TagFilter::try_parse(spec) {
        Ok(filter) => match write_canonical(&filter, stdout) {
            Ok(()) => 0,
            Err(_) => EXIT_FAILURE,
        },
        Err(error) => {
            let _ = writeln!(stderr, "{PROGRAM_NAME}: invalid filter '{spec}': {error}");
            EXIT_FAILURE
        }
    }
}

fn write_canonical<Out: Write>(filter: &TagFilter, stdout: &mut Out) -> io::Result<()> {
    writeln!(stdout, "{filter}")?;
    stdout.flush()
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    ExitCode::from(u8::try_from(clamped).unwrap_or(u8::MAX))
}
