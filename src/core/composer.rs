//! Line composition
//!
//! Turns a message plus its metadata into the fixed line layout:
//!
//! ```text
//! 2025/01/08 10:30:45.123 | main.rs:42 | WARNING | 3 | x=3
//! ```
//!
//! The call site is captured by `#[track_caller]` on every public logging
//! entry point and handed down explicitly, so wrappers never have to agree on
//! a stack depth.

use super::level_names::with_level_name;
use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use std::fmt::{self, Write as _};
use std::panic::Location;
use std::sync::atomic::{AtomicU64, Ordering};

/// Timestamp layout: `YYYY/MM/DD hh:mm:ss.mmm`
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S%.3f";

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static CONTEXT_ID: u64 = NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed);
}

/// Numeric id of the calling thread, stable for the thread's lifetime
///
/// Used only to correlate lines coming from the same thread.
pub fn context_id() -> u64 {
    CONTEXT_ID.with(|id| *id)
}

/// Source location of a logging call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
}

impl CallSite {
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Location of whoever called the enclosing `#[track_caller]` function
    #[track_caller]
    #[inline]
    pub fn caller() -> Self {
        Location::caller().into()
    }

    /// File name without its directories
    pub fn short_file(&self) -> &'static str {
        self.file
            .rsplit(|c| c == '/' || c == '\\')
            .next()
            .unwrap_or(self.file)
    }
}

impl From<&'static Location<'static>> for CallSite {
    fn from(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line())
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.short_file(), self.line)
    }
}

/// A fully formatted, newline-terminated log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedLine(Box<[u8]>);

impl ComposedLine {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for ComposedLine {
    fn from(line: String) -> Self {
        Self(line.into_bytes().into_boxed_slice())
    }
}

impl AsRef<[u8]> for ComposedLine {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Build a line from explicit inputs
///
/// Deterministic apart from the current display name of `level`.
pub fn compose(
    timestamp: &DateTime<Local>,
    site: CallSite,
    level: LogLevel,
    context_id: u64,
    message: &dyn fmt::Display,
) -> ComposedLine {
    let mut line = String::with_capacity(96);

    // Writing into a String cannot fail unless a Display impl reports an error.
    let _ = write!(line, "{} | {} | ", timestamp.format(TIMESTAMP_FORMAT), site);
    with_level_name(level, |name| line.push_str(name));
    let _ = writeln!(line, " | {} | {}", context_id, message);

    ComposedLine::from(line)
}

/// Build a line stamped with the current local time and thread context id
pub fn compose_now(site: CallSite, level: LogLevel, message: &dyn fmt::Display) -> ComposedLine {
    compose(&Local::now(), site, level, context_id(), message)
}
