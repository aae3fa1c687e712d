//! Logging macros for ergonomic log message formatting.
//!
//! These macros accept `format!`-style arguments but build only a
//! `format_args!` value, so a filtered call never formats its message. The
//! reported location is the macro invocation.
//!
//! # Examples
//!
//! ```
//! use leveled_logger::prelude::*;
//! use leveled_logger::{info, warning};
//!
//! let sink = MemorySink::new();
//! let logger = Logger::synchronous(sink.clone());
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! warning!(logger, "Port {} is already in use", port);
//!
//! assert_eq!(sink.lines().len(), 2);
//! ```
//!
//! The default logger works the same way:
//!
//! ```
//! use leveled_logger::{default_logger, info};
//!
//! info!(default_logger(), "Processing {} items", 100);
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = Logger::synchronous(MemorySink::new());
/// use leveled_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, ::std::format_args!($($arg)+))
    };
}

/// Log a message regardless of the logger's threshold.
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = Logger::synchronous(MemorySink::new());
/// use leveled_logger::log_print;
/// logger.set_threshold(LogLevel::Fatal);
/// log_print!(logger, "Build {} starting", "1.4.2");
/// ```
#[macro_export]
macro_rules! log_print {
    ($logger:expr, $($arg:tt)+) => {
        $logger.print(::std::format_args!($($arg)+))
    };
}

/// Log a trace-level message.
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = Logger::synchronous(MemorySink::new());
/// # logger.set_threshold(LogLevel::Trace);
/// use leveled_logger::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $logger.trace(::std::format_args!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug(::std::format_args!($($arg)+))
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(::std::format_args!($($arg)+))
    };
}

/// Log a warning-level message.
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = Logger::synchronous(MemorySink::new());
/// use leveled_logger::warning;
/// warning!(logger, "Low disk space");
/// warning!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warning(::std::format_args!($($arg)+))
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error(::std::format_args!($($arg)+))
    };
}

/// Log a fatal message and terminate the process.
///
/// ```no_run
/// # use leveled_logger::prelude::*;
/// # let logger = Logger::stdout();
/// use leveled_logger::fatal;
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal(::std::format_args!($($arg)+))
    };
}
