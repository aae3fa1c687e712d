//! # Leveled Logger
//!
//! A leveled logger with two delivery modes:
//!
//! - **Synchronous**: the caller writes the line under the sink lock.
//! - **Asynchronous**: the caller enqueues the line into a bounded queue
//!   drained by a dedicated worker thread. A full queue blocks the caller
//!   instead of dropping lines.
//!
//! Loggers can be created per component or used through the process-wide
//! default via the free functions at the crate root.
//!
//! Every line has the layout
//! `YYYY/MM/DD hh:mm:ss.mmm | FILE:LINE | LEVEL | CONTEXT_ID | message`.
//!
//! ```
//! use leveled_logger::prelude::*;
//!
//! let sink = MemorySink::new();
//! let logger = Logger::synchronous(sink.clone());
//!
//! logger.warning(format_args!("x={}", 3));
//! logger.trace("filtered out at the default Info threshold");
//!
//! assert!(sink.contents().ends_with(" | x=3\n"));
//! assert_eq!(sink.lines().len(), 1);
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        CallSite, DeliveryMode, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        LoggerMetrics, Result, WorkerReport, WorkerState, DEFAULT_SHUTDOWN_TIMEOUT,
    };
    #[cfg(feature = "file")]
    pub use crate::sinks::FileSink;
    pub use crate::sinks::{ConsoleSink, MemorySink};
}

pub use crate::core::global::{
    debug, default_logger, error, fatal, info, initialize_default,
    initialize_default_from_config, install_default, log, print, set_level_name, set_threshold,
    set_threshold_value, shutdown_default, threshold, trace, warning,
};
pub use crate::core::{
    level_name, reset_level_names, set_level_name_at, AsyncWorker, CallSite, ComposedLine,
    DeliveryMode, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
    Result, SinkWriter, WorkerOutcome, WorkerReport, WorkerState, DEFAULT_SHUTDOWN_TIMEOUT,
    FATAL_EXIT_CODE,
};
#[cfg(feature = "file")]
pub use sinks::FileSink;
pub use sinks::{ConsoleSink, MemorySink};
