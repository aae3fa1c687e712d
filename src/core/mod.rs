//! Core logger types

pub mod composer;
pub mod config;
pub mod error;
pub mod global;
pub mod level_names;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod sink;
pub mod worker;

pub use composer::{compose, compose_now, context_id, CallSite, ComposedLine, TIMESTAMP_FORMAT};
pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use level_names::{level_name, reset_level_names, set_level_name_at};
pub use log_level::LogLevel;
pub use logger::{DeliveryMode, Logger, LoggerBuilder, DEFAULT_SHUTDOWN_TIMEOUT, FATAL_EXIT_CODE};
pub use metrics::LoggerMetrics;
pub use sink::{SinkGuard, SinkWriter};
pub use worker::{AsyncWorker, WorkerOutcome, WorkerReport, WorkerState};
