//! Process-wide default logger
//!
//! The default starts as a synchronous logger on standard output with an
//! `Info` threshold, created on first use. Re-initializing swaps in a new
//! instance; the previous one closes its queue and drains when its last
//! reference is released.
//!
//! Re-initialization racing with in-flight log calls is safe but unordered:
//! a concurrent call may land on either instance. Initialize once at startup
//! and re-initialize only from code that is externally synchronized.
//!
//! The default lives in a `static` and is never dropped. With an async
//! default, call [`shutdown_default`] before `main` returns; lines still
//! queued at process exit are lost otherwise.

use super::composer::CallSite;
use super::config::LoggerConfig;
use super::error::Result;
use super::level_names;
use super::log_level::LogLevel;
use super::logger::{Logger, LoggerBuilder};
use parking_lot::RwLock;
use std::fmt;
use std::io::Write;
use std::sync::{Arc, OnceLock};

static DEFAULT_LOGGER: OnceLock<RwLock<Arc<Logger>>> = OnceLock::new();

fn slot() -> &'static RwLock<Arc<Logger>> {
    DEFAULT_LOGGER.get_or_init(|| RwLock::new(Arc::new(Logger::stdout())))
}

/// Handle to the current default logger
pub fn default_logger() -> Arc<Logger> {
    Arc::clone(&slot().read())
}

/// Replace the default logger
///
/// The previous logger is released after the lock; if this was its last
/// reference it drains its queue before this call returns.
pub fn install_default(logger: Logger) {
    let previous = std::mem::replace(&mut *slot().write(), Arc::new(logger));
    drop(previous);
}

/// Replace the default with a new logger on `sink`
pub fn initialize_default<W: Write + Send + 'static>(
    sink: W,
    async_enabled: bool,
    buffer_capacity: usize,
) -> Result<()> {
    install_default(Logger::new(sink, async_enabled, buffer_capacity)?);
    Ok(())
}

/// Replace the default with a logger built from `config`, applying its level names
pub fn initialize_default_from_config<W: Write + Send + 'static>(
    config: &LoggerConfig,
    sink: W,
) -> Result<()> {
    config.validate()?;
    let logger = LoggerBuilder::from_config(config).sink(sink).build()?;
    config.apply_level_names();
    install_default(logger);
    Ok(())
}

/// Drain the current default and fall back to synchronous standard output
pub fn shutdown_default() {
    install_default(Logger::stdout());
}

pub fn threshold() -> LogLevel {
    default_logger().threshold()
}

pub fn set_threshold(level: LogLevel) {
    default_logger().set_threshold(level);
}

pub fn set_threshold_value(value: u8) {
    default_logger().set_threshold_value(value);
}

pub fn set_level_name(level: LogLevel, name: impl Into<String>) {
    level_names::set_level_name(level, name);
}

#[track_caller]
pub fn log(level: LogLevel, message: impl fmt::Display) {
    default_logger().log_at(level, CallSite::caller(), &message);
}

#[track_caller]
pub fn print(message: impl fmt::Display) {
    default_logger().print(message);
}

#[track_caller]
pub fn trace(message: impl fmt::Display) {
    default_logger().trace(message);
}

#[track_caller]
pub fn debug(message: impl fmt::Display) {
    default_logger().debug(message);
}

#[track_caller]
pub fn info(message: impl fmt::Display) {
    default_logger().info(message);
}

#[track_caller]
pub fn warning(message: impl fmt::Display) {
    default_logger().warning(message);
}

#[track_caller]
pub fn error(message: impl fmt::Display) {
    default_logger().error(message);
}

#[track_caller]
pub fn fatal(message: impl fmt::Display) -> ! {
    default_logger().fatal(message)
}
