//! Main logger implementation

use super::{
    composer::{compose_now, CallSite, ComposedLine},
    config::LoggerConfig,
    error::Result,
    level_names,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    sink::SinkWriter,
    worker::{AsyncWorker, WorkerReport, WorkerState},
};
use crate::sinks::ConsoleSink;
use crossbeam_channel::{bounded, Sender, TrySendError};
use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Default shutdown timeout for logger cleanup (5 seconds)
///
/// This timeout is used when the logger is dropped without explicit shutdown.
/// For custom timeout control, use the `shutdown()` method instead.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Process exit status used by [`Logger::fatal`]
pub const FATAL_EXIT_CODE: i32 = 1;

/// How emitted lines reach the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// The caller writes under the sink lock
    Synchronous,
    /// The caller enqueues; a worker thread writes
    ///
    /// A capacity of zero makes every send a rendezvous with the worker.
    Asynchronous { capacity: usize },
}

impl DeliveryMode {
    pub fn is_async(&self) -> bool {
        matches!(self, DeliveryMode::Asynchronous { .. })
    }
}

pub struct Logger {
    threshold: AtomicU8,
    sink: SinkWriter,
    mode: DeliveryMode,
    sender: Option<Sender<ComposedLine>>,
    worker: Option<AsyncWorker>,
    metrics: Arc<LoggerMetrics>,
    shutdown_timeout: Duration,
}

impl Logger {
    /// Create a logger writing to `sink`
    ///
    /// With `async_enabled`, lines go through a queue of `buffer_capacity`
    /// lines drained by a dedicated worker thread.
    pub fn new<W: Write + Send + 'static>(
        sink: W,
        async_enabled: bool,
        buffer_capacity: usize,
    ) -> Result<Self> {
        let mode = if async_enabled {
            DeliveryMode::Asynchronous {
                capacity: buffer_capacity,
            }
        } else {
            DeliveryMode::Synchronous
        };
        Self::from_parts(
            SinkWriter::new(sink),
            mode,
            LogLevel::Info,
            DEFAULT_SHUTDOWN_TIMEOUT,
        )
    }

    /// Synchronous logger; never spawns a thread
    #[must_use]
    pub fn synchronous<W: Write + Send + 'static>(sink: W) -> Self {
        Self::sync_with(SinkWriter::new(sink), LogLevel::Info, DEFAULT_SHUTDOWN_TIMEOUT)
    }

    /// Synchronous logger on standard output at `Info`
    #[must_use]
    pub fn stdout() -> Self {
        Self::synchronous(ConsoleSink::stdout())
    }

    pub fn asynchronous<W: Write + Send + 'static>(
        sink: W,
        buffer_capacity: usize,
    ) -> Result<Self> {
        Self::new(sink, true, buffer_capacity)
    }

    fn sync_with(sink: SinkWriter, threshold: LogLevel, shutdown_timeout: Duration) -> Self {
        Self {
            threshold: AtomicU8::new(threshold.as_u8()),
            sink,
            mode: DeliveryMode::Synchronous,
            sender: None,
            worker: None,
            metrics: Arc::new(LoggerMetrics::new()),
            shutdown_timeout,
        }
    }

    fn from_parts(
        sink: SinkWriter,
        mode: DeliveryMode,
        threshold: LogLevel,
        shutdown_timeout: Duration,
    ) -> Result<Self> {
        let mut logger = Self::sync_with(sink, threshold, shutdown_timeout);

        if let DeliveryMode::Asynchronous { capacity } = mode {
            let (sender, receiver) = bounded(capacity);
            let worker =
                AsyncWorker::spawn(receiver, logger.sink.clone(), Arc::clone(&logger.metrics))?;
            logger.mode = mode;
            logger.sender = Some(sender);
            logger.worker = Some(worker);
        }

        Ok(logger)
    }

    /// Current threshold; lines below it are discarded before formatting
    #[inline]
    pub fn threshold(&self) -> LogLevel {
        LogLevel::from_u8_clamped(self.threshold.load(Ordering::Relaxed))
    }

    pub fn set_threshold(&self, level: LogLevel) {
        self.threshold.store(level.as_u8(), Ordering::Relaxed);
    }

    /// Set the threshold from a raw value, clamping anything above `Fatal`
    pub fn set_threshold_value(&self, value: u8) {
        self.set_threshold(LogLevel::from_u8_clamped(value));
    }

    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.threshold()
    }

    /// Rename a level; the names are shared by every logger in the process
    pub fn set_level_name(&self, level: LogLevel, name: impl Into<String>) {
        level_names::set_level_name(level, name);
    }

    pub fn mode(&self) -> DeliveryMode {
        self.mode
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Lines waiting in the async queue (always 0 in synchronous mode)
    pub fn queued_lines(&self) -> usize {
        self.sender.as_ref().map_or(0, Sender::len)
    }

    /// `None` for synchronous loggers and after shutdown
    pub fn worker_state(&self) -> Option<WorkerState> {
        self.worker.as_ref().map(AsyncWorker::state)
    }

    /// Redirect output; the async worker picks up the new sink too
    pub fn set_writer<W: Write + Send + 'static>(&self, writer: W) {
        let mut previous = self.sink.replace(writer);
        if let Err(e) = previous.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush replaced sink: {}", e);
        }
    }

    pub fn flush(&self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }

    /// Log at `level` with an explicitly supplied call site
    ///
    /// For wrappers that capture the location themselves; the per-level
    /// methods capture it with `#[track_caller]`.
    pub fn log_at(&self, level: LogLevel, site: CallSite, message: &dyn fmt::Display) {
        if level < self.threshold() {
            return;
        }
        self.dispatch(compose_now(site, level, message));
    }

    #[track_caller]
    #[inline]
    pub fn log(&self, level: LogLevel, message: impl fmt::Display) {
        self.log_at(level, CallSite::caller(), &message);
    }

    /// Emit regardless of the threshold, labelled with the `Trace` name
    #[track_caller]
    pub fn print(&self, message: impl fmt::Display) {
        self.dispatch(compose_now(CallSite::caller(), LogLevel::Trace, &message));
    }

    #[track_caller]
    #[inline]
    pub fn trace(&self, message: impl fmt::Display) {
        self.log_at(LogLevel::Trace, CallSite::caller(), &message);
    }

    #[track_caller]
    #[inline]
    pub fn debug(&self, message: impl fmt::Display) {
        self.log_at(LogLevel::Debug, CallSite::caller(), &message);
    }

    #[track_caller]
    #[inline]
    pub fn info(&self, message: impl fmt::Display) {
        self.log_at(LogLevel::Info, CallSite::caller(), &message);
    }

    #[track_caller]
    #[inline]
    pub fn warning(&self, message: impl fmt::Display) {
        self.log_at(LogLevel::Warning, CallSite::caller(), &message);
    }

    #[track_caller]
    #[inline]
    pub fn error(&self, message: impl fmt::Display) {
        self.log_at(LogLevel::Error, CallSite::caller(), &message);
    }

    /// Write synchronously, then terminate the process
    ///
    /// Never goes through the async queue. The sink lock is held until the
    /// process exits, so no other line can follow the fatal one.
    #[track_caller]
    pub fn fatal(&self, message: impl fmt::Display) -> ! {
        let line = compose_now(CallSite::caller(), LogLevel::Fatal, &message);

        let mut sink = self.sink.lock();
        if let Err(e) = sink.write_line(&line) {
            eprintln!("[LOGGER ERROR] Failed to write fatal line: {}", e);
        }
        std::process::exit(FATAL_EXIT_CODE)
    }

    fn dispatch(&self, line: ComposedLine) {
        let Some(ref sender) = self.sender else {
            // After a timed-out shutdown the worker may still be draining;
            // direct writes must not overtake the lines it holds.
            if let Some(ref worker) = self.worker {
                worker.wait_until_finished();
            }
            self.write_now(&line);
            return;
        };

        match sender.try_send(line) {
            Ok(()) => {}
            Err(TrySendError::Full(line)) => {
                // Backpressure: wait for the worker instead of dropping.
                // A rendezvous queue is always "full"; that is not a block.
                if self.mode != (DeliveryMode::Asynchronous { capacity: 0 }) {
                    self.metrics.record_block();
                }
                if sender.send(line).is_err() {
                    self.metrics.record_dropped();
                }
            }
            Err(TrySendError::Disconnected(_)) => {
                // Worker stopped after a sink failure.
                self.metrics.record_dropped();
            }
        }
    }

    fn write_now(&self, line: &ComposedLine) {
        match self.sink.write_line(line) {
            Ok(()) => {
                self.metrics.record_written();
            }
            Err(e) => {
                self.metrics.record_sink_error();
                self.metrics.record_dropped();
                eprintln!("[LOGGER ERROR] Sink write failed (sync): {}", e);
            }
        }
    }

    /// Close the queue and wait for the worker to drain it
    ///
    /// Returns the worker's report, or `None` for a synchronous logger or one
    /// already shut down. Lines logged afterwards are written synchronously.
    ///
    /// On [`ShutdownTimeout`](crate::LoggerError::ShutdownTimeout) the
    /// worker keeps draining in the background. Later lines wait for it to
    /// finish before being written, and `shutdown` may be called again to
    /// collect the report.
    ///
    /// # Example
    ///
    /// ```
    /// use leveled_logger::{Logger, MemorySink, DEFAULT_SHUTDOWN_TIMEOUT};
    ///
    /// let sink = MemorySink::new();
    /// let mut logger = Logger::asynchronous(sink.clone(), 16).unwrap();
    /// logger.info("queued");
    ///
    /// let report = logger.shutdown(DEFAULT_SHUTDOWN_TIMEOUT).unwrap().unwrap();
    /// assert_eq!(report.lines_written, 1);
    /// assert_eq!(sink.lines().len(), 1);
    /// ```
    pub fn shutdown(&mut self, timeout: Duration) -> Result<Option<WorkerReport>> {
        let Some(mut worker) = self.worker.take() else {
            drop(self.sender.take());
            self.flush()?;
            return Ok(None);
        };

        worker.mark_closed();
        drop(self.sender.take());

        match worker.wait(timeout) {
            Ok(report) => {
                self.flush()?;
                Ok(Some(report))
            }
            Err(e) => {
                self.worker = Some(worker);
                Err(e)
            }
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown(self.shutdown_timeout) {
            eprintln!("[LOGGER ERROR] Failed to shut down logger: {}", e);
        }

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped lines (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("threshold", &self.threshold())
            .field("mode", &self.mode)
            .field("worker_state", &self.worker_state())
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use leveled_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .threshold(LogLevel::Debug)
///     .sink(MemorySink::new())
///     .async_mode(1000)
///     .build()
///     .unwrap();
/// assert!(logger.mode().is_async());
/// ```
pub struct LoggerBuilder {
    sink: Option<SinkWriter>,
    threshold: LogLevel,
    mode: DeliveryMode,
    shutdown_timeout: Duration,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            sink: None,
            threshold: LogLevel::Info,
            mode: DeliveryMode::Synchronous,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }

    /// Start from a loaded configuration
    ///
    /// Level names in the configuration are process-wide and are not applied
    /// here; see [`LoggerConfig::apply_level_names`].
    pub fn from_config(config: &LoggerConfig) -> Self {
        Self {
            sink: None,
            threshold: config.threshold,
            mode: config.delivery_mode(),
            shutdown_timeout: config.shutdown_timeout(),
        }
    }

    /// Set the destination (standard output if never called)
    #[must_use = "builder methods return a new value"]
    pub fn sink<W: Write + Send + 'static>(mut self, sink: W) -> Self {
        self.sink = Some(SinkWriter::new(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn threshold(mut self, level: LogLevel) -> Self {
        self.threshold = level;
        self
    }

    /// Enable async mode with the given queue capacity
    ///
    /// If not called, the logger will use synchronous mode.
    #[must_use = "builder methods return a new value"]
    pub fn async_mode(mut self, buffer_capacity: usize) -> Self {
        self.mode = DeliveryMode::Asynchronous {
            capacity: buffer_capacity,
        };
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn sync_mode(mut self) -> Self {
        self.mode = DeliveryMode::Synchronous;
        self
    }

    /// How long `Drop` waits for the worker to drain
    #[must_use = "builder methods return a new value"]
    pub fn shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    pub fn build(self) -> Result<Logger> {
        let sink = self
            .sink
            .unwrap_or_else(|| SinkWriter::new(ConsoleSink::stdout()));
        Logger::from_parts(sink, self.mode, self.threshold, self.shutdown_timeout)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::MemorySink;

    fn sync_logger() -> (Logger, MemorySink) {
        let sink = MemorySink::new();
        (Logger::synchronous(sink.clone()), sink)
    }

    #[test]
    fn test_builder_defaults() {
        let logger = Logger::builder().sink(MemorySink::new()).build().unwrap();

        assert_eq!(logger.threshold(), LogLevel::Info);
        assert_eq!(logger.mode(), DeliveryMode::Synchronous);
        assert_eq!(logger.worker_state(), None);
    }

    #[test]
    fn test_builder_async_mode() {
        let logger = Logger::builder()
            .threshold(LogLevel::Trace)
            .sink(MemorySink::new())
            .async_mode(64)
            .build()
            .unwrap();

        assert_eq!(logger.mode(), DeliveryMode::Asynchronous { capacity: 64 });
        assert_eq!(logger.worker_state(), Some(WorkerState::Running));
    }

    #[test]
    fn test_threshold_filters_before_writing() {
        let (logger, sink) = sync_logger();

        logger.trace("hidden");
        logger.debug("hidden");
        logger.info("shown");
        logger.warning("shown");
        logger.error("shown");

        assert_eq!(sink.lines().len(), 3);
        assert_eq!(logger.metrics().lines_written(), 3);
    }

    #[test]
    fn test_filtered_message_is_never_formatted() {
        struct Exploding;

        impl fmt::Display for Exploding {
            fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
                panic!("formatted a filtered message");
            }
        }

        let (logger, sink) = sync_logger();
        logger.set_threshold(LogLevel::Error);
        logger.warning(Exploding);

        assert!(sink.is_empty());
    }

    #[test]
    fn test_print_ignores_threshold() {
        let (logger, sink) = sync_logger();
        logger.set_threshold(LogLevel::Fatal);

        logger.print("always");
        logger.error("filtered");

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains(" | TRACE | "));
        assert!(lines[0].ends_with("always"));
    }

    #[test]
    fn test_threshold_value_is_clamped() {
        let (logger, _sink) = sync_logger();

        logger.set_threshold_value(42);
        assert_eq!(logger.threshold(), LogLevel::Fatal);

        logger.set_threshold_value(1);
        assert_eq!(logger.threshold(), LogLevel::Debug);
    }

    #[test]
    fn test_sync_write_failure_is_counted() {
        struct Refusing;

        impl Write for Refusing {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let logger = Logger::synchronous(Refusing);
        logger.info("lost");

        assert_eq!(logger.metrics().sink_errors(), 1);
        assert_eq!(logger.metrics().dropped_count(), 1);
    }

    #[test]
    fn test_shutdown_drains_and_falls_back_to_sync() {
        let sink = MemorySink::new();
        let mut logger = Logger::asynchronous(sink.clone(), 4).unwrap();

        for i in 0..20 {
            logger.info(format_args!("line {}", i));
        }

        let report = logger.shutdown(DEFAULT_SHUTDOWN_TIMEOUT).unwrap().unwrap();
        assert!(report.is_drained());
        assert_eq!(report.lines_written, 20);
        assert_eq!(logger.worker_state(), None);

        logger.info("after shutdown");
        assert_eq!(sink.lines().len(), 21);

        assert!(logger.shutdown(DEFAULT_SHUTDOWN_TIMEOUT).unwrap().is_none());
    }

    #[test]
    fn test_set_writer_redirects_async_output() {
        let first = MemorySink::new();
        let second = MemorySink::new();
        let mut logger = Logger::asynchronous(first.clone(), 0).unwrap();

        logger.info("to first");
        // The rendezvous send returns once the worker has the line, not once
        // it is written.
        let deadline = std::time::Instant::now() + DEFAULT_SHUTDOWN_TIMEOUT;
        while first.is_empty() && std::time::Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(1));
        }

        logger.set_writer(second.clone());
        logger.info("to second");
        let report = logger.shutdown(DEFAULT_SHUTDOWN_TIMEOUT).unwrap().unwrap();

        assert_eq!(report.lines_written, 2);
        assert_eq!(first.lines().len(), 1);
        assert_eq!(second.lines().len(), 1);
    }

    #[test]
    fn test_debug_output() {
        let (logger, _sink) = sync_logger();
        let debug = format!("{:?}", logger);
        assert!(debug.contains("Synchronous"));
        assert!(debug.contains("Info"));
    }
}
