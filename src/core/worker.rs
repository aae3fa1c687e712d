//! Background worker draining an async logger's queue
//!
//! Lifecycle: `Running` while the queue is open, `Draining` once the owning
//! logger has closed it, `Terminated` after the last queued line is written
//! (or the sink fails). Termination is reported through a completion channel
//! carrying a [`WorkerReport`], so callers can wait for a full drain instead
//! of sleeping.

use super::composer::ComposedLine;
use super::error::{LoggerError, Result};
use super::metrics::LoggerMetrics;
use super::sink::SinkWriter;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError};
use parking_lot::Mutex;
use std::io;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

const WORKER_THREAD_NAME: &str = "leveled-logger-worker";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Running,
    Draining,
    Terminated,
}

/// Why the worker stopped
#[derive(Debug)]
pub enum WorkerOutcome {
    /// Queue closed and every queued line written
    Drained,
    /// The sink rejected a write; the rest of the queue was abandoned
    SinkFailed(io::Error),
}

/// Summary delivered when the worker exits
#[derive(Debug)]
pub struct WorkerReport {
    pub lines_written: u64,
    pub lines_dropped: u64,
    pub outcome: WorkerOutcome,
}

impl WorkerReport {
    pub fn is_drained(&self) -> bool {
        matches!(self.outcome, WorkerOutcome::Drained)
    }
}

/// Handle to the worker thread of one async logger
#[derive(Debug)]
pub struct AsyncWorker {
    handle: Option<JoinHandle<()>>,
    done: Receiver<WorkerReport>,
    /// Report received but not yet handed out by `wait`
    report: Mutex<Option<WorkerReport>>,
    closed: AtomicBool,
}

impl AsyncWorker {
    /// Start draining `receiver` into `sink`
    pub fn spawn(
        receiver: Receiver<ComposedLine>,
        sink: SinkWriter,
        metrics: Arc<LoggerMetrics>,
    ) -> Result<Self> {
        let (done_tx, done_rx) = bounded(1);

        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                let report = Self::run(&receiver, &sink, &metrics);
                // Nobody may be waiting; the report is informational.
                let _ = done_tx.send(report);
            })
            .map_err(LoggerError::WorkerSpawn)?;

        Ok(Self {
            handle: Some(handle),
            done: done_rx,
            report: Mutex::new(None),
            closed: AtomicBool::new(false),
        })
    }

    fn run(
        receiver: &Receiver<ComposedLine>,
        sink: &SinkWriter,
        metrics: &LoggerMetrics,
    ) -> WorkerReport {
        let mut lines_written = 0;

        // Yields queued lines until the queue is both disconnected and empty.
        for line in receiver.iter() {
            if let Err(err) = Self::write_isolated(sink, &line) {
                metrics.record_sink_error();
                let abandoned = receiver.try_iter().count() as u64;
                let lines_dropped = abandoned + 1;
                metrics.record_dropped_many(lines_dropped);

                eprintln!(
                    "[LOGGER ERROR] Async worker stopped after sink write failure: {}. \
                     {} queued line(s) dropped.",
                    err, lines_dropped
                );

                return WorkerReport {
                    lines_written,
                    lines_dropped,
                    outcome: WorkerOutcome::SinkFailed(err),
                };
            }

            lines_written += 1;
            metrics.record_written();
        }

        WorkerReport {
            lines_written,
            lines_dropped: 0,
            outcome: WorkerOutcome::Drained,
        }
    }

    /// A panicking writer is treated like a failing one
    fn write_isolated(sink: &SinkWriter, line: &ComposedLine) -> io::Result<()> {
        match catch_unwind(AssertUnwindSafe(|| sink.write_line(line))) {
            Ok(result) => result,
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                Err(io::Error::other(format!("sink panicked: {}", panic_msg)))
            }
        }
    }

    /// Record that the owning logger is about to drop the sending half
    pub fn mark_closed(&self) {
        self.closed.store(true, Ordering::Release);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    pub fn state(&self) -> WorkerState {
        if self.is_finished() {
            WorkerState::Terminated
        } else if self.closed.load(Ordering::Acquire) {
            WorkerState::Draining
        } else {
            WorkerState::Running
        }
    }

    /// Block until the worker exits or `timeout` elapses
    ///
    /// Only returns once the queue is closed and drained, so the caller must
    /// have dropped every `Sender` first. On timeout the handle stays valid
    /// and `wait` may be called again.
    pub fn wait(&mut self, timeout: Duration) -> Result<WorkerReport> {
        self.receive_report(Some(timeout))?;
        if let Some(handle) = self.handle.take() {
            handle.join().map_err(|_| LoggerError::WorkerPanicked)?;
        }
        self.report.lock().take().ok_or(LoggerError::WorkerPanicked)
    }

    /// Block, without a deadline, until the worker has written its last line
    ///
    /// Does not consume the report; a later [`wait`](Self::wait) still
    /// returns it.
    pub fn wait_until_finished(&self) {
        let _ = self.receive_report(None);
    }

    fn receive_report(&self, timeout: Option<Duration>) -> Result<()> {
        let mut slot = self.report.lock();
        if slot.is_some() {
            return Ok(());
        }

        let received = match timeout {
            Some(timeout) => self.done.recv_timeout(timeout),
            None => self.done.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match received {
            Ok(report) => {
                *slot = Some(report);
                Ok(())
            }
            Err(RecvTimeoutError::Timeout) => Err(LoggerError::ShutdownTimeout {
                timeout: timeout.unwrap_or_default(),
            }),
            Err(RecvTimeoutError::Disconnected) => Err(LoggerError::WorkerPanicked),
        }
    }
}
