//! Exclusive-access wrapper around the log destination

use super::composer::ComposedLine;
use parking_lot::{Mutex, MutexGuard};
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

type BoxedWriter = Box<dyn Write + Send>;

/// Shared handle to the destination of a logger
///
/// Clones refer to the same writer. Every write happens under one mutex, so
/// the synchronous path, the async worker and `fatal` never interleave bytes.
#[derive(Clone)]
pub struct SinkWriter {
    inner: Arc<Mutex<BoxedWriter>>,
}

impl SinkWriter {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Write one line while holding the lock for the duration of the write
    pub fn write_line(&self, line: &ComposedLine) -> io::Result<()> {
        self.lock().write_line(line)
    }

    /// Take the lock and keep it until the guard is dropped
    pub fn lock(&self) -> SinkGuard<'_> {
        SinkGuard {
            writer: self.inner.lock(),
        }
    }

    /// Swap the destination, returning the previous one
    pub fn replace<W: Write + Send + 'static>(&self, writer: W) -> Box<dyn Write + Send> {
        let mut guard = self.inner.lock();
        std::mem::replace(&mut *guard, Box::new(writer))
    }

    pub fn flush(&self) -> io::Result<()> {
        self.inner.lock().flush()
    }
}

impl fmt::Debug for SinkWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkWriter")
            .field("locked", &self.inner.is_locked())
            .finish()
    }
}

/// Held lock on a [`SinkWriter`]
pub struct SinkGuard<'a> {
    writer: MutexGuard<'a, BoxedWriter>,
}

impl SinkGuard<'_> {
    pub fn write_line(&mut self, line: &ComposedLine) -> io::Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::MemorySink;

    fn line(text: &str) -> ComposedLine {
        ComposedLine::from(format!("{}\n", text))
    }

    #[test]
    fn test_write_line() {
        let memory = MemorySink::new();
        let sink = SinkWriter::new(memory.clone());

        sink.write_line(&line("first")).unwrap();
        sink.write_line(&line("second")).unwrap();

        assert_eq!(memory.lines(), vec!["first", "second"]);
    }

    #[test]
    fn test_replace_redirects_clones() {
        let before = MemorySink::new();
        let after = MemorySink::new();
        let sink = SinkWriter::new(before.clone());
        let clone = sink.clone();

        sink.write_line(&line("one")).unwrap();
        let _previous = sink.replace(after.clone());
        clone.write_line(&line("two")).unwrap();

        assert_eq!(before.lines(), vec!["one"]);
        assert_eq!(after.lines(), vec!["two"]);
    }

    #[test]
    fn test_guard_excludes_other_writers() {
        let sink = SinkWriter::new(MemorySink::new());
        let guard = sink.lock();
        assert!(format!("{:?}", sink).contains("locked: true"));
        drop(guard);
        assert!(format!("{:?}", sink).contains("locked: false"));
    }
}
