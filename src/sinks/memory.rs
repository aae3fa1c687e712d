//! In-memory sink for capturing output

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// Growable byte buffer shared between clones
///
/// Hand one clone to a logger and keep another to inspect what was written.
///
/// ```
/// use leveled_logger::{Logger, MemorySink};
///
/// let sink = MemorySink::new();
/// let logger = Logger::synchronous(sink.clone());
/// logger.warning(format_args!("x={}", 3));
///
/// assert!(sink.lines()[0].contains(" | WARNING | "));
/// assert!(sink.contents().ends_with("x=3\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    /// Written lines without their terminators
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
