//! In-memory sink

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;

use super::format;
use super::traits::{LogRecord, Sink};

#[derive(Debug, Default)]
struct MemoryBuffer {
    lines: Vec<String>,
    flushes: usize,
    failing: bool,
}

/// A sink that keeps rendered lines in memory
///
/// Clones share the same buffer, so a test can hand one clone to a logger
/// and inspect the other. `set_failing(true)` makes every write and flush
/// fail, simulating a closed destination.
///
/// # Example
///
/// ```
/// use emberlog_core::{Level, Logger, MemorySink};
///
/// let probe = MemorySink::new();
/// let mut logger = Logger::new(Level::Info, false, Box::new(probe.clone()));
/// logger.info("MAIN", "hello").unwrap();
/// assert_eq!(probe.lines(), vec!["[INFO][MAIN] hello".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<MemoryBuffer>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines written so far
    pub fn lines(&self) -> Vec<String> {
        self.buffer.lock().lines.clone()
    }

    /// Number of successful flushes
    pub fn flush_count(&self) -> usize {
        self.buffer.lock().flushes
    }

    /// Make subsequent writes and flushes fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.buffer.lock().failing = failing;
    }

    /// Number of live clones sharing this buffer, this one included
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.buffer)
    }

    fn closed() -> io::Error {
        io::Error::new(io::ErrorKind::BrokenPipe, "memory sink is closed")
    }
}

impl Sink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    fn write(&mut self, record: &LogRecord<'_>, colors: bool) -> io::Result<()> {
        let mut buffer = self.buffer.lock();
        if buffer.failing {
            return Err(Self::closed());
        }
        buffer.lines.push(format::render(record, colors));
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut buffer = self.buffer.lock();
        if buffer.failing {
            return Err(Self::closed());
        }
        buffer.flushes += 1;
        Ok(())
    }
}
