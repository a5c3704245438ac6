//! Sink trait and the record handed to it

use std::io;

use crate::level::Level;

/// One log call that passed the level filter
///
/// Borrowed from the caller's strings and never stored; sinks render it
/// immediately. Timestamps are a sink concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRecord<'a> {
    pub level: Level,
    pub tag: &'a str,
    pub message: &'a str,
}

impl<'a> LogRecord<'a> {
    pub fn new(level: Level, tag: &'a str, message: &'a str) -> Self {
        Self { level, tag, message }
    }
}

/// Write target owned by a single logger
///
/// Implementations:
/// - `ConsoleSink`: stdout, with warnings and errors on stderr
/// - `FileSink`: timestamped append to a file
/// - `MemorySink`: captured lines for tests and embedding
pub trait Sink: Send {
    /// Short name used in diagnostics
    fn name(&self) -> &str;

    /// Render and write one record; `colors` asks for ANSI decoration,
    /// which sinks that never reach a terminal are free to ignore
    fn write(&mut self, record: &LogRecord<'_>, colors: bool) -> io::Result<()>;

    /// Commit anything buffered
    fn flush(&mut self) -> io::Result<()>;
}

/// Type alias for a boxed sink
pub type BoxedSink = Box<dyn Sink>;
