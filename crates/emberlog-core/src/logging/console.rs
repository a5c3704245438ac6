//! Console sink

use std::io::{self, Write};

use super::format;
use super::traits::{LogRecord, Sink};
use crate::level::Level;

/// A sink that writes to the process's stdout/stderr
///
/// Warn and Error go to stderr, everything else to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for ConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    fn write(&mut self, record: &LogRecord<'_>, colors: bool) -> io::Result<()> {
        let line = format::render(record, colors);
        if record.level >= Level::Warn {
            writeln!(io::stderr().lock(), "{}", line)
        } else {
            writeln!(io::stdout().lock(), "{}", line)
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        io::stderr().flush()
    }
}
