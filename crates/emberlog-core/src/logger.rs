//! Level filter and dispatcher

use crate::config::OutputConfig;
use crate::error::{Error, Result};
use crate::level::Level;
use crate::logging::{BoxedSink, ConsoleSink, FileSink, LogRecord};
use crate::resolver::ResolvedConfig;

/// Filters records against a fixed threshold and writes survivors to one sink
///
/// Threshold and color flag are set at construction and never change.
pub struct Logger {
    threshold: Level,
    colors: bool,
    sink: BoxedSink,
}

impl Logger {
    pub fn new(threshold: Level, colors: bool, sink: BoxedSink) -> Self {
        Self { threshold, colors, sink }
    }

    /// Console logger with explicit settings
    pub fn console(threshold: Level, colors: bool) -> Self {
        Self::new(threshold, colors, Box::new(ConsoleSink::new()))
    }

    /// Build the logger described by resolved configuration, opening its sink
    pub fn from_config(config: &ResolvedConfig) -> Result<Self> {
        let sink: BoxedSink = match &config.output {
            OutputConfig::Console => Box::new(ConsoleSink::new()),
            OutputConfig::File { path } => Box::new(FileSink::open(path.clone())?),
        };
        Ok(Self::new(config.level, config.colors, sink))
    }

    pub fn threshold(&self) -> Level {
        self.threshold
    }

    pub fn colors(&self) -> bool {
        self.colors
    }

    pub fn sink_name(&self) -> &str {
        self.sink.name()
    }

    /// Whether a record at `level` would be written
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.threshold
    }

    /// Write one record if it passes the threshold
    ///
    /// Returns `Ok(false)` when the record was filtered out, which is not
    /// an error.
    pub fn log(&mut self, level: Level, tag: &str, message: &str) -> Result<bool> {
        if !self.enabled(level) {
            return Ok(false);
        }

        let record = LogRecord::new(level, tag, message);
        self.sink
            .write(&record, self.colors)
            .map_err(Error::SinkWrite)?;
        Ok(true)
    }

    pub fn trace(&mut self, tag: &str, message: &str) -> Result<bool> {
        self.log(Level::Trace, tag, message)
    }

    pub fn debug(&mut self, tag: &str, message: &str) -> Result<bool> {
        self.log(Level::Debug, tag, message)
    }

    pub fn info(&mut self, tag: &str, message: &str) -> Result<bool> {
        self.log(Level::Info, tag, message)
    }

    pub fn warn(&mut self, tag: &str, message: &str) -> Result<bool> {
        self.log(Level::Warn, tag, message)
    }

    pub fn error(&mut self, tag: &str, message: &str) -> Result<bool> {
        self.log(Level::Error, tag, message)
    }

    /// Commit anything the sink buffered
    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush().map_err(Error::SinkFlush)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("threshold", &self.threshold)
            .field("colors", &self.colors)
            .field("sink", &self.sink.name())
            .finish()
    }
}
