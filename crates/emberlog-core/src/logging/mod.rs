//! Sinks and line rendering

mod traits;
mod console;
mod file;
mod memory;
pub mod format;

pub use traits::{Sink, BoxedSink, LogRecord};
pub use console::ConsoleSink;
pub use file::FileSink;
pub use memory::MemorySink;
