//! Emberlog Core
//!
//! Embeddable logging engine. Each `Context` is an independent logger with
//! its own level threshold, color flag, sink and last-error cell. This crate
//! is pure safe Rust; the C ABI lives in `emberlog-ffi`.
//!
//! ```rust
//! use emberlog_core::{Context, Level, Logger, MemorySink};
//!
//! let probe = MemorySink::new();
//! let ctx = Context::new(Logger::new(Level::Debug, false, Box::new(probe.clone())));
//!
//! ctx.trace("NET", "not shown");
//! ctx.debug("NET", "connecting");
//! assert_eq!(probe.lines(), vec!["[DEBUG][NET] connecting".to_string()]);
//! assert!(ctx.last_error().is_none());
//! ```
//!
//! ## Configuration
//!
//! `Context::discover()` reads `EMBERLOG_CONFIG` or
//! `~/.config/emberlog/config.yaml`:
//!
//! ```yaml
//! level: debug
//! colors: true
//! output:
//!   kind: file
//!   path: /var/log/myapp.log
//! apps:
//!   worker:
//!     level: trace
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod error_slot;
pub mod level;
pub mod logger;
pub mod logging;
pub mod resolver;

// Re-export commonly used types
pub use config::{
    ConfigProvider, ConfigError, ConfigResult, ConfigFile, OutputConfig,
    FileConfigProvider, MemoryConfigProvider,
};
pub use context::Context;
pub use error::{Error, Result};
pub use error_slot::ErrorSlot;
pub use level::{Level, ParseLevelError};
pub use logger::Logger;
pub use logging::{Sink, LogRecord, ConsoleSink, FileSink, MemorySink};
pub use resolver::{ConfigResolver, ResolvedConfig};
