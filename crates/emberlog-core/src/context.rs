//! Logger instances as owned units
//!
//! A `Context` bundles a logger (threshold, color flag, sink) with its
//! last-error cell. Everything that can go wrong after construction is
//! captured into that cell instead of being returned, which is what lets
//! a foreign-language boundary expose fire-and-forget logging calls.
//!
//! # Thread Safety
//!
//! The logger and the error cell are each behind a `parking_lot::Mutex`,
//! so a `Context` is `Send + Sync` and concurrent calls on one context are
//! serialized. Contexts never share a sink.

use std::path::PathBuf;

use parking_lot::Mutex;

use crate::config::{ConfigProvider, FileConfigProvider};
use crate::error::{Error, Result};
use crate::error_slot::ErrorSlot;
use crate::level::Level;
use crate::logger::Logger;
use crate::resolver::{ConfigResolver, ResolvedConfig};
use crate::{debug_log, info_log, warn_log};

pub struct Context {
    logger: Mutex<Logger>,
    last_error: ErrorSlot,
}

impl Context {
    /// Wrap an already built logger
    pub fn new(logger: Logger) -> Self {
        Self {
            logger: Mutex::new(logger),
            last_error: ErrorSlot::new(),
        }
    }

    /// Console context with explicit settings, bypassing configuration
    pub fn simple(level: Level, colors: bool) -> Self {
        Self::new(Logger::console(level, colors))
    }

    /// Resolve `provider` through `resolver` and open the configured sink
    ///
    /// Fails as a whole: either a fully working context or an error.
    pub fn from_provider(provider: &dyn ConfigProvider, resolver: &ConfigResolver) -> Result<Self> {
        let config = resolver.resolve(provider).map_err(|e| {
            warn_log!("Config from {} rejected: {}", provider.source(), e);
            Error::from(e)
        })?;
        Self::from_resolved(&config)
    }

    /// Context from already resolved settings
    pub fn from_resolved(config: &ResolvedConfig) -> Result<Self> {
        let logger = Logger::from_config(config)?;
        info_log!("Created context ({:?}) from {}", logger, config.source);
        Ok(Self::new(logger))
    }

    /// Context from the discovered configuration file
    pub fn discover() -> Result<Self> {
        Self::from_provider(&FileConfigProvider::discover(), &ConfigResolver::new())
    }

    /// Context from an explicit configuration file, which must exist
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let provider = FileConfigProvider::new(path);
        Self::from_provider(&provider, &ConfigResolver::new())
    }

    /// Context from the discovered configuration with `apps.<app_name>` applied
    pub fn for_app(app_name: &str) -> Result<Self> {
        debug_log!("Creating context for app {}", app_name);
        Self::from_provider(&FileConfigProvider::discover(), &ConfigResolver::for_app(app_name))
    }

    pub fn threshold(&self) -> Level {
        self.logger.lock().threshold()
    }

    pub fn colors(&self) -> bool {
        self.logger.lock().colors()
    }

    /// Log a record; failures land in the last-error cell
    ///
    /// Returns whether the record was written.
    pub fn log(&self, level: Level, tag: &str, message: &str) -> bool {
        let result = self.logger.lock().log(level, tag, message);
        match result {
            Ok(written) => written,
            Err(e) => {
                self.record_error(&e);
                false
            }
        }
    }

    pub fn trace(&self, tag: &str, message: &str) -> bool {
        self.log(Level::Trace, tag, message)
    }

    pub fn debug(&self, tag: &str, message: &str) -> bool {
        self.log(Level::Debug, tag, message)
    }

    pub fn info(&self, tag: &str, message: &str) -> bool {
        self.log(Level::Info, tag, message)
    }

    pub fn warn(&self, tag: &str, message: &str) -> bool {
        self.log(Level::Warn, tag, message)
    }

    pub fn error(&self, tag: &str, message: &str) -> bool {
        self.log(Level::Error, tag, message)
    }

    /// Flush the sink; a failure is also recorded
    pub fn flush(&self) -> Result<()> {
        let result = self.logger.lock().flush();
        if let Err(e) = &result {
            self.record_error(e);
        }
        result
    }

    /// Store `err` as the most recent failure
    pub fn record_error(&self, err: &Error) {
        let message = err.to_string();
        warn_log!("{}", message);
        self.last_error.record(message);
    }

    /// Most recent failure, if any
    pub fn last_error(&self) -> Option<String> {
        self.last_error.get()
    }

    /// See [`ErrorSlot::copy_into`]
    pub fn copy_last_error(&self, buf: &mut [u8]) -> Option<usize> {
        self.last_error.copy_into(buf)
    }

    pub fn clear_last_error(&self) {
        self.last_error.clear();
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("logger", &*self.logger.lock())
            .field("last_error", &self.last_error.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, ConfigFile, MemoryConfigProvider, OutputConfig};
    use crate::logging::MemorySink;
    use std::fs;

    fn memory_context(level: Level, colors: bool) -> (Context, MemorySink) {
        let probe = MemorySink::new();
        let ctx = Context::new(Logger::new(level, colors, Box::new(probe.clone())));
        (ctx, probe)
    }

    #[test]
    fn test_simple_for_every_level_and_color() {
        for level in Level::ALL {
            for colors in [false, true] {
                let ctx = Context::simple(level, colors);
                assert_eq!(ctx.threshold(), level);
                assert_eq!(ctx.colors(), colors);
                assert!(ctx.last_error().is_none());
            }
        }
    }

    #[test]
    fn test_filtering_records_no_error() {
        let (ctx, probe) = memory_context(Level::Debug, true);
        assert!(!ctx.trace("T", "x"));
        assert!(probe.lines().is_empty());
        assert!(ctx.debug("T", "x"));

        let lines = probe.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("[DEBUG]"));
        assert!(lines[0].contains("[T]"));
        assert!(ctx.last_error().is_none());
    }

    #[test]
    fn test_write_failure_is_captured() {
        let (ctx, probe) = memory_context(Level::Info, false);
        probe.set_failing(true);

        assert!(!ctx.error("T", "m"));
        let err = ctx.last_error().unwrap();
        assert!(err.contains("Sink write failed"));
        assert!(err.contains("memory sink is closed"));
    }

    #[test]
    fn test_flush() {
        let (ctx, probe) = memory_context(Level::Info, false);
        assert!(ctx.flush().is_ok());
        assert_eq!(probe.flush_count(), 1);
        assert!(ctx.last_error().is_none());

        probe.set_failing(true);
        assert!(ctx.flush().is_err());
        assert!(ctx.last_error().unwrap().contains("Sink flush failed"));
    }

    #[test]
    fn test_error_persists_until_replaced_or_cleared() {
        let (ctx, probe) = memory_context(Level::Info, false);
        probe.set_failing(true);
        ctx.info("T", "lost");
        probe.set_failing(false);

        // A later success leaves the last failure in place
        assert!(ctx.info("T", "kept"));
        assert!(ctx.last_error().is_some());

        ctx.record_error(&Error::InvalidLevel(7));
        assert_eq!(ctx.last_error().unwrap(), "Invalid log level 7 (expected 0..=4)");

        ctx.clear_last_error();
        assert!(ctx.last_error().is_none());
    }

    #[test]
    fn test_from_provider() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let provider = MemoryConfigProvider::with_config(ConfigFile {
            level: Some("warn".to_string()),
            colors: Some(false),
            output: Some(OutputConfig::File { path: path.clone() }),
            ..Default::default()
        });

        let ctx = Context::from_provider(&provider, &ConfigResolver::new()).unwrap();
        assert_eq!(ctx.threshold(), Level::Warn);
        assert!(!ctx.info("T", "filtered"));
        assert!(ctx.warn("T", "kept"));
        ctx.flush().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[WARN][T] kept"));
        assert!(!content.contains("filtered"));
    }

    #[test]
    fn test_app_overrides_reach_sink() {
        let dir = tempfile::tempdir().unwrap();
        let main_log = dir.path().join("main.log");
        let worker_log = dir.path().join("worker.log");
        let mut config = ConfigFile {
            level: Some("warn".to_string()),
            output: Some(OutputConfig::File { path: main_log.clone() }),
            ..Default::default()
        };
        config.apps.insert(
            "worker".to_string(),
            AppConfig {
                level: Some("trace".to_string()),
                output: Some(OutputConfig::File { path: worker_log.clone() }),
                ..Default::default()
            },
        );
        let provider = MemoryConfigProvider::with_config(config);

        let worker = Context::from_provider(&provider, &ConfigResolver::for_app("worker")).unwrap();
        assert_eq!(worker.threshold(), Level::Trace);
        assert!(worker.trace("JOB", "picked up"));

        let other = Context::from_provider(&provider, &ConfigResolver::for_app("other")).unwrap();
        assert_eq!(other.threshold(), Level::Warn);
        assert!(!other.info("JOB", "skipped"));

        assert!(fs::read_to_string(&worker_log).unwrap().contains("[TRACE][JOB] picked up"));
        assert!(!main_log.exists() || fs::read_to_string(&main_log).unwrap().is_empty());
    }

    #[test]
    fn test_settings_come_from_logger() {
        let (ctx, _probe) = memory_context(Level::Warn, true);
        assert_eq!(ctx.threshold(), Level::Warn);
        assert!(ctx.colors());
        let debug = format!("{:?}", ctx);
        assert!(debug.contains("Warn"));
        assert!(debug.contains("memory"));
    }

    #[test]
    fn test_from_provider_rejects_bad_config() {
        let provider = MemoryConfigProvider::with_config(ConfigFile {
            level: Some("shouty".to_string()),
            ..Default::default()
        });
        let err = Context::from_provider(&provider, &ConfigResolver::new()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("logging.yaml");
        fs::write(&config_path, "level: error\ncolors: false\n").unwrap();

        let ctx = Context::from_path(&config_path).unwrap();
        assert_eq!(ctx.threshold(), Level::Error);
        assert!(!ctx.colors());

        assert!(Context::from_path(dir.path().join("missing.yaml")).is_err());
    }

    #[test]
    fn test_repeated_create_drop_releases_sink() {
        let probe = MemorySink::new();
        for _ in 0..1000 {
            let ctx = Context::new(Logger::new(Level::Info, false, Box::new(probe.clone())));
            assert_eq!(probe.handle_count(), 2);
            drop(ctx);
            assert_eq!(probe.handle_count(), 1);
        }
    }

    #[test]
    fn test_context_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Context>();
    }
}
