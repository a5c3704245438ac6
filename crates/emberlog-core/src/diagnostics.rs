//! Self-diagnostics for the engine
//!
//! A process-wide log the engine writes about itself (config discovery,
//! sink failures, rejected FFI input). It never touches a context's sink,
//! so it is useful when the embedding application swallows stdout/stderr.
//!
//! Disabled unless `EMBERLOG_DEBUG` is `1` or `true`. Lines go to
//! `<temp dir>/emberlog-debug.log`; `EMBERLOG_DEBUG_LEVEL` sets the minimum
//! level (default `debug`).

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::level::Level;

/// Global diagnostics state
struct DiagnosticsState {
    file: Option<File>,
    min_level: Level,
    enabled: bool,
}

impl DiagnosticsState {
    fn from_env() -> Self {
        let enabled = std::env::var("EMBERLOG_DEBUG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let min_level = std::env::var("EMBERLOG_DEBUG_LEVEL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(Level::Debug);

        // Only create the file when someone asked for it
        let file = if enabled { Self::open(&log_file_path()) } else { None };

        Self { file, min_level, enabled }
    }

    fn open(path: &Path) -> Option<File> {
        OpenOptions::new().create(true).append(true).open(path).ok()
    }

    fn write(&mut self, level: Level, module: &str, message: &str) {
        if !self.enabled || level < self.min_level {
            return;
        }

        if let Some(ref mut file) = self.file {
            let timestamp = Local::now().format("%H:%M:%S%.3f");
            let _ = writeln!(file, "[{}] [{:<5}] [{}] {}", timestamp, level.label(), module, message);
            let _ = file.flush();
        }
    }
}

static DIAGNOSTICS: Lazy<Mutex<DiagnosticsState>> = Lazy::new(|| Mutex::new(DiagnosticsState::from_env()));

/// Log a diagnostic message at the specified level
pub fn log(level: Level, module: &str, message: &str) {
    DIAGNOSTICS.lock().write(level, module, message);
}

pub fn trace(module: &str, message: &str) {
    log(Level::Trace, module, message);
}

pub fn debug(module: &str, message: &str) {
    log(Level::Debug, module, message);
}

pub fn info(module: &str, message: &str) {
    log(Level::Info, module, message);
}

pub fn warn(module: &str, message: &str) {
    log(Level::Warn, module, message);
}

pub fn error(module: &str, message: &str) {
    log(Level::Error, module, message);
}

/// Convenience macros for diagnostics with automatic module name
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::diagnostics::debug(module_path!(), &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        $crate::diagnostics::info(module_path!(), &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        $crate::diagnostics::warn(module_path!(), &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        $crate::diagnostics::error(module_path!(), &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        $crate::diagnostics::trace(module_path!(), &format!($($arg)*))
    };
}

/// Get the path to the diagnostics file
pub fn log_file_path() -> PathBuf {
    std::env::temp_dir().join("emberlog-debug.log")
}
