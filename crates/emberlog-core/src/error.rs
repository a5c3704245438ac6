//! Engine error type

use std::path::PathBuf;
use std::str::Utf8Error;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors produced while building or driving a logger
///
/// Construction errors make a constructor fail as a whole; everything that
/// happens on a live context is captured into its last-error cell instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to open log file {}: {source}", .path.display())]
    SinkOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Sink write failed: {0}")]
    SinkWrite(#[source] std::io::Error),

    #[error("Sink flush failed: {0}")]
    SinkFlush(#[source] std::io::Error),

    #[error("Invalid UTF-8 in {argument}: {source}")]
    InvalidEncoding {
        argument: &'static str,
        #[source]
        source: Utf8Error,
    },

    #[error("Null pointer passed for {0}")]
    NullArgument(&'static str),

    #[error("Invalid log level {0} (expected 0..=4)")]
    InvalidLevel(i32),

    #[error("Internal panic: {0}")]
    Panic(String),
}

pub type Result<T> = std::result::Result<T, Error>;
