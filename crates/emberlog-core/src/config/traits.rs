//! Configuration provider trait

use std::path::PathBuf;

use super::file::ConfigFile;

/// Configuration source abstraction
///
/// Implementations:
/// - `FileConfigProvider`: YAML or JSON file, explicit or discovered
/// - `MemoryConfigProvider`: In-memory for testing and embedding
pub trait ConfigProvider: Send + Sync {
    /// Load the raw configuration document
    fn load(&self) -> ConfigResult<ConfigFile>;

    /// Human-readable description of where the configuration comes from
    fn source(&self) -> String;
}

/// Errors that can occur while loading or resolving configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Invalid level in configuration: {0}")]
    InvalidLevel(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
