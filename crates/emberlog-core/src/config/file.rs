//! File-based configuration provider (YAML or JSON)
//!
//! The default location is `<config dir>/emberlog/config.yaml`
//! (`~/.config/emberlog/config.yaml` on Linux), overridable through the
//! `EMBERLOG_CONFIG` environment variable.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::traits::{ConfigError, ConfigProvider, ConfigResult};
use crate::{debug_log, info_log};

/// Environment variable naming an explicit config file for discovery
pub const CONFIG_ENV_VAR: &str = "EMBERLOG_CONFIG";

/// Configuration file structure
///
/// Every field is optional; the resolver fills in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigFile {
    /// Minimum level name (`trace`, `debug`, `info`, `warn`, `error`)
    #[serde(default)]
    pub level: Option<String>,

    /// ANSI decoration on console output
    #[serde(default)]
    pub colors: Option<bool>,

    /// Where records go
    #[serde(default)]
    pub output: Option<OutputConfig>,

    /// Per-application overrides, keyed by app name
    #[serde(default)]
    pub apps: HashMap<String, AppConfig>,
}

/// Overrides applied on top of the top-level settings for one app
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub colors: Option<bool>,
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

/// Sink selection
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OutputConfig {
    /// stdout, with warnings and errors on stderr
    #[default]
    Console,
    /// Append to a file, creating it and its parent directory if needed
    File { path: PathBuf },
}

/// On-disk document format, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// `.json` files are JSON, everything else is YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Yaml,
        }
    }

    fn parse(&self, content: &str) -> Result<ConfigFile, String> {
        match self {
            ConfigFormat::Yaml => {
                // An empty YAML document deserializes to unit, not a map
                if content.trim().is_empty() {
                    return Ok(ConfigFile::default());
                }
                serde_yaml::from_str(content).map_err(|e| e.to_string())
            }
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

/// File-based configuration provider
///
/// # Example
///
/// ```no_run
/// use emberlog_core::config::{ConfigProvider, FileConfigProvider};
///
/// // Explicit file: must exist
/// let explicit = FileConfigProvider::new("/etc/myapp/logging.yaml");
///
/// // Discovered file: defaults when absent
/// let discovered = FileConfigProvider::discover();
/// let config = discovered.load().unwrap();
/// ```
pub struct FileConfigProvider {
    path: PathBuf,
    required: bool,
    cache: RwLock<Option<ConfigFile>>,
}

impl FileConfigProvider {
    /// Provider for an explicitly named file; a missing file is an error
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: true,
            cache: RwLock::new(None),
        }
    }

    /// Provider for the discovered config location; a missing file yields defaults
    ///
    /// `EMBERLOG_CONFIG` wins; otherwise `<config dir>/emberlog/config.yaml`,
    /// where the config dir falls back to `~/.config` and then `./.config`.
    pub fn discover() -> Self {
        Self::discover_with(
            std::env::var_os(CONFIG_ENV_VAR),
            dirs::config_dir(),
            dirs::home_dir(),
        )
    }

    fn discover_with(
        env_path: Option<OsString>,
        config_dir: Option<PathBuf>,
        home_dir: Option<PathBuf>,
    ) -> Self {
        let path = match env_path.filter(|p| !p.is_empty()) {
            Some(p) => PathBuf::from(p),
            None => config_dir
                .unwrap_or_else(|| home_dir.unwrap_or_else(|| PathBuf::from(".")).join(".config"))
                .join("emberlog")
                .join("config.yaml"),
        };
        debug_log!("Discovered config path {}", path.display());

        Self {
            path,
            required: false,
            cache: RwLock::new(None),
        }
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a missing file is treated as an error
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Check if the config file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn read(&self) -> ConfigResult<ConfigFile> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound && !self.required => {
                info_log!("{} not found, using defaults", self.path.display());
                return Ok(ConfigFile::default());
            }
            Err(e) => return Err(e.into()),
        };

        ConfigFormat::from_path(&self.path)
            .parse(&content)
            .map_err(|message| ConfigError::Parse {
                path: self.path.clone(),
                message,
            })
    }

    /// Reload config from disk (invalidate cache)
    pub fn reload(&self) -> ConfigResult<ConfigFile> {
        let config = self.read()?;
        *self.cache.write() = Some(config.clone());
        Ok(config)
    }
}

impl std::fmt::Debug for FileConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileConfigProvider")
            .field("path", &self.path)
            .field("required", &self.required)
            .field("exists", &self.exists())
            .finish()
    }
}

impl ConfigProvider for FileConfigProvider {
    fn load(&self) -> ConfigResult<ConfigFile> {
        if let Some(config) = self.cache.read().as_ref() {
            return Ok(config.clone());
        }
        self.reload()
    }

    fn source(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_yaml_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "level: debug\ncolors: false\noutput:\n  kind: file\n  path: /tmp/app.log\napps:\n  worker:\n    level: trace\n",
        )
        .unwrap();

        let config = FileConfigProvider::new(&path).load().unwrap();
        assert_eq!(config.level.as_deref(), Some("debug"));
        assert_eq!(config.colors, Some(false));
        assert_eq!(
            config.output,
            Some(OutputConfig::File { path: PathBuf::from("/tmp/app.log") })
        );
        assert_eq!(config.apps["worker"].level.as_deref(), Some("trace"));
    }

    #[test]
    fn test_json_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"level": "warn", "output": {"kind": "console"}}"#).unwrap();

        let config = FileConfigProvider::new(&path).load().unwrap();
        assert_eq!(config.level.as_deref(), Some("warn"));
        assert_eq!(config.output, Some(OutputConfig::Console));
        assert!(config.colors.is_none());
    }

    #[test]
    fn test_empty_file_is_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "").unwrap();

        assert_eq!(FileConfigProvider::new(&path).load().unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_missing_required_file_fails() {
        let dir = tempdir().unwrap();
        let provider = FileConfigProvider::new(dir.path().join("nope.yaml"));
        assert!(matches!(provider.load(), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_missing_discovered_file_defaults() {
        let dir = tempdir().unwrap();
        let provider = FileConfigProvider::discover_with(None, Some(dir.path().to_path_buf()), None);
        assert!(!provider.is_required());
        assert_eq!(provider.path(), dir.path().join("emberlog").join("config.yaml"));
        assert_eq!(provider.load().unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_env_path_wins() {
        let provider = FileConfigProvider::discover_with(
            Some(OsString::from("/srv/logging.yaml")),
            Some(PathBuf::from("/home/user/.config")),
            None,
        );
        assert_eq!(provider.path(), Path::new("/srv/logging.yaml"));
    }

    #[test]
    fn test_config_dir_fallbacks() {
        // Empty env var counts as unset
        let provider = FileConfigProvider::discover_with(
            Some(OsString::new()),
            None,
            Some(PathBuf::from("/home/user")),
        );
        assert_eq!(provider.path(), Path::new("/home/user/.config/emberlog/config.yaml"));

        let provider = FileConfigProvider::discover_with(None, None, None);
        assert_eq!(provider.path(), Path::new("./.config/emberlog/config.yaml"));
        assert!(!provider.is_required());
    }

    #[test]
    fn test_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "level: [unterminated").unwrap();

        match FileConfigProvider::new(&path).load() {
            Err(ConfigError::Parse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_cache_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "level: info").unwrap();

        let provider = FileConfigProvider::new(&path);
        assert_eq!(provider.load().unwrap().level.as_deref(), Some("info"));

        fs::write(&path, "level: error").unwrap();
        // Cached until reloaded
        assert_eq!(provider.load().unwrap().level.as_deref(), Some("info"));
        assert_eq!(provider.reload().unwrap().level.as_deref(), Some("error"));
        assert_eq!(provider.load().unwrap().level.as_deref(), Some("error"));
    }
}
