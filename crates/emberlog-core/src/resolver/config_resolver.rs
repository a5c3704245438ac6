//! Configuration resolution
//!
//! Turns a raw `ConfigFile` from any `ConfigProvider` into the validated
//! `(level, colors, output)` triple a logger is built from.
//!
//! Precedence (later wins):
//! 1. Built-in defaults (`info`, colors on, console)
//! 2. Top-level document settings
//! 3. The `apps.<name>` section, when an app name is given and present

use crate::config::{ConfigError, ConfigProvider, ConfigResult, OutputConfig};
use crate::{debug_log, trace_log};
use crate::level::Level;

/// Validated settings for one logger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub level: Level,
    pub colors: bool,
    pub output: OutputConfig,
    /// Human-readable description of where the settings came from
    pub source: String,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            colors: true,
            output: OutputConfig::Console,
            source: "defaults".to_string(),
        }
    }
}

impl ResolvedConfig {
    /// Settings given directly by the caller, console output
    pub fn explicit(level: Level, colors: bool) -> Self {
        Self {
            level,
            colors,
            output: OutputConfig::Console,
            source: "explicit".to_string(),
        }
    }
}

/// Resolves provider documents, optionally through a per-app section
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    app_name: Option<String>,
}

impl ConfigResolver {
    /// Resolver using only the top-level settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver that layers `apps.<app_name>` over the top-level settings
    pub fn for_app(app_name: impl Into<String>) -> Self {
        Self {
            app_name: Some(app_name.into()),
        }
    }

    pub fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }

    /// Load and validate the provider's document
    ///
    /// Fails on any load error or on a level name that isn't recognised;
    /// nothing is defaulted past a bad value.
    pub fn resolve(&self, provider: &dyn ConfigProvider) -> ConfigResult<ResolvedConfig> {
        let file = provider.load()?;
        let mut resolved = ResolvedConfig {
            source: provider.source(),
            ..ResolvedConfig::default()
        };

        let mut level = file.level;
        let mut colors = file.colors;
        let mut output = file.output;

        if let Some(name) = &self.app_name {
            match file.apps.get(name) {
                Some(app) => {
                    level = app.level.clone().or(level);
                    colors = app.colors.or(colors);
                    output = app.output.clone().or(output);
                }
                None => trace_log!(
                    "No apps.{} section in {}, using top-level settings",
                    name,
                    resolved.source
                ),
            }
        }

        if let Some(name) = level {
            resolved.level = name
                .parse()
                .map_err(|_| ConfigError::InvalidLevel(name.clone()))?;
        }
        if let Some(colors) = colors {
            resolved.colors = colors;
        }
        if let Some(output) = output {
            resolved.output = output;
        }

        debug_log!(
            "Resolved level={} colors={} output={:?} from {}",
            resolved.level.as_str(),
            resolved.colors,
            resolved.output,
            resolved.source
        );
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, ConfigFile, MemoryConfigProvider};
    use std::path::PathBuf;

    #[test]
    fn test_defaults() {
        let provider = MemoryConfigProvider::new();
        let resolved = ConfigResolver::new().resolve(&provider).unwrap();
        assert_eq!(resolved.level, Level::Info);
        assert!(resolved.colors);
        assert_eq!(resolved.output, OutputConfig::Console);
        assert_eq!(resolved.source, "memory");
    }

    #[test]
    fn test_top_level_settings() {
        let provider = MemoryConfigProvider::with_config(ConfigFile {
            level: Some("Warning".to_string()),
            colors: Some(false),
            ..Default::default()
        });
        let resolved = ConfigResolver::new().resolve(&provider).unwrap();
        assert_eq!(resolved.level, Level::Warn);
        assert!(!resolved.colors);
    }

    #[test]
    fn test_invalid_level_rejected() {
        let provider = MemoryConfigProvider::with_config(ConfigFile {
            level: Some("chatty".to_string()),
            ..Default::default()
        });
        let err = ConfigResolver::new().resolve(&provider).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLevel(ref l) if l == "chatty"));
    }

    #[test]
    fn test_app_overrides() {
        let mut config = ConfigFile {
            level: Some("info".to_string()),
            colors: Some(true),
            ..Default::default()
        };
        config.apps.insert(
            "worker".to_string(),
            AppConfig {
                level: Some("trace".to_string()),
                colors: None,
                output: Some(OutputConfig::File { path: PathBuf::from("worker.log") }),
            },
        );
        let provider = MemoryConfigProvider::with_config(config);

        let resolved = ConfigResolver::for_app("worker").resolve(&provider).unwrap();
        assert_eq!(resolved.level, Level::Trace);
        assert!(resolved.colors);
        assert_eq!(resolved.output, OutputConfig::File { path: PathBuf::from("worker.log") });

        let fallback = ConfigResolver::for_app("other").resolve(&provider).unwrap();
        assert_eq!(fallback.level, Level::Info);
        assert_eq!(fallback.output, OutputConfig::Console);
    }
}
