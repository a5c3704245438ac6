//! In-memory configuration provider

use parking_lot::RwLock;

use super::file::ConfigFile;
use super::traits::{ConfigProvider, ConfigResult};

/// In-memory configuration provider for testing
#[derive(Debug, Default)]
pub struct MemoryConfigProvider {
    config: RwLock<ConfigFile>,
}

impl MemoryConfigProvider {
    /// Create a provider holding the default (empty) document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider holding the given document
    pub fn with_config(config: ConfigFile) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }

    /// Replace the held document
    pub fn set_config(&self, config: ConfigFile) {
        *self.config.write() = config;
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn load(&self) -> ConfigResult<ConfigFile> {
        Ok(self.config.read().clone())
    }

    fn source(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_config_provider() {
        let provider = MemoryConfigProvider::new();
        assert_eq!(provider.load().unwrap(), ConfigFile::default());

        let config = ConfigFile {
            level: Some("warn".to_string()),
            colors: Some(false),
            ..Default::default()
        };
        provider.set_config(config.clone());
        assert_eq!(provider.load().unwrap(), config);
        assert_eq!(provider.source(), "memory");
    }
}
