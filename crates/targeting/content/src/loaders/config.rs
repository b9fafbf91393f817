//! Targeting configuration loader.

use std::path::Path;

use anyhow::Context;
use targeting_core::TargetingConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for targeting configuration from TOML files.
///
/// Missing keys fall back to [`TargetingConfig::default`]. The parsed config
/// is validated before it is returned.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<TargetingConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in config file {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<TargetingConfig> {
        let config: TargetingConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes `config` back to TOML.
    pub fn to_toml(config: &TargetingConfig) -> LoadResult<String> {
        toml::to_string_pretty(config)
            .map_err(|e| anyhow::anyhow!("Failed to serialize config TOML: {}", e))
    }
}
