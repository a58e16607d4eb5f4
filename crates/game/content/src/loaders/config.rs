//! Escape configuration loader.

use std::path::Path;

use escape_core::EscapeConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`EscapeConfig`] from TOML files.
///
/// Every field is optional; missing ones keep their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<EscapeConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EscapeConfig> {
        let config: EscapeConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        let reliability = config.observation_reliability;
        if !(reliability > 0.0 && reliability < 1.0) {
            anyhow::bail!("observation_reliability must lie in (0, 1), got {reliability}");
        }
        let prior = config.initial_trap_probability;
        if !(0.0..=1.0).contains(&prior) {
            anyhow::bail!("initial_trap_probability must lie in [0, 1], got {prior}");
        }

        Ok(config)
    }
}
