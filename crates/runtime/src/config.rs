//! Session configuration assembled from the process environment.
use std::env;
use std::path::PathBuf;

use escape_content::{ConfigLoader, MapLoader, Scenario, ScenarioGenerator};
use escape_core::{AdversaryAlgorithm, EscapeConfig, MapSize, SearchAlgorithm};

use crate::error::Result;

/// Everything needed to set up one session.
///
/// Overrides are applied on top of the TOML file named by `config_path`, or on
/// top of [`EscapeConfig::default`] when no file is given.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuntimeConfig {
    pub config_path: Option<PathBuf>,
    /// Hand-authored RON layout; when unset a scenario is generated.
    pub map_path: Option<PathBuf>,
    pub seed: u64,
    pub session_id: Option<String>,
    /// Escaping also requires holding every key.
    pub require_all_keys: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub map_size: Option<MapSize>,
    pub search_algorithm: Option<SearchAlgorithm>,
    pub guard_search: Option<AdversaryAlgorithm>,
    pub minimax_depth: Option<u32>,
    pub max_turns: Option<u32>,
    pub guard_enabled: Option<bool>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut EscapeConfig) {
        if let Some(map_size) = self.map_size {
            config.map_size = map_size;
        }
        if let Some(algorithm) = self.search_algorithm {
            config.search_algorithm = algorithm;
        }
        if let Some(algorithm) = self.guard_search {
            config.guard_search = algorithm;
        }
        if let Some(depth) = self.minimax_depth {
            config.minimax_depth = depth.max(1);
        }
        if let Some(max_turns) = self.max_turns {
            config.max_turns = max_turns.max(1);
        }
        if let Some(enabled) = self.guard_enabled {
            config.guard_enabled = enabled;
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ESCAPE_CONFIG` - TOML file with an `EscapeConfig` (default: built-in defaults)
    /// - `ESCAPE_MAP` - RON room layout (default: generated scenario)
    /// - `ESCAPE_SEED` - Seed for scenario and puzzle generation (default: 0)
    /// - `ESCAPE_SESSION_ID` - Session identifier used for log files (default: none)
    /// - `ESCAPE_MAP_SIZE` - `small`, `medium` or `large`
    /// - `ESCAPE_SEARCH` - `bfs` or `astar`
    /// - `ESCAPE_GUARD_SEARCH` - `minimax` or `alpha_beta`
    /// - `ESCAPE_MINIMAX_DEPTH` - Guard look-ahead in plies
    /// - `ESCAPE_MAX_TURNS` - Turn limit
    /// - `ESCAPE_GUARD_ENABLED` - `true` / `false`
    /// - `ESCAPE_REQUIRE_ALL_KEYS` - `true` / `false` (default: false)
    ///
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        let overrides = ConfigOverrides {
            map_size: read_env("ESCAPE_MAP_SIZE"),
            search_algorithm: read_env("ESCAPE_SEARCH"),
            guard_search: read_env("ESCAPE_GUARD_SEARCH"),
            minimax_depth: read_env("ESCAPE_MINIMAX_DEPTH"),
            max_turns: read_env("ESCAPE_MAX_TURNS"),
            guard_enabled: read_env("ESCAPE_GUARD_ENABLED"),
        };

        Self {
            config_path: env::var_os("ESCAPE_CONFIG").map(PathBuf::from),
            map_path: env::var_os("ESCAPE_MAP").map(PathBuf::from),
            seed: read_env("ESCAPE_SEED").unwrap_or_default(),
            session_id: env::var("ESCAPE_SESSION_ID").ok(),
            require_all_keys: read_env("ESCAPE_REQUIRE_ALL_KEYS").unwrap_or(false),
            overrides,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Loads the configuration file (if any) and applies the overrides.
    pub fn escape_config(&self) -> Result<EscapeConfig> {
        let mut config = match &self.config_path {
            Some(path) => ConfigLoader::load(path)?,
            None => EscapeConfig::default(),
        };
        self.overrides.apply(&mut config);
        Ok(config)
    }

    /// Loads the layout named by `map_path`, or generates one from `config`.
    pub fn scenario(&self, config: &EscapeConfig) -> Result<Scenario> {
        match &self.map_path {
            Some(path) => Ok(MapLoader::load(path)?),
            None => Ok(ScenarioGenerator::from_config(config).generate(self.seed)?),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_what_they_name() {
        let overrides = ConfigOverrides {
            search_algorithm: Some(SearchAlgorithm::Bfs),
            minimax_depth: Some(0),
            ..ConfigOverrides::default()
        };
        let mut config = EscapeConfig::default();
        overrides.apply(&mut config);

        assert_eq!(config.search_algorithm, SearchAlgorithm::Bfs);
        assert_eq!(config.minimax_depth, 1);
        assert_eq!(config.max_turns, EscapeConfig::DEFAULT_MAX_TURNS);
        assert!(config.guard_enabled);
    }

    #[test]
    fn generated_scenario_follows_map_size() {
        let runtime = RuntimeConfig {
            overrides: ConfigOverrides {
                map_size: Some(MapSize::Small),
                ..ConfigOverrides::default()
            },
            ..RuntimeConfig::default()
        };
        let config = runtime.escape_config().unwrap();
        let scenario = runtime.scenario(&config).unwrap();
        assert_eq!(scenario.environment.room_count(), 6);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let runtime = RuntimeConfig {
            config_path: Some(PathBuf::from("/nonexistent/escape.toml")),
            ..RuntimeConfig::default()
        };
        assert!(runtime.escape_config().is_err());
    }
}
