//! Content factory for loading setup data from a directory.

use std::path::{Path, PathBuf};

use escape_core::EscapeConfig;

use crate::loaders::{ConfigLoader, LoadResult, MapLoader};
use crate::scenario::Scenario;

/// Content factory that loads all setup data from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── maps/
///     ├── tutorial.ron
///     └── vault.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load configuration from `config.toml`, falling back to defaults when
    /// the file does not exist.
    pub fn load_config(&self) -> LoadResult<EscapeConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(EscapeConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load a layout from `maps/{map_name}.ron`.
    pub fn load_map(&self, map_name: &str) -> LoadResult<Scenario> {
        let path = self.data_dir.join("maps").join(format!("{}.ron", map_name));
        MapLoader::load(&path)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use escape_core::RoomId;

    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), EscapeConfig::default());
    }

    #[test]
    fn loads_maps_by_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("maps")).unwrap();
        std::fs::write(
            dir.path().join("maps").join("pair.ron"),
            r#"(rooms: [(label: "A"), (label: "B", exit: true)], doors: [(0, 1, false)], guard: 1)"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("config.toml"), "max_turns = 12\n").unwrap();

        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap().max_turns, 12);
        let scenario = factory.load_map("pair").unwrap();
        assert_eq!(scenario.environment.exit(), RoomId(1));
        assert!(factory.load_map("missing").is_err());
    }
}
