//! Hand-authored room layouts.
//!
//! ```ron
//! (
//!     rooms: [
//!         (label: "Entrance"),
//!         (label: "Library", key: Some(0)),
//!         (label: "Cellar", trap: true),
//!         (label: "Exit", exit: true),
//!     ],
//!     doors: [(0, 1, false), (1, 2, false), (2, 3, true)],
//!     guard: 2,
//! )
//! ```
//!
//! The agent starts in `start` (room 0 when omitted) and escapes through the
//! first room marked `exit`. Rooms touching a locked door get a puzzle.

use std::path::Path;

use escape_core::{Environment, KeyId, RoomFlags, RoomGraphBuilder, RoomId, RoomSpec};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};
use crate::scenario::Scenario;

#[derive(Debug, Clone, Deserialize)]
struct RoomRon {
    label: String,
    #[serde(default)]
    key: Option<u32>,
    #[serde(default)]
    trap: bool,
    #[serde(default)]
    exit: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct MapDataRon {
    rooms: Vec<RoomRon>,
    doors: Vec<(u32, u32, bool)>, // (a, b, locked)
    #[serde(default)]
    start: u32,
    guard: u32,
}

/// Loader for room layouts from RON files.
pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let data: MapDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        let mut builder = RoomGraphBuilder::new();
        for room in data.rooms {
            let mut spec = RoomSpec::new(room.label);
            if let Some(key) = room.key {
                spec = spec.with_key(KeyId(key));
            }
            if room.trap {
                spec = spec.with_trap();
            }
            if room.exit {
                spec = spec.exit();
            }
            builder.push_room(spec);
        }

        for &(a, b, locked) in &data.doors {
            builder.push_door(RoomId(a), RoomId(b), locked);
            if locked {
                for room in [RoomId(a), RoomId(b)] {
                    if let Some(spec) = builder.room_spec_mut(room) {
                        spec.flags.insert(RoomFlags::HAS_PUZZLE);
                    }
                }
            }
        }

        let graph = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Invalid map layout: {}", e))?;
        let guard_start = RoomId(data.guard);
        if !graph.contains(guard_start) {
            anyhow::bail!("Guard starts in unknown room {}", guard_start);
        }

        let exit = graph
            .rooms()
            .find(|room| room.is_exit())
            .map(|room| room.id())
            .ok_or_else(|| anyhow::anyhow!("Map has no exit room"))?;
        let environment = Environment::new(graph, RoomId(data.start), exit)
            .map_err(|e| anyhow::anyhow!("Invalid map layout: {}", e))?;

        Ok(Scenario {
            environment,
            guard_start,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = r#"(
    rooms: [
        (label: "Entrance"),
        (label: "Library", key: Some(0)),
        (label: "Cellar", trap: true),
        (label: "Exit", exit: true),
    ],
    doors: [(0, 1, false), (1, 2, false), (2, 3, true)],
    guard: 2,
)"#;

    #[test]
    fn loads_layout_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let scenario = MapLoader::load(file.path()).unwrap();
        let env = &scenario.environment;
        assert_eq!(env.room_count(), 4);
        assert_eq!(env.start(), RoomId(0));
        assert_eq!(env.exit(), RoomId(3));
        assert_eq!(env.total_keys(), 1);
        assert_eq!(scenario.guard_start, RoomId(2));

        let graph = env.graph();
        assert_eq!(graph.is_locked(RoomId(2), RoomId(3)), Some(true));
        assert!(graph.room(RoomId(2)).unwrap().has_puzzle());
        assert!(graph.room(RoomId(3)).unwrap().has_puzzle());
        assert!(!graph.room(RoomId(1)).unwrap().has_puzzle());
        assert!(graph.room(RoomId(2)).unwrap().has_trap());
    }

    #[test]
    fn rejects_layout_without_exit() {
        let err = MapLoader::parse(
            r#"(rooms: [(label: "A"), (label: "B")], doors: [(0, 1, false)], guard: 1)"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("no exit"));
    }

    #[test]
    fn rejects_disconnected_exit() {
        let err = MapLoader::parse(
            r#"(rooms: [(label: "A"), (label: "B"), (label: "C", exit: true)], doors: [(0, 1, false)], guard: 1)"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid map layout"));
    }

    #[test]
    fn rejects_self_loops_and_unknown_guard_rooms() {
        assert!(
            MapLoader::parse(r#"(rooms: [(label: "A", exit: true)], doors: [(0, 0, false)], guard: 0)"#)
                .is_err()
        );
        assert!(
            MapLoader::parse(
                r#"(rooms: [(label: "A"), (label: "B", exit: true)], doors: [(0, 1, false)], guard: 9)"#
            )
            .is_err()
        );
    }
}
