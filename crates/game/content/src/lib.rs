//! Setup data for escape sessions.
//!
//! This crate turns configuration and layouts into playable scenarios:
//! - Procedural scenarios (room topology, keys, traps, puzzles, guard start)
//! - Hand-authored room layouts (data-driven via RON)
//! - Game configuration (data-driven via TOML)
//!
//! Everything here runs once, before the first turn.

pub mod scenario;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use scenario::{Scenario, ScenarioError, ScenarioGenerator};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, MapLoader};
