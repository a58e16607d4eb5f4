//! Game configuration constants and tunable parameters.

use crate::adversary::AdversaryAlgorithm;
use crate::puzzle::DifficultyPolicy;
use crate::search::SearchAlgorithm;

/// Map size presets controlling how many rooms a generated scenario has.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MapSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl MapSize {
    pub const fn room_count(self) -> usize {
        match self {
            MapSize::Small => 6,
            MapSize::Medium => 12,
            MapSize::Large => 24,
        }
    }
}

/// Read-only settings consumed by the decision core and the session layer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EscapeConfig {
    pub map_size: MapSize,
    pub num_keys: usize,
    pub num_traps: usize,
    pub trap_damage: u32,
    pub puzzle_difficulty: DifficultyPolicy,

    pub guard_enabled: bool,
    /// Plies explored by the guard's adversarial search. Keep single-digit.
    pub minimax_depth: u32,
    pub guard_search: AdversaryAlgorithm,
    /// Rooms (by unlocked-door distance) within which the guard detects the agent.
    pub guard_vision_range: u32,

    /// Prior belief that any room hides a trap.
    pub initial_trap_probability: f64,
    /// Probability that a trap-free room is observed as safe. Must lie in (0, 1).
    pub observation_reliability: f64,

    pub agent_health: u32,
    pub search_algorithm: SearchAlgorithm,
    pub max_turns: u32,

    /// Highest trap probability the autopilot still treats as safe to explore.
    pub risk_tolerance: f64,
}

impl EscapeConfig {
    pub const DEFAULT_NUM_KEYS: usize = 3;
    pub const DEFAULT_NUM_TRAPS: usize = 4;
    pub const DEFAULT_TRAP_DAMAGE: u32 = 20;
    pub const DEFAULT_MINIMAX_DEPTH: u32 = 3;
    pub const DEFAULT_GUARD_VISION_RANGE: u32 = 3;
    pub const DEFAULT_TRAP_PROBABILITY: f64 = 0.2;
    pub const DEFAULT_OBSERVATION_RELIABILITY: f64 = 0.9;
    pub const DEFAULT_AGENT_HEALTH: u32 = 100;
    pub const DEFAULT_MAX_TURNS: u32 = 100;
    pub const DEFAULT_RISK_TOLERANCE: f64 = 0.3;

    pub fn new() -> Self {
        Self {
            map_size: MapSize::default(),
            num_keys: Self::DEFAULT_NUM_KEYS,
            num_traps: Self::DEFAULT_NUM_TRAPS,
            trap_damage: Self::DEFAULT_TRAP_DAMAGE,
            puzzle_difficulty: DifficultyPolicy::default(),
            guard_enabled: true,
            minimax_depth: Self::DEFAULT_MINIMAX_DEPTH,
            guard_search: AdversaryAlgorithm::default(),
            guard_vision_range: Self::DEFAULT_GUARD_VISION_RANGE,
            initial_trap_probability: Self::DEFAULT_TRAP_PROBABILITY,
            observation_reliability: Self::DEFAULT_OBSERVATION_RELIABILITY,
            agent_health: Self::DEFAULT_AGENT_HEALTH,
            search_algorithm: SearchAlgorithm::default(),
            max_turns: Self::DEFAULT_MAX_TURNS,
            risk_tolerance: Self::DEFAULT_RISK_TOLERANCE,
        }
    }

    pub fn room_count(&self) -> usize {
        self.map_size.room_count()
    }

    pub fn with_map_size(mut self, map_size: MapSize) -> Self {
        self.map_size = map_size;
        self
    }

    pub fn with_search_algorithm(mut self, algorithm: SearchAlgorithm) -> Self {
        self.search_algorithm = algorithm;
        self
    }

    pub fn with_guard_search(mut self, algorithm: AdversaryAlgorithm, depth: u32) -> Self {
        self.guard_search = algorithm;
        self.minimax_depth = depth;
        self
    }
}

impl Default for EscapeConfig {
    fn default() -> Self {
        Self::new()
    }
}
