//! The escaping agent: position, health, inventory and its trap beliefs.
use std::collections::BTreeSet;
use std::fmt;

use crate::belief::{BeliefError, BeliefModel, Observation, RiskLevel};
use crate::config::EscapeConfig;
use crate::environment::Environment;
use crate::error::{ErrorSeverity, GameError};
use crate::graph::{KeyId, RoomId};
use crate::search::{AStar, Bfs, PathFinder, SearchAlgorithm, SearchOutcome, SearchStats};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("cannot move from {from} to {to}: the door is locked")]
    Locked { from: RoomId, to: RoomId },

    #[error("cannot move from {from} to {to}: rooms are not connected")]
    NotConnected { from: RoomId, to: RoomId },

    #[error("cannot move: the agent is incapacitated")]
    Incapacitated,

    #[error(transparent)]
    Belief(#[from] BeliefError),
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            MoveError::Locked { .. } | MoveError::NotConnected { .. } => {
                ErrorSeverity::Recoverable
            }
            MoveError::Incapacitated => ErrorSeverity::Validation,
            MoveError::Belief(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            MoveError::Locked { .. } => "MOVE_LOCKED",
            MoveError::NotConnected { .. } => "MOVE_NOT_CONNECTED",
            MoveError::Incapacitated => "MOVE_INCAPACITATED",
            MoveError::Belief(e) => e.error_code(),
        }
    }
}

/// What happened on a successful move.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveReport {
    pub from: RoomId,
    pub to: RoomId,
    pub label: String,
    pub observation: Observation,
    /// Damage taken when a trap fired.
    pub damage: Option<u32>,
    pub key: Option<KeyId>,
    pub health: u32,
    pub keys_held: usize,
    pub total_keys: usize,
}

impl fmt::Display for MoveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "moved to {} (room {})", self.label, self.to)?;
        if let Some(damage) = self.damage {
            write!(f, " | trap triggered, lost {damage} health, health {}", self.health)?;
        }
        if let Some(key) = self.key {
            write!(f, " | found {key}, {}/{} keys", self.keys_held, self.total_keys)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    position: RoomId,
    health: u32,
    max_health: u32,
    trap_damage: u32,
    keys: BTreeSet<KeyId>,
    visited: BTreeSet<RoomId>,
    moves: u32,
    traps_triggered: u32,
    puzzles_solved: u32,
    search: SearchAlgorithm,
    beliefs: BeliefModel,
}

impl Agent {
    /// Places a fresh agent at the environment's start room.
    pub fn new(env: &Environment, config: &EscapeConfig) -> Self {
        let start = env.start();
        Self {
            position: start,
            health: config.agent_health,
            max_health: config.agent_health,
            trap_damage: config.trap_damage,
            keys: BTreeSet::new(),
            visited: BTreeSet::from([start]),
            moves: 0,
            traps_triggered: 0,
            puzzles_solved: 0,
            search: config.search_algorithm,
            beliefs: BeliefModel::new(
                env.room_count(),
                config.initial_trap_probability,
                config.observation_reliability,
            ),
        }
    }

    pub fn position(&self) -> RoomId {
        self.position
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn keys(&self) -> &BTreeSet<KeyId> {
        &self.keys
    }

    pub fn visited(&self) -> &BTreeSet<RoomId> {
        &self.visited
    }

    pub fn has_visited(&self, room: RoomId) -> bool {
        self.visited.contains(&room)
    }

    pub fn moves_made(&self) -> u32 {
        self.moves
    }

    pub fn traps_triggered(&self) -> u32 {
        self.traps_triggered
    }

    pub fn puzzles_solved(&self) -> u32 {
        self.puzzles_solved
    }

    pub fn search_algorithm(&self) -> SearchAlgorithm {
        self.search
    }

    pub fn beliefs(&self) -> &BeliefModel {
        &self.beliefs
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn has_escaped(&self, env: &Environment) -> bool {
        self.position == env.exit()
    }

    pub fn record_puzzle_solved(&mut self) {
        self.puzzles_solved += 1;
    }

    /// Moves through an unlocked door of the current room.
    ///
    /// Entering a room fires its trap (if armed) and picks up its key (if any);
    /// the outcome is folded into the belief model. A rejected move leaves the
    /// agent untouched.
    pub fn move_to(
        &mut self,
        env: &mut Environment,
        room: RoomId,
    ) -> Result<MoveReport, MoveError> {
        if !self.is_alive() {
            return Err(MoveError::Incapacitated);
        }

        let from = self.position;
        match env.graph().is_locked(from, room) {
            None => return Err(MoveError::NotConnected { from, to: room }),
            Some(true) => return Err(MoveError::Locked { from, to: room }),
            Some(false) => {}
        }

        let damage = env.trigger_trap(room).then_some(self.trap_damage);
        let observation = if damage.is_some() {
            Observation::Trap
        } else {
            Observation::Safe
        };
        self.beliefs.update(room, observation)?;

        self.position = room;
        self.moves += 1;
        self.visited.insert(room);
        if let Some(damage) = damage {
            self.health = self.health.saturating_sub(damage);
            self.traps_triggered += 1;
        }

        let key = env.collect_key(room);
        if let Some(key) = key {
            self.keys.insert(key);
        }

        Ok(MoveReport {
            from,
            to: room,
            label: env
                .room(room)
                .map(|r| r.label().to_owned())
                .unwrap_or_default(),
            observation,
            damage,
            key,
            health: self.health,
            keys_held: self.keys.len(),
            total_keys: env.total_keys(),
        })
    }

    pub fn find_path_bfs(
        &self,
        env: &Environment,
        start: RoomId,
        goal: RoomId,
    ) -> Option<Vec<RoomId>> {
        Bfs.find_path(env.graph(), start, goal).into_path()
    }

    pub fn find_path_astar(
        &self,
        env: &Environment,
        start: RoomId,
        goal: RoomId,
    ) -> Option<Vec<RoomId>> {
        AStar::with_beliefs(&self.beliefs)
            .find_path(env.graph(), start, goal)
            .into_path()
    }

    /// Runs the configured planner, keeping its statistics.
    pub fn find_path(&self, env: &Environment, start: RoomId, goal: RoomId) -> SearchOutcome {
        self.search.find_path(env.graph(), &self.beliefs, start, goal)
    }

    /// Closest room (by route length) still holding a key, with the route.
    pub fn find_nearest_key(&self, env: &Environment) -> Option<(RoomId, Vec<RoomId>)> {
        self.nearest(env, env.uncollected_key_rooms())
    }

    /// Route from the current position to the exit.
    pub fn plan_escape_route(&self, env: &Environment) -> Option<Vec<RoomId>> {
        self.find_path(env, self.position, env.exit()).into_path()
    }

    /// Shortest planned route to any of `targets`. Ties keep the earlier target.
    pub fn nearest(
        &self,
        env: &Environment,
        targets: impl IntoIterator<Item = RoomId>,
    ) -> Option<(RoomId, Vec<RoomId>)> {
        self.nearest_with_stats(env, targets, &mut SearchStats::default())
    }

    /// [`Agent::nearest`], adding every search's counters into `stats`.
    pub fn nearest_with_stats(
        &self,
        env: &Environment,
        targets: impl IntoIterator<Item = RoomId>,
        stats: &mut SearchStats,
    ) -> Option<(RoomId, Vec<RoomId>)> {
        let mut best: Option<(RoomId, Vec<RoomId>)> = None;
        for target in targets {
            let outcome = self.find_path(env, self.position, target);
            *stats += outcome.stats;
            let Some(path) = outcome.path else {
                continue;
            };
            if best.as_ref().is_none_or(|(_, current)| path.len() < current.len()) {
                best = Some((target, path));
            }
        }
        best
    }

    pub fn status(&self, env: &Environment) -> AgentStatus {
        let exits = env
            .graph()
            .neighbors(self.position)
            .map(|room| {
                let probability = self.beliefs.probability(room);
                NeighborView {
                    room,
                    label: env.room(room).map(|r| r.label().to_owned()).unwrap_or_default(),
                    probability,
                    risk: RiskLevel::from_probability(probability),
                    visited: self.has_visited(room),
                }
            })
            .collect();

        AgentStatus {
            position: self.position,
            label: env
                .room(self.position)
                .map(|r| r.label().to_owned())
                .unwrap_or_default(),
            health: self.health,
            max_health: self.max_health,
            keys_held: self.keys.len(),
            total_keys: env.total_keys(),
            moves: self.moves,
            traps_triggered: self.traps_triggered,
            puzzles_solved: self.puzzles_solved,
            rooms_visited: self.visited.len(),
            room_count: env.room_count(),
            exits,
        }
    }
}

/// A reachable neighbor as the agent sees it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NeighborView {
    pub room: RoomId,
    pub label: String,
    pub probability: f64,
    pub risk: RiskLevel,
    pub visited: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentStatus {
    pub position: RoomId,
    pub label: String,
    pub health: u32,
    pub max_health: u32,
    pub keys_held: usize,
    pub total_keys: usize,
    pub moves: u32,
    pub traps_triggered: u32,
    pub puzzles_solved: u32,
    pub rooms_visited: usize,
    pub room_count: usize,
    pub exits: Vec<NeighborView>,
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "location: {} (room {})", self.label, self.position)?;
        writeln!(f, "health: {}/{}", self.health, self.max_health)?;
        writeln!(f, "keys: {}/{}", self.keys_held, self.total_keys)?;
        writeln!(
            f,
            "moves: {} | traps: {} | puzzles: {} | visited: {}/{}",
            self.moves,
            self.traps_triggered,
            self.puzzles_solved,
            self.rooms_visited,
            self.room_count
        )?;
        write!(f, "available moves: {}", self.exits.len())?;
        for exit in &self.exits {
            write!(
                f,
                "\n  -> room {}: {} [{} risk, P={:.2}]{}",
                exit.room,
                exit.label,
                exit.risk,
                exit.probability,
                if exit.visited { " visited" } else { "" }
            )?;
        }
        Ok(())
    }
}
