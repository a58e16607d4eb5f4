//! The room graph plus everything a session mutates on it: door locks, fired
//! traps, solved puzzles and collected keys.
use std::collections::BTreeSet;
use std::fmt;

use crate::error::{ErrorSeverity, GameError};
use crate::graph::{KeyId, Room, RoomFlags, RoomGraph, RoomId, RoomStatus};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EnvironmentError {
    #[error("room {0} is not part of the map")]
    UnknownRoom(RoomId),

    #[error("exit {exit} cannot be reached from start {start} even with every door open")]
    ExitUnreachable { start: RoomId, exit: RoomId },

    #[error("map has no room flagged as exit")]
    NoExit,
}

impl GameError for EnvironmentError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            EnvironmentError::UnknownRoom(_) => ErrorSeverity::Validation,
            EnvironmentError::ExitUnreachable { .. } | EnvironmentError::NoExit => {
                ErrorSeverity::Fatal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            EnvironmentError::UnknownRoom(_) => "ENV_UNKNOWN_ROOM",
            EnvironmentError::ExitUnreachable { .. } => "ENV_EXIT_UNREACHABLE",
            EnvironmentError::NoExit => "ENV_NO_EXIT",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Environment {
    graph: RoomGraph,
    start: RoomId,
    exit: RoomId,
    total_keys: usize,
    keys_collected: BTreeSet<KeyId>,
}

impl Environment {
    /// Wraps `graph` with explicit start and exit rooms.
    ///
    /// The exit must be reachable from the start when every door is treated
    /// as open; locked doors may still stand in the way.
    pub fn new(graph: RoomGraph, start: RoomId, exit: RoomId) -> Result<Self, EnvironmentError> {
        for room in [start, exit] {
            if !graph.contains(room) {
                return Err(EnvironmentError::UnknownRoom(room));
            }
        }
        if !graph.is_connected_ignoring_locks(start, exit) {
            return Err(EnvironmentError::ExitUnreachable { start, exit });
        }

        let total_keys = graph
            .rooms()
            .filter_map(Room::key)
            .collect::<BTreeSet<_>>()
            .len();

        Ok(Self {
            graph,
            start,
            exit,
            total_keys,
            keys_collected: BTreeSet::new(),
        })
    }

    /// Starts in room 0 and exits at the first room flagged [`RoomFlags::IS_EXIT`].
    pub fn from_graph(graph: RoomGraph) -> Result<Self, EnvironmentError> {
        let exit = graph
            .rooms()
            .find(|room| room.is_exit())
            .map(Room::id)
            .ok_or(EnvironmentError::NoExit)?;
        Self::new(graph, RoomId::START, exit)
    }

    pub fn graph(&self) -> &RoomGraph {
        &self.graph
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.graph.room(id)
    }

    pub fn room_count(&self) -> usize {
        self.graph.len()
    }

    pub fn start(&self) -> RoomId {
        self.start
    }

    pub fn exit(&self) -> RoomId {
        self.exit
    }

    pub fn total_keys(&self) -> usize {
        self.total_keys
    }

    pub fn keys_collected(&self) -> &BTreeSet<KeyId> {
        &self.keys_collected
    }

    pub fn all_keys_collected(&self) -> bool {
        self.keys_collected.len() >= self.total_keys
    }

    /// # Panics
    ///
    /// Panics if `room` is not part of the map.
    pub fn get_unlocked_neighbors(&self, room: RoomId) -> Vec<RoomId> {
        self.graph.neighbors(room).collect()
    }

    /// # Panics
    ///
    /// Panics if `room` is not part of the map.
    pub fn get_all_neighbors(&self, room: RoomId) -> Vec<(RoomId, bool)> {
        self.graph.all_edges(room).collect()
    }

    /// Idempotent. Returns `false` when the rooms share no door.
    pub fn unlock_door_between(&mut self, a: RoomId, b: RoomId) -> bool {
        self.graph.unlock(a, b)
    }

    /// Unlocks every locked door of `room`, returning the rooms behind them.
    pub fn unlock_all_doors(&mut self, room: RoomId) -> Vec<RoomId> {
        if !self.graph.contains(room) {
            return Vec::new();
        }
        let locked: Vec<RoomId> = self.graph.locked_doors(room).collect();
        for &other in &locked {
            self.graph.unlock(room, other);
        }
        locked
    }

    /// Fires the trap in `room` if it has one that has not fired yet.
    pub fn trigger_trap(&mut self, room: RoomId) -> bool {
        match self.graph.room_mut(room) {
            Some(r) if r.has_trap() && !r.trap_triggered() => {
                r.mark(RoomStatus::TRAP_TRIGGERED);
                true
            }
            _ => false,
        }
    }

    /// Picks up the key in `room` unless it was already collected.
    pub fn collect_key(&mut self, room: RoomId) -> Option<KeyId> {
        let key = self.graph.room(room)?.key()?;
        self.keys_collected.insert(key).then_some(key)
    }

    /// Records that the puzzle in `room` was solved. Returns `false` when the
    /// room has no puzzle or it was already solved.
    pub fn mark_puzzle_solved(&mut self, room: RoomId) -> bool {
        match self.graph.room_mut(room) {
            Some(r) if r.has_puzzle() && !r.puzzle_solved() => {
                r.mark(RoomStatus::PUZZLE_SOLVED);
                true
            }
            _ => false,
        }
    }

    /// Flags `room` as holding a puzzle, e.g. after a layout gained a locked door.
    pub fn place_puzzle(&mut self, room: RoomId) -> bool {
        match self.graph.room_mut(room) {
            Some(r) => {
                r.set_flags(RoomFlags::HAS_PUZZLE);
                true
            }
            None => false,
        }
    }

    /// Rooms whose key is still lying around.
    pub fn uncollected_key_rooms(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.graph
            .rooms()
            .filter(|room| {
                room.key()
                    .is_some_and(|key| !self.keys_collected.contains(&key))
            })
            .map(Room::id)
    }

    /// Rooms with a puzzle that is not solved yet and still guards a locked door.
    pub fn unsolved_puzzle_rooms(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.graph
            .rooms()
            .filter(|room| room.has_puzzle() && !room.puzzle_solved())
            .map(Room::id)
            .filter(|id| self.graph.locked_doors(*id).next().is_some())
    }

    pub fn map_summary(&self) -> MapSummary {
        MapSummary {
            room_count: self.graph.len(),
            door_count: self.graph.door_count(),
            locked_doors: self
                .graph
                .room_ids()
                .map(|id| self.graph.locked_doors(id).filter(|other| *other > id).count())
                .sum(),
            traps: self.graph.rooms().filter(|room| room.has_trap()).count(),
            puzzles: self.graph.rooms().filter(|room| room.has_puzzle()).count(),
            total_keys: self.total_keys,
            keys_collected: self.keys_collected.len(),
            start: self.start,
            exit: self.exit,
        }
    }
}

/// Counts describing the current map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapSummary {
    pub room_count: usize,
    pub door_count: usize,
    pub locked_doors: usize,
    pub traps: usize,
    pub puzzles: usize,
    pub total_keys: usize,
    pub keys_collected: usize,
    pub start: RoomId,
    pub exit: RoomId,
}

impl fmt::Display for MapSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} rooms, {} doors ({} locked)",
            self.room_count, self.door_count, self.locked_doors
        )?;
        writeln!(
            f,
            "keys: {}/{} collected",
            self.keys_collected, self.total_keys
        )?;
        write!(f, "start: room {} | exit: room {}", self.start, self.exit)
    }
}
