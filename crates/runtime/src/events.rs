//! What happened during a turn.
use escape_core::{Difficulty, GuardMove, MoveReport, RoomId, SolverStats};
use serde::{Deserialize, Serialize};

use crate::session::Outcome;

/// One entry of the session log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionEvent {
    AgentMoved(MoveReport),

    /// The move was refused; nothing about the agent changed.
    MoveRejected {
        to: RoomId,
        code: String,
        reason: String,
    },

    PuzzleSolved {
        room: RoomId,
        difficulty: Difficulty,
        description: String,
        solution: String,
        stats: SolverStats,
        unlocked: Vec<RoomId>,
    },

    PuzzleUnsolved {
        room: RoomId,
        difficulty: Difficulty,
        stats: SolverStats,
    },

    /// `SolvePuzzle` in a room without locked doors.
    NoLockedDoors { room: RoomId },

    Waited,

    GuardMoved(GuardMove),

    /// The guard ended its turn within vision range of the agent.
    GuardAlert { distance: u32 },

    SessionEnded { outcome: Outcome },
}

/// Events produced by a single call to [`crate::Session::step`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub turn: u32,
    pub events: Vec<SessionEvent>,
    /// Set when this turn ended the session.
    pub outcome: Option<Outcome>,
}

impl TurnReport {
    pub fn agent_move(&self) -> Option<&MoveReport> {
        self.events.iter().find_map(|event| match event {
            SessionEvent::AgentMoved(report) => Some(report),
            _ => None,
        })
    }

    pub fn guard_move(&self) -> Option<&GuardMove> {
        self.events.iter().find_map(|event| match event {
            SessionEvent::GuardMoved(step) => Some(step),
            _ => None,
        })
    }
}
