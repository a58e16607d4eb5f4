//! End-of-session statistics.
use std::fmt;

use escape_core::{BeliefSummary, MapSummary, RoomId};
use serde::{Deserialize, Serialize};

use crate::session::{Outcome, Session};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: Option<String>,
    pub seed: u64,
    /// `None` while the session is still running.
    pub outcome: Option<Outcome>,
    pub turns: u32,
    pub max_turns: u32,

    pub health: u32,
    pub max_health: u32,
    pub keys_collected: usize,
    pub total_keys: usize,
    pub puzzles_solved: u32,
    pub moves: u32,
    pub rooms_visited: usize,
    pub traps_triggered: u32,
    pub agent_room: RoomId,

    pub guard_enabled: bool,
    pub guard_room: RoomId,
    pub guard_moves: u32,

    pub map: MapSummary,
    pub beliefs: BeliefSummary,
}

impl SessionSummary {
    pub fn from_session(session: &Session) -> Self {
        let agent = session.agent();
        let env = session.environment();
        let guard = session.guard();
        Self {
            session_id: session.session_id().map(str::to_owned),
            seed: session.seed(),
            outcome: session.outcome(),
            turns: session.turn(),
            max_turns: session.config().max_turns,
            health: agent.health(),
            max_health: agent.max_health(),
            keys_collected: env.keys_collected().len(),
            total_keys: env.total_keys(),
            puzzles_solved: agent.puzzles_solved(),
            moves: agent.moves_made(),
            rooms_visited: agent.visited().len(),
            traps_triggered: agent.traps_triggered(),
            agent_room: agent.position(),
            guard_enabled: guard.is_enabled(),
            guard_room: guard.position(),
            guard_moves: guard.moves_made(),
            map: env.map_summary(),
            beliefs: agent.beliefs().summary(),
        }
    }

    pub fn escaped(&self) -> bool {
        self.outcome.is_some_and(Outcome::is_victory)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = self
            .outcome
            .map_or_else(|| "in progress".to_owned(), |o| o.to_string());
        writeln!(f, "outcome:         {outcome}")?;
        writeln!(f, "turns:           {}/{}", self.turns, self.max_turns)?;
        writeln!(f, "health:          {}/{}", self.health, self.max_health)?;
        writeln!(f, "keys:            {}/{}", self.keys_collected, self.total_keys)?;
        writeln!(f, "puzzles solved:  {}", self.puzzles_solved)?;
        writeln!(f, "moves:           {}", self.moves)?;
        writeln!(
            f,
            "rooms explored:  {}/{}",
            self.rooms_visited, self.map.room_count
        )?;
        writeln!(f, "traps triggered: {}", self.traps_triggered)?;
        if self.guard_enabled {
            writeln!(
                f,
                "guard:           room {} after {} moves",
                self.guard_room, self.guard_moves
            )?;
        }
        write!(
            f,
            "beliefs:         {} verified, {} high risk, {} medium risk",
            self.beliefs.verified.len(),
            self.beliefs.high_risk.len(),
            self.beliefs.medium_risk.len()
        )
    }
}
