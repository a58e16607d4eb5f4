//! Hands-free agent controller.
//!
//! Every turn the autopilot looks at the map afresh, picks a target and takes
//! the first step of the configured planner's route toward it. Targets, in
//! priority order:
//!
//! 1. the nearest key still lying around
//! 2. the exit, once every key is held
//! 3. the nearest unvisited room whose trap belief is below the risk tolerance
//! 4. the nearest unvisited room
//! 5. the nearest other room whose puzzle still guards a locked door
//!
//! Standing next to a locked door always comes first: the puzzle is worked
//! before anything else. With no reachable target the autopilot quits.
use std::collections::BTreeSet;

use escape_core::{RoomId, SearchStats};
use tracing::debug;

use crate::controller::{AgentCommand, AgentController};
use crate::session::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Target {
    Key,
    Exit,
    SafeRoom,
    UnexploredRoom,
    Puzzle,
}

/// A chosen destination and the route toward it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    pub target: Target,
    pub room: RoomId,
    /// Start and goal inclusive.
    pub path: Vec<RoomId>,
    /// Planner counters summed over every candidate considered.
    pub stats: SearchStats,
}

impl Plan {
    pub fn next_step(&self) -> Option<RoomId> {
        self.path.get(1).copied()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Autopilot {
    /// Rooms where a puzzle attempt already failed.
    failed_puzzles: BTreeSet<RoomId>,
    last_puzzle_room: Option<RoomId>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks the highest-priority reachable target. Never returns the room the
    /// agent is standing in.
    pub fn plan(&self, session: &Session) -> Option<Plan> {
        let env = session.environment();
        let agent = session.agent();
        let here = agent.position();
        let tolerance = session.config().risk_tolerance;

        let unvisited: Vec<RoomId> = env
            .graph()
            .room_ids()
            .filter(|room| !agent.has_visited(*room))
            .collect();

        let mut stats = SearchStats::default();
        let mut tiers: Vec<(Target, Vec<RoomId>)> =
            vec![(Target::Key, env.uncollected_key_rooms().collect())];
        if env.all_keys_collected() {
            tiers.push((Target::Exit, vec![env.exit()]));
        }
        tiers.push((
            Target::SafeRoom,
            unvisited
                .iter()
                .copied()
                .filter(|room| agent.beliefs().probability(*room) < tolerance)
                .collect(),
        ));
        tiers.push((Target::UnexploredRoom, unvisited));
        tiers.push((
            Target::Puzzle,
            env.unsolved_puzzle_rooms()
                .filter(|room| !self.failed_puzzles.contains(room))
                .collect(),
        ));

        for (target, rooms) in tiers {
            let candidates = rooms.into_iter().filter(|room| *room != here);
            if let Some((room, path)) = agent.nearest_with_stats(env, candidates, &mut stats) {
                return Some(Plan {
                    target,
                    room,
                    path,
                    stats,
                });
            }
        }
        None
    }
}

impl AgentController for Autopilot {
    fn next_command(&mut self, session: &Session) -> AgentCommand {
        let here = session.agent().position();

        let at_locked_door = session.environment().graph().locked_doors(here).next().is_some();
        // Still locked after an attempt here means the attempt failed.
        if self.last_puzzle_room.take() == Some(here) && at_locked_door {
            self.failed_puzzles.insert(here);
        }

        if at_locked_door && !self.failed_puzzles.contains(&here) {
            self.last_puzzle_room = Some(here);
            debug!(room = %here, "autopilot works the puzzle");
            return AgentCommand::SolvePuzzle;
        }

        match self.plan(session) {
            Some(plan) => {
                debug!(
                    target = %plan.target,
                    room = %plan.room,
                    steps = plan.path.len().saturating_sub(1),
                    algorithm = %session.agent().search_algorithm(),
                    nodes = plan.stats.nodes_expanded,
                    "autopilot planned"
                );
                plan.next_step().map_or(AgentCommand::Quit, AgentCommand::Move)
            }
            None => {
                debug!(room = %here, "autopilot has nowhere left to go");
                AgentCommand::Quit
            }
        }
    }
}
