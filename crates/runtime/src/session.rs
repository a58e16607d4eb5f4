//! The turn loop.
//!
//! A [`Session`] owns every piece of mutable game state. Each call to
//! [`Session::step`] plays one turn: the agent acts, the session checks for
//! death and escape, the guard answers, and finally capture and the turn
//! limit are checked.
use escape_content::Scenario;
use escape_core::{
    Agent, CspSolver, Environment, EscapeConfig, GameError, Guard, PcgRng, PuzzleGenerator,
    RoomId,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::RuntimeConfig;
use crate::controller::{AgentCommand, AgentController};
use crate::error::{Result, RuntimeError};
use crate::events::{SessionEvent, TurnReport};
use crate::summary::SessionSummary;

/// Stream tag for puzzle generation; the context is the puzzle counter.
const PUZZLE_STREAM: u64 = 0x5055_5a5a;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    Escaped,
    Died,
    Caught,
    TurnLimit,
    Abandoned,
}

impl Outcome {
    pub fn is_victory(self) -> bool {
        self == Outcome::Escaped
    }
}

pub struct Session {
    environment: Environment,
    agent: Agent,
    guard: Guard,
    config: EscapeConfig,
    seed: u64,
    session_id: Option<String>,
    require_all_keys: bool,
    turn: u32,
    puzzles_encountered: u32,
    log: Vec<SessionEvent>,
    outcome: Option<Outcome>,
}

impl Session {
    pub fn new(scenario: Scenario, config: EscapeConfig, seed: u64) -> Result<Self> {
        let Scenario {
            environment,
            guard_start,
        } = scenario;
        if !environment.graph().contains(guard_start) {
            return Err(RuntimeError::GuardOutsideMap(guard_start));
        }

        let agent = Agent::new(&environment, &config);
        let guard = Guard::new(guard_start, &config);
        Ok(Self {
            environment,
            agent,
            guard,
            config,
            seed,
            session_id: None,
            require_all_keys: false,
            turn: 0,
            puzzles_encountered: 0,
            log: Vec::new(),
            outcome: None,
        })
    }

    /// Builds the configuration and scenario described by `runtime`.
    pub fn from_runtime_config(runtime: &RuntimeConfig) -> Result<Self> {
        let config = runtime.escape_config()?;
        let scenario = runtime.scenario(&config)?;
        let session = Self::new(scenario, config, runtime.seed)?
            .with_require_all_keys(runtime.require_all_keys)
            .with_session_id(runtime.session_id.clone());

        let map = session.environment.map_summary();
        info!(
            session = session.session_id.as_deref().unwrap_or("-"),
            seed = runtime.seed,
            rooms = map.room_count,
            doors = map.door_count,
            locked = map.locked_doors,
            keys = map.total_keys,
            guard = %session.guard.position(),
            "session ready"
        );
        Ok(session)
    }

    pub fn with_require_all_keys(mut self, require: bool) -> Self {
        self.require_all_keys = require;
        self
    }

    pub fn with_session_id(mut self, session_id: Option<String>) -> Self {
        self.session_id = session_id;
        self
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn guard(&self) -> &Guard {
        &self.guard
    }

    pub fn config(&self) -> &EscapeConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn requires_all_keys(&self) -> bool {
        self.require_all_keys
    }

    /// Turns played so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn puzzles_encountered(&self) -> u32 {
        self.puzzles_encountered
    }

    /// Every event since the session started.
    pub fn events(&self) -> &[SessionEvent] {
        &self.log
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Whether standing on the exit right now wins.
    pub fn can_escape(&self) -> bool {
        !self.require_all_keys || self.environment.all_keys_collected()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_session(self)
    }

    /// Plays one turn.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::SessionOver`] once an outcome is decided.
    pub fn step(&mut self, command: AgentCommand) -> Result<TurnReport> {
        if let Some(outcome) = self.outcome {
            return Err(RuntimeError::SessionOver { outcome });
        }
        self.turn += 1;
        debug!(turn = self.turn, ?command, "turn started");

        let mut events = Vec::new();
        match command {
            AgentCommand::Quit => {
                info!(turn = self.turn, "agent gave up");
                self.finish(Outcome::Abandoned, &mut events);
                return Ok(self.report(events));
            }
            AgentCommand::Move(room) => self.move_agent(room, &mut events),
            AgentCommand::SolvePuzzle => self.solve_puzzle(&mut events),
            AgentCommand::Wait => events.push(SessionEvent::Waited),
        }

        if !self.agent.is_alive() {
            self.finish(Outcome::Died, &mut events);
        } else if self.agent.has_escaped(&self.environment) && self.can_escape() {
            self.finish(Outcome::Escaped, &mut events);
        } else {
            self.guard_turn(&mut events);
        }

        if self.outcome.is_none() && self.turn >= self.config.max_turns {
            self.finish(Outcome::TurnLimit, &mut events);
        }

        Ok(self.report(events))
    }

    /// Drives the session with `controller` until an outcome is reached.
    pub fn run(&mut self, controller: &mut dyn AgentController) -> Result<Outcome> {
        loop {
            if let Some(outcome) = self.outcome {
                return Ok(outcome);
            }
            let command = controller.next_command(self);
            self.step(command)?;
        }
    }

    fn move_agent(&mut self, room: RoomId, events: &mut Vec<SessionEvent>) {
        match self.agent.move_to(&mut self.environment, room) {
            Ok(report) => {
                debug!(
                    from = %report.from,
                    to = %report.to,
                    observation = %report.observation,
                    health = report.health,
                    "agent moved"
                );
                if let Some(damage) = report.damage {
                    info!(room = %report.to, damage, health = report.health, "trap triggered");
                }
                if let Some(key) = report.key {
                    info!(room = %report.to, %key, held = report.keys_held, "key collected");
                }
                events.push(SessionEvent::AgentMoved(report));
            }
            Err(err) => {
                warn!(
                    to = %room,
                    code = err.error_code(),
                    severity = err.severity().as_str(),
                    "move rejected: {err}"
                );
                events.push(SessionEvent::MoveRejected {
                    to: room,
                    code: err.error_code().to_owned(),
                    reason: err.to_string(),
                });
            }
        }
    }

    /// Generates the next puzzle, solves it, and on success opens every
    /// locked door of the agent's room.
    fn solve_puzzle(&mut self, events: &mut Vec<SessionEvent>) {
        let room = self.agent.position();
        if self.environment.graph().locked_doors(room).next().is_none() {
            warn!(room = %room, "no locked doors to open");
            events.push(SessionEvent::NoLockedDoors { room });
            return;
        }

        let difficulty = self
            .config
            .puzzle_difficulty
            .difficulty_for(self.puzzles_encountered);
        let mut rng = PcgRng::for_context(self.seed, PUZZLE_STREAM, self.puzzles_encountered);
        self.puzzles_encountered += 1;

        let puzzle = PuzzleGenerator::generate(difficulty, &mut rng);
        let (solution, stats) = CspSolver::new(&puzzle).solve_with_stats();
        debug!(
            room = %room,
            %difficulty,
            nodes = stats.nodes_expanded,
            backtracks = stats.backtracks,
            solved = solution.is_some(),
            "puzzle search finished"
        );

        match solution {
            Some(assignment) => {
                let unlocked = self.environment.unlock_all_doors(room);
                self.environment.mark_puzzle_solved(room);
                self.agent.record_puzzle_solved();
                info!(room = %room, %difficulty, opened = unlocked.len(), "puzzle solved");
                events.push(SessionEvent::PuzzleSolved {
                    room,
                    difficulty,
                    description: puzzle.description(),
                    solution: puzzle.format_assignment(&assignment),
                    stats,
                    unlocked,
                });
            }
            None => {
                warn!(room = %room, %difficulty, "puzzle has no solution");
                events.push(SessionEvent::PuzzleUnsolved {
                    room,
                    difficulty,
                    stats,
                });
            }
        }
    }

    fn guard_turn(&mut self, events: &mut Vec<SessionEvent>) {
        if !self.guard.is_enabled() {
            return;
        }

        let target = self.agent.position();
        let step = self.guard.make_move(self.environment.graph(), target);
        debug!(
            algorithm = %self.guard.algorithm(),
            depth = self.guard.depth(),
            nodes = step.stats.nodes_visited,
            evaluations = step.stats.evaluations,
            "{step}"
        );
        if step.kind == escape_core::GuardMoveKind::NoMove {
            warn!(room = %step.from, "guard has no legal move");
        }
        let caught = step.caught();
        events.push(SessionEvent::GuardMoved(step));

        if caught {
            self.finish(Outcome::Caught, events);
        } else if let Some(distance) = self
            .guard
            .distance_to(self.environment.graph(), target)
            .filter(|_| self.guard.can_see(self.environment.graph(), target))
        {
            debug!(distance, "guard has the agent in sight");
            events.push(SessionEvent::GuardAlert { distance });
        }
    }

    fn finish(&mut self, outcome: Outcome, events: &mut Vec<SessionEvent>) {
        self.outcome = Some(outcome);
        info!(
            %outcome,
            turn = self.turn,
            health = self.agent.health(),
            keys = self.environment.keys_collected().len(),
            "session ended"
        );
        events.push(SessionEvent::SessionEnded { outcome });
    }

    fn report(&mut self, events: Vec<SessionEvent>) -> TurnReport {
        self.log.extend(events.iter().cloned());
        TurnReport {
            turn: self.turn,
            events,
            outcome: self.outcome,
        }
    }
}
