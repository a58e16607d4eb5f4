//! Decision core of the escape game.
//!
//! `escape-core` owns the room graph and the four algorithms that run over it:
//! trap beliefs ([`belief`]), route planning ([`search`]), door puzzles
//! ([`puzzle`]) and guard pursuit ([`adversary`]). [`Environment`], [`Agent`]
//! and [`Guard`] tie them together for the session layer. Everything here is
//! synchronous and free of I/O.
pub mod adversary;
pub mod agent;
pub mod belief;
pub mod config;
pub mod environment;
pub mod error;
pub mod graph;
pub mod guard;
pub mod puzzle;
pub mod rng;
pub mod search;

pub use adversary::{
    AdversaryAlgorithm, AdversarySearch, AdversaryStats, AlphaBeta, Decision, Minimax, utility,
};
pub use agent::{Agent, AgentStatus, MoveError, MoveReport, NeighborView};
pub use belief::{BeliefError, BeliefModel, BeliefSummary, Observation, RiskLevel};
pub use config::{EscapeConfig, MapSize};
pub use environment::{Environment, EnvironmentError, MapSummary};
pub use error::{ErrorSeverity, GameError};
pub use graph::{
    GraphError, KeyId, Room, RoomFlags, RoomGraph, RoomGraphBuilder, RoomId, RoomSpec, RoomStatus,
};
pub use guard::{Guard, GuardMove, GuardMoveKind};
pub use puzzle::{
    Assignment, Constraint, CspSolver, Difficulty, DifficultyPolicy, Puzzle, PuzzleError,
    PuzzleGenerator, SolverStats, VarId,
};
pub use rng::{PcgRng, compute_seed};
pub use search::{AStar, Bfs, PathFinder, SearchAlgorithm, SearchOutcome, SearchStats};
