//! Depth-limited adversarial search for the pursuing guard.
//!
//! The guard is the maximizing player and the agent the minimizing one. Both
//! move only through unlocked doors. Leaves are scored by [`utility`], which
//! rewards the guard for being close to the agent in true door distance.
mod alphabeta;
mod minimax;

pub use alphabeta::AlphaBeta;
pub use minimax::Minimax;

use crate::graph::{RoomGraph, RoomId};

/// Variant selection as it appears in configuration.
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
pub enum AdversaryAlgorithm {
    #[default]
    Minimax,
    AlphaBeta,
}

impl AdversaryAlgorithm {
    pub fn decide(
        self,
        graph: &RoomGraph,
        guard: RoomId,
        agent: RoomId,
        depth: u32,
    ) -> Option<Decision> {
        match self {
            AdversaryAlgorithm::Minimax => Minimax.decide(graph, guard, agent, depth),
            AdversaryAlgorithm::AlphaBeta => AlphaBeta.decide(graph, guard, agent, depth),
        }
    }
}

/// Score awarded to the guard for standing on the agent.
pub const CAPTURE_UTILITY: f64 = 100.0;
/// Score when the agent cannot be reached at all.
pub const UNREACHABLE_UTILITY: f64 = -50.0;
const PROXIMITY_SCALE: f64 = 50.0;

/// Leaf evaluation: `100` on capture, `50 / (d + 1)` for door distance `d`,
/// `-50` when no unlocked route joins the two rooms.
pub fn utility(graph: &RoomGraph, guard: RoomId, agent: RoomId) -> f64 {
    if guard == agent {
        return CAPTURE_UTILITY;
    }
    match graph.distance(guard, agent) {
        Some(d) => PROXIMITY_SCALE / f64::from(d + 1),
        None => UNREACHABLE_UTILITY,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdversaryStats {
    /// Positions visited by the recursion, root children included.
    pub nodes_visited: usize,
    /// Leaf evaluations.
    pub evaluations: usize,
}

/// The guard's chosen room and its backed-up value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decision {
    pub room: RoomId,
    pub value: f64,
    pub stats: AdversaryStats,
}

pub trait AdversarySearch {
    /// Picks the guard's next room among its unlocked neighbors, searching
    /// `depth` plies including the guard's own move. Among equal values the
    /// first neighbor in door order wins.
    ///
    /// Returns `None` when the guard has no unlocked neighbor.
    fn decide(
        &self,
        graph: &RoomGraph,
        guard: RoomId,
        agent: RoomId,
        depth: u32,
    ) -> Option<Decision>;
}

/// Shared root loop: each guard move is scored by `score` with the best value
/// found so far, and replaces the incumbent only when strictly better.
fn decide_with(
    graph: &RoomGraph,
    guard: RoomId,
    mut score: impl FnMut(RoomId, f64, &mut AdversaryStats) -> f64,
) -> Option<Decision> {
    if !graph.contains(guard) {
        return None;
    }

    let mut stats = AdversaryStats::default();
    let mut best: Option<(RoomId, f64)> = None;
    for candidate in graph.neighbors(guard) {
        let incumbent = best.map_or(f64::NEG_INFINITY, |(_, value)| value);
        let value = score(candidate, incumbent, &mut stats);
        if value > incumbent {
            best = Some((candidate, value));
        }
    }

    best.map(|(room, value)| Decision { room, value, stats })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Path graph `0 - 1 - ... - n-1`.
    pub(super) fn line(n: usize) -> RoomGraph {
        let mut builder = RoomGraph::builder().with_rooms(n);
        for i in 1..n {
            builder = builder.door(i - 1, i);
        }
        builder.build().unwrap()
    }

    /// Ring with a spur and a locked shortcut, for variant comparisons.
    pub(super) fn tangle() -> RoomGraph {
        RoomGraph::builder()
            .with_rooms(9)
            .door(0usize, 1usize)
            .door(1usize, 2usize)
            .door(2usize, 3usize)
            .door(3usize, 4usize)
            .door(4usize, 5usize)
            .door(5usize, 0usize)
            .door(2usize, 6usize)
            .door(6usize, 7usize)
            .locked_door(7usize, 4usize)
            .door(1usize, 4usize)
            .build()
            .unwrap()
    }

    #[test]
    fn utility_scores_distance() {
        let graph = line(6);
        assert_eq!(utility(&graph, RoomId(2), RoomId(2)), 100.0);
        assert_eq!(utility(&graph, RoomId(0), RoomId(4)), 10.0);
        assert_eq!(utility(&graph, RoomId(1), RoomId(2)), 25.0);

        let split = RoomGraph::builder()
            .with_rooms(3)
            .door(0usize, 1usize)
            .locked_door(1usize, 2usize)
            .build()
            .unwrap();
        assert_eq!(utility(&split, RoomId(0), RoomId(2)), -50.0);
    }

    #[test]
    fn variants_agree_on_every_position() {
        for graph in [line(6), tangle()] {
            for depth in 1..=4 {
                for guard in graph.room_ids() {
                    for agent in graph.room_ids() {
                        let plain = Minimax.decide(&graph, guard, agent, depth);
                        let pruned = AlphaBeta.decide(&graph, guard, agent, depth);
                        assert_eq!(
                            plain.map(|d| d.room),
                            pruned.map(|d| d.room),
                            "guard {guard} agent {agent} depth {depth}"
                        );
                        if let (Some(a), Some(b)) = (plain, pruned) {
                            assert_eq!(a.value, b.value);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn pruning_does_not_visit_more_nodes() {
        let graph = tangle();
        let plain = Minimax.decide(&graph, RoomId(3), RoomId(0), 4).unwrap();
        let pruned = AlphaBeta.decide(&graph, RoomId(3), RoomId(0), 4).unwrap();
        assert!(pruned.stats.nodes_visited <= plain.stats.nodes_visited);
    }

    #[test]
    fn algorithm_parses_from_config_strings() {
        assert_eq!(
            "alpha_beta".parse::<AdversaryAlgorithm>().unwrap(),
            AdversaryAlgorithm::AlphaBeta
        );
        assert_eq!(AdversaryAlgorithm::default(), AdversaryAlgorithm::Minimax);
    }
}
