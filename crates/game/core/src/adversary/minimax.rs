use super::{AdversarySearch, AdversaryStats, Decision, decide_with, utility};
use crate::graph::{RoomGraph, RoomId};

/// Plain depth-limited minimax.
#[derive(Clone, Copy, Debug, Default)]
pub struct Minimax;

impl Minimax {
    fn value(
        graph: &RoomGraph,
        guard: RoomId,
        agent: RoomId,
        depth: u32,
        maximizing: bool,
        stats: &mut AdversaryStats,
    ) -> f64 {
        stats.nodes_visited += 1;
        if depth == 0 || guard == agent {
            stats.evaluations += 1;
            return utility(graph, guard, agent);
        }

        let mover = if maximizing { guard } else { agent };
        let mut best: Option<f64> = None;
        for next in graph.neighbors(mover) {
            let value = if maximizing {
                Self::value(graph, next, agent, depth - 1, false, stats)
            } else {
                Self::value(graph, guard, next, depth - 1, true, stats)
            };
            best = Some(match best {
                None => value,
                Some(b) if maximizing => b.max(value),
                Some(b) => b.min(value),
            });
        }

        best.unwrap_or_else(|| {
            // The side to move is stuck: score the position as it stands.
            stats.evaluations += 1;
            utility(graph, guard, agent)
        })
    }
}

impl AdversarySearch for Minimax {
    fn decide(
        &self,
        graph: &RoomGraph,
        guard: RoomId,
        agent: RoomId,
        depth: u32,
    ) -> Option<Decision> {
        let remaining = depth.saturating_sub(1);
        decide_with(graph, guard, |candidate, _, stats| {
            Self::value(graph, candidate, agent, remaining, false, stats)
        })
    }
}
