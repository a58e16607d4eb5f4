use super::{AdversarySearch, AdversaryStats, Decision, decide_with, utility};
use crate::graph::{RoomGraph, RoomId};

/// Minimax with alpha-beta cutoffs.
///
/// At the root each guard move is searched with `alpha` set to the best value
/// found so far. A move only replaces the incumbent when strictly better, so
/// the chosen room matches [`super::Minimax`] exactly.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlphaBeta;

impl AlphaBeta {
    #[allow(clippy::too_many_arguments)]
    fn value(
        graph: &RoomGraph,
        guard: RoomId,
        agent: RoomId,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
        stats: &mut AdversaryStats,
    ) -> f64 {
        stats.nodes_visited += 1;
        if depth == 0 || guard == agent {
            stats.evaluations += 1;
            return utility(graph, guard, agent);
        }

        if maximizing {
            let mut best: Option<f64> = None;
            for next in graph.neighbors(guard) {
                let value = Self::value(graph, next, agent, depth - 1, alpha, beta, false, stats);
                best = Some(best.map_or(value, |b| b.max(value)));
                alpha = alpha.max(value);
                if beta <= alpha {
                    break;
                }
            }
            best.unwrap_or_else(|| {
                stats.evaluations += 1;
                utility(graph, guard, agent)
            })
        } else {
            let mut best: Option<f64> = None;
            for next in graph.neighbors(agent) {
                let value = Self::value(graph, guard, next, depth - 1, alpha, beta, true, stats);
                best = Some(best.map_or(value, |b| b.min(value)));
                beta = beta.min(value);
                if beta <= alpha {
                    break;
                }
            }
            best.unwrap_or_else(|| {
                stats.evaluations += 1;
                utility(graph, guard, agent)
            })
        }
    }
}

impl AdversarySearch for AlphaBeta {
    fn decide(
        &self,
        graph: &RoomGraph,
        guard: RoomId,
        agent: RoomId,
        depth: u32,
    ) -> Option<Decision> {
        let remaining = depth.saturating_sub(1);
        decide_with(graph, guard, |candidate, incumbent, stats| {
            Self::value(
                graph,
                candidate,
                agent,
                remaining,
                incumbent,
                f64::INFINITY,
                false,
                stats,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adversary::tests::line;

    #[test]
    fn guard_closes_in_on_a_path() {
        let graph = line(6);
        let decision = AlphaBeta.decide(&graph, RoomId(5), RoomId(1), 3).unwrap();
        assert_eq!(decision.room, RoomId(4));
    }

    #[test]
    fn depth_zero_scores_immediate_moves() {
        let graph = line(6);
        let decision = AlphaBeta.decide(&graph, RoomId(2), RoomId(4), 0).unwrap();
        assert_eq!(decision.room, RoomId(3));
        assert_eq!(decision.value, 25.0);
    }
}
