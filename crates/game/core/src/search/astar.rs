use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::{PathFinder, SearchOutcome, SearchStats, reconstruct};
use crate::belief::BeliefModel;
use crate::graph::{RoomGraph, RoomId};

/// Risk-weighted best-first search.
///
/// Priority is `f = g + h` with `g` the doors walked so far and
/// `h(room) = |room - goal| + RISK_WEIGHT * P(trap in room)`. The heuristic is
/// not admissible, so the route may be longer than the shortest one when the
/// shortest one crosses rooms believed dangerous. Ties on `f` go to the node
/// pushed first.
#[derive(Clone, Copy, Debug, Default)]
pub struct AStar<'a> {
    beliefs: Option<&'a BeliefModel>,
}

impl<'a> AStar<'a> {
    pub const RISK_WEIGHT: f64 = 10.0;

    /// Distance-only heuristic.
    pub fn new() -> Self {
        Self { beliefs: None }
    }

    pub fn with_beliefs(beliefs: &'a BeliefModel) -> Self {
        Self {
            beliefs: Some(beliefs),
        }
    }

    fn heuristic(&self, room: RoomId, goal: RoomId) -> f64 {
        let risk = self
            .beliefs
            .map_or(0.0, |beliefs| beliefs.probability(room));
        f64::from(room.id_distance(goal)) + Self::RISK_WEIGHT * risk
    }
}

#[derive(Clone, Copy, Debug)]
struct OpenNode {
    f: f64,
    seq: u64,
    g: u32,
    room: RoomId,
    parent: Option<RoomId>,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap on (f, seq).
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PathFinder for AStar<'_> {
    fn find_path(&self, graph: &RoomGraph, start: RoomId, goal: RoomId) -> SearchOutcome {
        if !graph.contains(start) || !graph.contains(goal) {
            return SearchOutcome::default();
        }
        if start == goal {
            return SearchOutcome::trivial(start);
        }

        let mut stats = SearchStats::default();
        let mut parents: Vec<Option<RoomId>> = vec![None; graph.len()];
        let mut closed = vec![false; graph.len()];
        let mut open = BinaryHeap::new();
        let mut seq = 0u64;

        open.push(OpenNode {
            f: self.heuristic(start, goal),
            seq,
            g: 0,
            room: start,
            parent: None,
        });

        while let Some(node) = open.pop() {
            stats.nodes_expanded += 1;
            if closed[node.room.index()] {
                continue;
            }
            closed[node.room.index()] = true;
            parents[node.room.index()] = node.parent;

            if node.room == goal {
                return SearchOutcome {
                    path: Some(reconstruct(&parents, goal)),
                    stats,
                };
            }

            for next in graph.neighbors(node.room) {
                if closed[next.index()] {
                    continue;
                }
                let g = node.g + 1;
                seq += 1;
                stats.nodes_generated += 1;
                open.push(OpenNode {
                    f: f64::from(g) + self.heuristic(next, goal),
                    seq,
                    g,
                    room: next,
                    parent: Some(node.room),
                });
            }
        }

        SearchOutcome { path: None, stats }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::belief::Observation;
    use crate::search::Bfs;

    fn ring(n: usize) -> RoomGraph {
        let mut builder = RoomGraph::builder().with_rooms(n);
        for i in 0..n {
            builder = builder.door(i, (i + 1) % n);
        }
        builder.build().unwrap()
    }

    #[test]
    fn without_risk_matches_bfs_length() {
        let graph = ring(8);
        for goal in graph.room_ids() {
            let astar = AStar::new().find_path(&graph, RoomId(0), goal);
            let bfs = Bfs.find_path(&graph, RoomId(0), goal);
            assert_eq!(astar.edge_count(), bfs.edge_count(), "goal {goal}");
        }
    }

    #[test]
    fn complete_on_every_reachable_pair() {
        let graph = ring(7);
        let mut beliefs = BeliefModel::new(7, 0.2, 0.9);
        beliefs.update(RoomId(3), Observation::Trap).unwrap();
        let planner = AStar::with_beliefs(&beliefs);

        for start in graph.room_ids() {
            for goal in graph.room_ids() {
                let path = planner.find_path(&graph, start, goal).into_path().unwrap();
                assert_eq!(path.first(), Some(&start));
                assert_eq!(path.last(), Some(&goal));
                // A simple path never repeats a room.
                assert!(path.len() <= graph.len());
            }
        }
    }

    #[test]
    fn closed_rooms_are_not_reexpanded() {
        let graph = ring(6);
        let outcome = AStar::new().find_path(&graph, RoomId(0), RoomId(3));
        assert!(outcome.found());
        assert!(outcome.stats.nodes_generated <= 2 * graph.door_count());
    }
}
