use std::collections::VecDeque;

use super::{PathFinder, SearchOutcome, SearchStats, reconstruct};
use crate::graph::{RoomGraph, RoomId};

/// Level-order search. Returns a route with the fewest doors.
///
/// The goal test runs when a room is generated, so the frontier never grows
/// past the goal's level.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bfs;

impl PathFinder for Bfs {
    fn find_path(&self, graph: &RoomGraph, start: RoomId, goal: RoomId) -> SearchOutcome {
        if !graph.contains(start) || !graph.contains(goal) {
            return SearchOutcome::default();
        }
        if start == goal {
            return SearchOutcome::trivial(start);
        }

        let mut stats = SearchStats::default();
        let mut parents: Vec<Option<RoomId>> = vec![None; graph.len()];
        let mut visited = vec![false; graph.len()];
        visited[start.index()] = true;
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            stats.nodes_expanded += 1;

            for next in graph.neighbors(current) {
                if visited[next.index()] {
                    continue;
                }
                visited[next.index()] = true;
                parents[next.index()] = Some(current);
                stats.nodes_generated += 1;

                if next == goal {
                    return SearchOutcome {
                        path: Some(reconstruct(&parents, goal)),
                        stats,
                    };
                }
                queue.push_back(next);
            }
        }

        SearchOutcome { path: None, stats }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> RoomGraph {
        // 0 - 1 - 2
        // |   |   |
        // 3 - 4 - 5
        RoomGraph::builder()
            .with_rooms(6)
            .door(0usize, 1usize)
            .door(1usize, 2usize)
            .door(3usize, 4usize)
            .door(4usize, 5usize)
            .door(0usize, 3usize)
            .door(1usize, 4usize)
            .door(2usize, 5usize)
            .build()
            .unwrap()
    }

    #[test]
    fn start_equals_goal_is_single_room() {
        let outcome = Bfs.find_path(&grid(), RoomId(4), RoomId(4));
        assert_eq!(outcome.path, Some(vec![RoomId(4)]));
        assert_eq!(outcome.stats.nodes_expanded, 0);
    }

    #[test]
    fn finds_minimal_edge_count_for_every_pair() {
        let graph = grid();
        for start in graph.room_ids() {
            for goal in graph.room_ids() {
                let outcome = Bfs.find_path(&graph, start, goal);
                let path = outcome.path.unwrap();
                assert_eq!(path.first(), Some(&start));
                assert_eq!(path.last(), Some(&goal));
                assert_eq!(
                    Some((path.len() - 1) as u32),
                    graph.distance(start, goal),
                    "{start} -> {goal}"
                );
                for pair in path.windows(2) {
                    assert!(graph.neighbors(pair[0]).any(|n| n == pair[1]));
                }
            }
        }
    }

    #[test]
    fn neighbor_order_breaks_ties() {
        // 0 -> 4 via 1 or via 3; door 0-1 was added first.
        let path = Bfs.find_path(&grid(), RoomId(0), RoomId(4)).path.unwrap();
        assert_eq!(path, vec![RoomId(0), RoomId(1), RoomId(4)]);
    }

    #[test]
    fn unknown_ids_yield_no_path() {
        assert!(!Bfs.find_path(&grid(), RoomId(0), RoomId(9)).found());
    }
}
