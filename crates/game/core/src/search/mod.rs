//! Route planning over unlocked doors.
//!
//! Two planners share the [`PathFinder`] contract: [`Bfs`] returns a route
//! with the fewest doors, [`AStar`] a risk-weighted route steered away from
//! rooms the belief model considers dangerous.
mod astar;
mod bfs;

pub use astar::AStar;
pub use bfs::Bfs;

use crate::belief::BeliefModel;
use crate::graph::{RoomGraph, RoomId};

/// Planner selection as it appears in configuration.
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
pub enum SearchAlgorithm {
    Bfs,
    #[default]
    #[strum(to_string = "astar", serialize = "a_star", serialize = "a*")]
    #[cfg_attr(feature = "serde", serde(rename = "astar", alias = "a_star"))]
    AStar,
}

impl SearchAlgorithm {
    /// Runs the selected planner. `beliefs` only matters for [`AStar`].
    pub fn find_path(
        self,
        graph: &RoomGraph,
        beliefs: &BeliefModel,
        start: RoomId,
        goal: RoomId,
    ) -> SearchOutcome {
        match self {
            SearchAlgorithm::Bfs => Bfs.find_path(graph, start, goal),
            SearchAlgorithm::AStar => AStar::with_beliefs(beliefs).find_path(graph, start, goal),
        }
    }
}

/// Counters collected during one search call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Nodes taken off the frontier, duplicates included.
    pub nodes_expanded: usize,
    /// Nodes pushed onto the frontier.
    pub nodes_generated: usize,
}

impl std::ops::AddAssign for SearchStats {
    fn add_assign(&mut self, other: Self) {
        self.nodes_expanded += other.nodes_expanded;
        self.nodes_generated += other.nodes_generated;
    }
}

/// Result of a search: the route (start and goal inclusive) or `None` when the
/// goal is unreachable over unlocked doors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub path: Option<Vec<RoomId>>,
    pub stats: SearchStats,
}

impl SearchOutcome {
    pub(crate) fn trivial(room: RoomId) -> Self {
        Self {
            path: Some(vec![room]),
            stats: SearchStats::default(),
        }
    }

    pub fn found(&self) -> bool {
        self.path.is_some()
    }

    /// Number of doors on the route.
    pub fn edge_count(&self) -> Option<usize> {
        self.path.as_ref().map(|path| path.len().saturating_sub(1))
    }

    pub fn into_path(self) -> Option<Vec<RoomId>> {
        self.path
    }
}

pub trait PathFinder {
    /// Finds a route from `start` to `goal`. `start == goal` yields `[start]`.
    ///
    /// Ids outside the graph yield no path.
    fn find_path(&self, graph: &RoomGraph, start: RoomId, goal: RoomId) -> SearchOutcome;
}

/// Walks `parents` back from `goal` to the root.
fn reconstruct(parents: &[Option<RoomId>], goal: RoomId) -> Vec<RoomId> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(parent) = parents[current.index()] {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::belief::Observation;

    /// 6 rooms, exit 5. The only route from {0, 1, 2} to {3, 4, 5} is the
    /// locked 2-3 door.
    fn gated_line() -> RoomGraph {
        RoomGraph::builder()
            .with_rooms(6)
            .door(0usize, 1usize)
            .door(1usize, 2usize)
            .locked_door(2usize, 3usize)
            .door(3usize, 4usize)
            .door(4usize, 5usize)
            .door(0usize, 2usize)
            .build()
            .unwrap()
    }

    #[test]
    fn locked_door_blocks_then_opens_after_unlock() {
        let mut graph = gated_line();
        let beliefs = BeliefModel::new(6, 0.2, 0.9);

        for algorithm in [SearchAlgorithm::Bfs, SearchAlgorithm::AStar] {
            let outcome = algorithm.find_path(&graph, &beliefs, RoomId(0), RoomId(5));
            assert!(!outcome.found(), "{algorithm} crossed a locked door");
        }

        assert!(graph.unlock(RoomId(2), RoomId(3)));
        for algorithm in [SearchAlgorithm::Bfs, SearchAlgorithm::AStar] {
            let path = algorithm
                .find_path(&graph, &beliefs, RoomId(0), RoomId(5))
                .into_path()
                .unwrap();
            assert_eq!(
                path,
                vec![RoomId(0), RoomId(2), RoomId(3), RoomId(4), RoomId(5)],
                "{algorithm}"
            );
        }
    }

    #[test]
    fn astar_prefers_low_risk_detour() {
        // 0 - 1 - 3 is shortest; 0 - 2 - 4 - 3 avoids room 1.
        let graph = RoomGraph::builder()
            .with_rooms(5)
            .door(0usize, 1usize)
            .door(1usize, 3usize)
            .door(0usize, 2usize)
            .door(2usize, 4usize)
            .door(4usize, 3usize)
            .build()
            .unwrap();
        let mut beliefs = BeliefModel::new(5, 0.0, 0.9);
        beliefs.update(RoomId(1), Observation::Trap).unwrap();

        let risky = Bfs.find_path(&graph, RoomId(0), RoomId(3));
        assert_eq!(risky.edge_count(), Some(2));

        let safe = AStar::with_beliefs(&beliefs)
            .find_path(&graph, RoomId(0), RoomId(3))
            .into_path()
            .unwrap();
        assert_eq!(safe, vec![RoomId(0), RoomId(2), RoomId(4), RoomId(3)]);
    }

    #[test]
    fn algorithm_names_parse() {
        assert_eq!(
            "ASTAR".parse::<SearchAlgorithm>().unwrap(),
            SearchAlgorithm::AStar
        );
        assert_eq!("bfs".parse::<SearchAlgorithm>().unwrap(), SearchAlgorithm::Bfs);
        assert_eq!(SearchAlgorithm::AStar.to_string(), "astar");
    }
}
