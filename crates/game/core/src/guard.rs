//! The pursuing guard.
use std::fmt;

use crate::adversary::{AdversaryAlgorithm, AdversaryStats};
use crate::config::EscapeConfig;
use crate::graph::{RoomGraph, RoomId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GuardMoveKind {
    /// Moved; `distance` is the door distance to the agent afterwards, if any
    /// unlocked route joins them.
    Moved { distance: Option<u32> },
    Caught,
    /// No unlocked door out of the guard's room.
    NoMove,
    Disabled,
}

/// Outcome of one guard turn.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuardMove {
    pub from: RoomId,
    pub to: RoomId,
    pub kind: GuardMoveKind,
    pub stats: AdversaryStats,
}

impl GuardMove {
    pub fn caught(&self) -> bool {
        self.kind == GuardMoveKind::Caught
    }
}

impl fmt::Display for GuardMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            GuardMoveKind::Moved {
                distance: Some(distance),
            } => write!(
                f,
                "guard moved from room {} to room {} (distance to agent: {distance})",
                self.from, self.to
            ),
            GuardMoveKind::Moved { distance: None } => write!(
                f,
                "guard moved from room {} to room {} (agent out of reach)",
                self.from, self.to
            ),
            GuardMoveKind::Caught => write!(
                f,
                "guard moved from room {} to room {} and caught the agent",
                self.from, self.to
            ),
            GuardMoveKind::NoMove => f.write_str("guard couldn't find a move"),
            GuardMoveKind::Disabled => f.write_str("guard is disabled"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Guard {
    position: RoomId,
    moves: u32,
    caught: bool,
    enabled: bool,
    algorithm: AdversaryAlgorithm,
    depth: u32,
    vision_range: u32,
}

impl Guard {
    pub fn new(start: RoomId, config: &EscapeConfig) -> Self {
        Self {
            position: start,
            moves: 0,
            caught: false,
            enabled: config.guard_enabled,
            algorithm: config.guard_search,
            depth: config.minimax_depth,
            vision_range: config.guard_vision_range,
        }
    }

    pub fn position(&self) -> RoomId {
        self.position
    }

    pub fn moves_made(&self) -> u32 {
        self.moves
    }

    pub fn has_caught(&self) -> bool {
        self.caught
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn algorithm(&self) -> AdversaryAlgorithm {
        self.algorithm
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Takes one adversarial step toward `agent`.
    ///
    /// Sets the caught flag when the guard lands on the agent's room. With no
    /// legal move the position is unchanged and [`GuardMoveKind::NoMove`] is
    /// reported.
    pub fn make_move(&mut self, graph: &RoomGraph, agent: RoomId) -> GuardMove {
        let from = self.position;
        let stay = |kind| GuardMove {
            from,
            to: from,
            kind,
            stats: AdversaryStats::default(),
        };

        if !self.enabled {
            return stay(GuardMoveKind::Disabled);
        }
        let Some(decision) = self.algorithm.decide(graph, from, agent, self.depth) else {
            return stay(GuardMoveKind::NoMove);
        };

        self.position = decision.room;
        self.moves += 1;
        let kind = if self.position == agent {
            self.caught = true;
            GuardMoveKind::Caught
        } else {
            GuardMoveKind::Moved {
                distance: graph.distance(self.position, agent),
            }
        };

        GuardMove {
            from,
            to: self.position,
            kind,
            stats: decision.stats,
        }
    }

    pub fn distance_to(&self, graph: &RoomGraph, agent: RoomId) -> Option<u32> {
        graph.distance(self.position, agent)
    }

    /// Whether the agent is within vision range over unlocked doors.
    pub fn can_see(&self, graph: &RoomGraph, agent: RoomId) -> bool {
        self.distance_to(graph, agent)
            .is_some_and(|d| d <= self.vision_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> RoomGraph {
        RoomGraph::builder()
            .with_rooms(6)
            .door(0usize, 1usize)
            .door(1usize, 2usize)
            .door(2usize, 3usize)
            .door(3usize, 4usize)
            .door(4usize, 5usize)
            .build()
            .unwrap()
    }

    #[test]
    fn guard_catches_adjacent_agent() {
        let graph = corridor();
        let mut guard = Guard::new(RoomId(3), &EscapeConfig::default());
        let step = guard.make_move(&graph, RoomId(2));
        assert!(step.caught());
        assert!(guard.has_caught());
        assert_eq!(guard.position(), RoomId(2));
        assert_eq!(guard.moves_made(), 1);
    }

    #[test]
    fn disabled_guard_stays_put() {
        let config = EscapeConfig {
            guard_enabled: false,
            ..EscapeConfig::default()
        };
        let mut guard = Guard::new(RoomId(3), &config);
        let step = guard.make_move(&corridor(), RoomId(0));
        assert_eq!(step.kind, GuardMoveKind::Disabled);
        assert_eq!(guard.position(), RoomId(3));
        assert_eq!(step.to_string(), "guard is disabled");
    }

    #[test]
    fn trapped_guard_reports_no_move() {
        let graph = RoomGraph::builder()
            .with_rooms(3)
            .door(0usize, 1usize)
            .locked_door(1usize, 2usize)
            .build()
            .unwrap();
        let mut guard = Guard::new(RoomId(2), &EscapeConfig::default());
        let step = guard.make_move(&graph, RoomId(0));
        assert_eq!(step.kind, GuardMoveKind::NoMove);
        assert_eq!(step.to, RoomId(2));
        assert_eq!(guard.moves_made(), 0);
    }

    #[test]
    fn vision_uses_door_distance() {
        let graph = corridor();
        let guard = Guard::new(RoomId(4), &EscapeConfig::default());
        assert!(guard.can_see(&graph, RoomId(1)));
        assert!(!guard.can_see(&graph, RoomId(0)));
    }
}
