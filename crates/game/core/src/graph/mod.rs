//! Undirected room graph with lockable doors.
//!
//! Doors live in a single arena and rooms keep indices into it, so a door's
//! lock state is shared by both endpoints. The vertex and door sets are fixed
//! once the graph is built; only lock state (and per-room one-shot status)
//! changes afterwards.
mod error;
mod room;

use std::collections::VecDeque;

pub use error::GraphError;
pub use room::{KeyId, Room, RoomFlags, RoomId, RoomSpec, RoomStatus};

use room::{Door, DoorId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomGraph {
    rooms: Vec<Room>,
    doors: Vec<Door>,
}

impl RoomGraph {
    pub fn builder() -> RoomGraphBuilder {
        RoomGraphBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn door_count(&self) -> usize {
        self.doors.len()
    }

    pub fn contains(&self, id: RoomId) -> bool {
        id.index() < self.rooms.len()
    }

    /// Enumerates every room id in ascending order.
    pub fn room_ids(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.rooms.iter().map(Room::id)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> + '_ {
        self.rooms.iter()
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.index())
    }

    pub(crate) fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id.index())
    }

    /// Rooms reachable through an unlocked door, in door insertion order.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not obtained from this graph.
    pub fn neighbors(&self, id: RoomId) -> impl Iterator<Item = RoomId> + '_ {
        self.all_edges(id)
            .filter(|&(_, locked)| !locked)
            .map(|(other, _)| other)
    }

    /// Every door of a room as `(neighbor, locked)`, locked doors included.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not obtained from this graph.
    pub fn all_edges(&self, id: RoomId) -> impl Iterator<Item = (RoomId, bool)> + '_ {
        self.expect_room(id).doors.iter().map(move |door_id| {
            let door = &self.doors[door_id.0];
            (door.other(id), door.locked)
        })
    }

    /// Neighbors behind a still-locked door.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not obtained from this graph.
    pub fn locked_doors(&self, id: RoomId) -> impl Iterator<Item = RoomId> + '_ {
        self.all_edges(id)
            .filter(|&(_, locked)| locked)
            .map(|(other, _)| other)
    }

    pub fn has_door(&self, a: RoomId, b: RoomId) -> bool {
        self.door_between(a, b).is_some()
    }

    pub fn is_locked(&self, a: RoomId, b: RoomId) -> Option<bool> {
        self.door_between(a, b).map(|id| self.doors[id.0].locked)
    }

    /// Unlocks the door between `a` and `b` for both endpoints.
    ///
    /// Idempotent. Returns `false` when the rooms share no door.
    pub fn unlock(&mut self, a: RoomId, b: RoomId) -> bool {
        match self.door_between(a, b) {
            Some(id) => {
                self.doors[id.0].locked = false;
                true
            }
            None => false,
        }
    }

    /// Breadth-first edge distance over unlocked doors.
    ///
    /// Returns `None` when `to` is unreachable or either id is unknown.
    pub fn distance(&self, from: RoomId, to: RoomId) -> Option<u32> {
        self.bfs_distance(from, to, false)
    }

    /// Whether `to` is reachable from `from` when every door is treated as open.
    pub fn is_connected_ignoring_locks(&self, from: RoomId, to: RoomId) -> bool {
        self.bfs_distance(from, to, true).is_some()
    }

    fn bfs_distance(&self, from: RoomId, to: RoomId, ignore_locks: bool) -> Option<u32> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }
        if from == to {
            return Some(0);
        }

        let mut visited = vec![false; self.rooms.len()];
        visited[from.index()] = true;
        let mut queue = VecDeque::from([(from, 0u32)]);

        while let Some((current, dist)) = queue.pop_front() {
            for (next, locked) in self.all_edges(current) {
                if locked && !ignore_locks {
                    continue;
                }
                if next == to {
                    return Some(dist + 1);
                }
                if !visited[next.index()] {
                    visited[next.index()] = true;
                    queue.push_back((next, dist + 1));
                }
            }
        }

        None
    }

    fn door_between(&self, a: RoomId, b: RoomId) -> Option<DoorId> {
        let room = self.room(a)?;
        room.doors
            .iter()
            .copied()
            .find(|door_id| self.doors[door_id.0].joins(a, b))
    }

    fn expect_room(&self, id: RoomId) -> &Room {
        match self.rooms.get(id.index()) {
            Some(room) => room,
            None => panic!(
                "room {id} is not part of this graph ({} rooms)",
                self.rooms.len()
            ),
        }
    }
}

/// Incrementally assembles a [`RoomGraph`]. Room ids are handed out in
/// insertion order starting from 0.
#[derive(Clone, Debug, Default)]
pub struct RoomGraphBuilder {
    rooms: Vec<RoomSpec>,
    doors: Vec<Door>,
}

impl RoomGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` plain rooms labelled `Room <id>`.
    pub fn with_rooms(mut self, count: usize) -> Self {
        for _ in 0..count {
            let label = format!("Room {}", self.rooms.len());
            self.rooms.push(RoomSpec::new(label));
        }
        self
    }

    pub fn room(mut self, spec: RoomSpec) -> Self {
        self.rooms.push(spec);
        self
    }

    /// Adds a room and returns its id, for callers that build imperatively.
    pub fn push_room(&mut self, spec: RoomSpec) -> RoomId {
        self.rooms.push(spec);
        RoomId::from(self.rooms.len() - 1)
    }

    pub fn door(self, a: impl Into<RoomId>, b: impl Into<RoomId>) -> Self {
        self.connect(a.into(), b.into(), false)
    }

    pub fn locked_door(self, a: impl Into<RoomId>, b: impl Into<RoomId>) -> Self {
        self.connect(a.into(), b.into(), true)
    }

    pub fn push_door(&mut self, a: RoomId, b: RoomId, locked: bool) {
        self.doors.push(Door { a, b, locked });
    }

    /// Whether a door between `a` and `b` was already added.
    pub fn has_door(&self, a: RoomId, b: RoomId) -> bool {
        self.doors.iter().any(|door| door.joins(a, b))
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Mutable access to a pending room, e.g. to place keys or traps.
    pub fn room_spec_mut(&mut self, id: RoomId) -> Option<&mut RoomSpec> {
        self.rooms.get_mut(id.index())
    }

    fn connect(mut self, a: RoomId, b: RoomId, locked: bool) -> Self {
        self.push_door(a, b, locked);
        self
    }

    pub fn build(self) -> Result<RoomGraph, GraphError> {
        if self.rooms.is_empty() {
            return Err(GraphError::Empty);
        }

        let mut rooms: Vec<Room> = self
            .rooms
            .into_iter()
            .enumerate()
            .map(|(index, spec)| Room::new(RoomId::from(index), spec))
            .collect();

        let mut doors: Vec<Door> = Vec::with_capacity(self.doors.len());
        for door in self.doors {
            for endpoint in [door.a, door.b] {
                if endpoint.index() >= rooms.len() {
                    return Err(GraphError::UnknownRoom(endpoint));
                }
            }
            if door.a == door.b {
                return Err(GraphError::SelfLoop(door.a));
            }
            if doors.iter().any(|existing| existing.joins(door.a, door.b)) {
                return Err(GraphError::DuplicateDoor {
                    a: door.a,
                    b: door.b,
                });
            }

            let id = DoorId(doors.len());
            rooms[door.a.index()].doors.push(id);
            rooms[door.b.index()].doors.push(id);
            doors.push(door);
        }

        Ok(RoomGraph { rooms, doors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> RoomGraph {
        // 0 - 1 - 3
        //  \     /
        //   2 --x   (2-3 locked)
        RoomGraph::builder()
            .with_rooms(4)
            .door(0usize, 1usize)
            .door(1usize, 3usize)
            .door(0usize, 2usize)
            .locked_door(2usize, 3usize)
            .build()
            .unwrap()
    }

    #[test]
    fn neighbors_skip_locked_doors() {
        let graph = diamond();
        let from_two: Vec<_> = graph.neighbors(RoomId(2)).collect();
        assert_eq!(from_two, vec![RoomId(0)]);

        let all: Vec<_> = graph.all_edges(RoomId(2)).collect();
        assert_eq!(all, vec![(RoomId(0), false), (RoomId(3), true)]);
    }

    #[test]
    fn unlock_is_shared_by_both_endpoints() {
        let mut graph = diamond();
        assert!(graph.unlock(RoomId(3), RoomId(2)));
        assert!(graph.neighbors(RoomId(2)).any(|r| r == RoomId(3)));
        assert!(graph.neighbors(RoomId(3)).any(|r| r == RoomId(2)));

        // Idempotent
        assert!(graph.unlock(RoomId(2), RoomId(3)));
        assert_eq!(graph.is_locked(RoomId(2), RoomId(3)), Some(false));
    }

    #[test]
    fn unlock_without_door_reports_false() {
        let mut graph = diamond();
        assert!(!graph.unlock(RoomId(0), RoomId(3)));
    }

    #[test]
    fn distance_respects_locks() {
        let mut graph = diamond();
        assert_eq!(graph.distance(RoomId(2), RoomId(3)), Some(3));
        graph.unlock(RoomId(2), RoomId(3));
        assert_eq!(graph.distance(RoomId(2), RoomId(3)), Some(1));
        assert_eq!(graph.distance(RoomId(1), RoomId(1)), Some(0));
    }

    #[test]
    fn isolated_room_is_unreachable() {
        let graph = RoomGraph::builder()
            .with_rooms(3)
            .door(0usize, 1usize)
            .locked_door(1usize, 2usize)
            .build()
            .unwrap();
        assert_eq!(graph.distance(RoomId(0), RoomId(2)), None);
        assert!(graph.is_connected_ignoring_locks(RoomId(0), RoomId(2)));
    }

    #[test]
    fn builder_rejects_malformed_doors() {
        let self_loop = RoomGraph::builder().with_rooms(2).door(1usize, 1usize).build();
        assert_eq!(self_loop, Err(GraphError::SelfLoop(RoomId(1))));

        let unknown = RoomGraph::builder().with_rooms(2).door(0usize, 5usize).build();
        assert_eq!(unknown, Err(GraphError::UnknownRoom(RoomId(5))));

        let duplicate = RoomGraph::builder()
            .with_rooms(2)
            .door(0usize, 1usize)
            .locked_door(1usize, 0usize)
            .build();
        assert!(matches!(duplicate, Err(GraphError::DuplicateDoor { .. })));

        assert_eq!(RoomGraph::builder().build(), Err(GraphError::Empty));
    }

    #[test]
    #[should_panic(expected = "not part of this graph")]
    fn out_of_range_adjacency_lookup_panics() {
        let graph = diamond();
        let _ = graph.neighbors(RoomId(42)).count();
    }
}
