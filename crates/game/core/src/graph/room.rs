use std::fmt;

use bitflags::bitflags;

/// Identifier of a room. Ids are dense: a graph with `n` rooms uses `0..n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomId(pub u32);

impl RoomId {
    pub const START: Self = Self(0);

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Numeric difference between two ids.
    ///
    /// Used as a cheap stand-in for topological distance by the belief
    /// propagation and the A* heuristic. It is not a graph distance.
    #[inline]
    pub const fn id_distance(self, other: RoomId) -> u32 {
        self.0.abs_diff(other.0)
    }
}

impl From<usize> for RoomId {
    fn from(value: usize) -> Self {
        Self(value as u32)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a collectible key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyId(pub u32);

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key {}", self.0)
    }
}

bitflags! {
    /// Static contents of a room, fixed when the scenario is set up.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct RoomFlags: u8 {
        const HAS_KEY    = 1 << 0;
        const HAS_TRAP   = 1 << 1;
        const HAS_PUZZLE = 1 << 2;
        const IS_EXIT    = 1 << 3;
    }
}

bitflags! {
    /// One-shot events that already happened in a room.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct RoomStatus: u8 {
        const TRAP_TRIGGERED = 1 << 0;
        const PUZZLE_SOLVED  = 1 << 1;
    }
}

/// Index into the graph's door arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct DoorId(pub(crate) usize);

/// A single undirected door. Both endpoints reference the same record, so the
/// lock state has exactly one source of truth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Door {
    pub(crate) a: RoomId,
    pub(crate) b: RoomId,
    pub(crate) locked: bool,
}

impl Door {
    /// Returns the endpoint opposite to `from`.
    #[inline]
    pub(crate) fn other(&self, from: RoomId) -> RoomId {
        if self.a == from { self.b } else { self.a }
    }

    #[inline]
    pub(crate) fn joins(&self, x: RoomId, y: RoomId) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }
}

/// A room record. Doors are stored as indices into the owning graph's arena,
/// in insertion order, which fixes neighbor iteration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    id: RoomId,
    label: String,
    flags: RoomFlags,
    key: Option<KeyId>,
    status: RoomStatus,
    pub(crate) doors: Vec<DoorId>,
}

impl Room {
    pub(crate) fn new(id: RoomId, spec: RoomSpec) -> Self {
        Self {
            id,
            label: spec.label,
            flags: spec.flags,
            key: spec.key,
            status: RoomStatus::empty(),
            doors: Vec::new(),
        }
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn flags(&self) -> RoomFlags {
        self.flags
    }

    pub fn status(&self) -> RoomStatus {
        self.status
    }

    pub fn key(&self) -> Option<KeyId> {
        self.key.filter(|_| self.flags.contains(RoomFlags::HAS_KEY))
    }

    pub fn has_trap(&self) -> bool {
        self.flags.contains(RoomFlags::HAS_TRAP)
    }

    pub fn has_puzzle(&self) -> bool {
        self.flags.contains(RoomFlags::HAS_PUZZLE)
    }

    pub fn is_exit(&self) -> bool {
        self.flags.contains(RoomFlags::IS_EXIT)
    }

    pub fn trap_triggered(&self) -> bool {
        self.status.contains(RoomStatus::TRAP_TRIGGERED)
    }

    pub fn puzzle_solved(&self) -> bool {
        self.status.contains(RoomStatus::PUZZLE_SOLVED)
    }

    pub(crate) fn mark(&mut self, status: RoomStatus) {
        self.status.insert(status);
    }

    pub(crate) fn set_flags(&mut self, flags: RoomFlags) {
        self.flags.insert(flags);
    }
}

/// Blueprint for a room handed to [`super::RoomGraphBuilder`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomSpec {
    pub label: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: RoomFlags,
    #[cfg_attr(feature = "serde", serde(default))]
    pub key: Option<KeyId>,
}

impl RoomSpec {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            flags: RoomFlags::empty(),
            key: None,
        }
    }

    pub fn with_flags(mut self, flags: RoomFlags) -> Self {
        self.flags.insert(flags);
        self
    }

    pub fn with_key(mut self, key: KeyId) -> Self {
        self.flags.insert(RoomFlags::HAS_KEY);
        self.key = Some(key);
        self
    }

    pub fn with_trap(self) -> Self {
        self.with_flags(RoomFlags::HAS_TRAP)
    }

    pub fn exit(self) -> Self {
        self.with_flags(RoomFlags::IS_EXIT)
    }
}
