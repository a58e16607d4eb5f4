//! Procedural scenario generation.
//!
//! A scenario is a fresh [`Environment`] plus the guard's starting room. The
//! layout is a chain `0 - 1 - ... - n-1` of open doors, which keeps the exit
//! reachable, with a handful of extra shortcuts on top. Some shortcuts are
//! locked, and every room touching a locked door holds a puzzle.
//!
//! Each concern draws from its own [`PcgRng`] stream, so the same seed always
//! produces the same map.
mod names;

pub use names::{EXIT_LABEL, ROOM_NAMES, START_LABEL, room_name};

use escape_core::{
    Environment, EnvironmentError, ErrorSeverity, EscapeConfig, GameError, GraphError, KeyId,
    PcgRng, RoomFlags, RoomGraphBuilder, RoomId, RoomSpec,
};

const LAYOUT_STREAM: u64 = 1;
const KEY_STREAM: u64 = 2;
const TRAP_STREAM: u64 = 3;
const GUARD_STREAM: u64 = 4;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScenarioError {
    #[error("a scenario needs at least {min} rooms, got {count}")]
    TooFewRooms { count: usize, min: usize },

    #[error("generated layout is malformed: {0}")]
    Graph(#[from] GraphError),

    #[error("generated layout is unplayable: {0}")]
    Environment(#[from] EnvironmentError),
}

impl GameError for ScenarioError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ScenarioError::TooFewRooms { .. } => ErrorSeverity::Validation,
            ScenarioError::Graph(_) | ScenarioError::Environment(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ScenarioError::TooFewRooms { .. } => "SCENARIO_TOO_FEW_ROOMS",
            ScenarioError::Graph(_) => "SCENARIO_GRAPH",
            ScenarioError::Environment(_) => "SCENARIO_ENVIRONMENT",
        }
    }
}

/// A playable map and where the guard begins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scenario {
    pub environment: Environment,
    pub guard_start: RoomId,
}

/// Builds scenarios for a fixed room/key/trap budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScenarioGenerator {
    room_count: usize,
    num_keys: usize,
    num_traps: usize,
}

impl ScenarioGenerator {
    pub const MIN_ROOMS: usize = 2;
    pub const LOCKED_DOOR_CHANCE: f64 = 0.4;

    pub fn new(room_count: usize) -> Self {
        Self {
            room_count,
            num_keys: EscapeConfig::DEFAULT_NUM_KEYS,
            num_traps: EscapeConfig::DEFAULT_NUM_TRAPS,
        }
    }

    pub fn from_config(config: &EscapeConfig) -> Self {
        Self::new(config.room_count())
            .with_keys(config.num_keys)
            .with_traps(config.num_traps)
    }

    pub fn with_keys(mut self, num_keys: usize) -> Self {
        self.num_keys = num_keys;
        self
    }

    pub fn with_traps(mut self, num_traps: usize) -> Self {
        self.num_traps = num_traps;
        self
    }

    pub fn room_count(&self) -> usize {
        self.room_count
    }

    pub fn generate(&self, seed: u64) -> Result<Scenario, ScenarioError> {
        let n = self.room_count;
        if n < Self::MIN_ROOMS {
            return Err(ScenarioError::TooFewRooms {
                count: n,
                min: Self::MIN_ROOMS,
            });
        }
        let exit = RoomId::from(n - 1);

        let mut builder = RoomGraphBuilder::new();
        for index in 0..n {
            let spec = match index {
                0 => RoomSpec::new(START_LABEL),
                i if i == n - 1 => RoomSpec::new(EXIT_LABEL).exit(),
                i => RoomSpec::new(room_name(i)),
            };
            builder.push_room(spec);
        }

        let locked = Self::connect(&mut builder, seed);
        for room in locked {
            if let Some(spec) = builder.room_spec_mut(room) {
                spec.flags.insert(RoomFlags::HAS_PUZZLE);
            }
        }

        let key_rooms = self.place_keys(&mut builder, seed);
        self.place_traps(&mut builder, &key_rooms, seed);

        let graph = builder.build()?;
        let environment = Environment::new(graph, RoomId::START, exit)?;

        Ok(Scenario {
            environment,
            guard_start: Self::guard_start(n, seed),
        })
    }

    /// Lays the backbone chain and the extra shortcuts. Returns every room
    /// that ended up next to a locked door.
    fn connect(builder: &mut RoomGraphBuilder, seed: u64) -> Vec<RoomId> {
        let n = builder.room_count();
        for i in 1..n {
            builder.push_door(RoomId::from(i - 1), RoomId::from(i), false);
        }

        let mut rng = PcgRng::for_context(seed, LAYOUT_STREAM, 0);
        let mut locked_rooms = Vec::new();
        for _ in 0..n / 3 {
            let a = RoomId::from(rng.index(n));
            let b = RoomId::from(rng.index(n));
            if a == b || builder.has_door(a, b) {
                continue;
            }
            let locked = rng.chance(Self::LOCKED_DOOR_CHANCE);
            builder.push_door(a, b, locked);
            if locked {
                locked_rooms.extend([a, b]);
            }
        }
        locked_rooms
    }

    /// Rooms strictly between the start and the exit.
    fn interior(n: usize) -> Vec<RoomId> {
        (1..n.saturating_sub(1)).map(RoomId::from).collect()
    }

    fn place_keys(&self, builder: &mut RoomGraphBuilder, seed: u64) -> Vec<RoomId> {
        let mut rooms = Self::interior(self.room_count);
        PcgRng::for_context(seed, KEY_STREAM, 0).shuffle(&mut rooms);
        rooms.truncate(self.num_keys);

        for (index, &room) in rooms.iter().enumerate() {
            if let Some(spec) = builder.room_spec_mut(room) {
                spec.flags.insert(RoomFlags::HAS_KEY);
                spec.key = Some(KeyId(index as u32));
            }
        }
        rooms
    }

    fn place_traps(&self, builder: &mut RoomGraphBuilder, key_rooms: &[RoomId], seed: u64) {
        let mut rooms: Vec<RoomId> = Self::interior(self.room_count)
            .into_iter()
            .filter(|room| !key_rooms.contains(room))
            .collect();
        PcgRng::for_context(seed, TRAP_STREAM, 0).shuffle(&mut rooms);

        for &room in rooms.iter().take(self.num_traps) {
            if let Some(spec) = builder.room_spec_mut(room) {
                spec.flags.insert(RoomFlags::HAS_TRAP);
            }
        }
    }

    /// A random room in `2..n-2`, or room 1 when the map is too small for that.
    fn guard_start(n: usize, seed: u64) -> RoomId {
        if n < 5 {
            return RoomId::from(1usize);
        }
        let mut rng = PcgRng::for_context(seed, GUARD_STREAM, 0);
        RoomId(rng.range(2, (n - 3) as u32))
    }
}
