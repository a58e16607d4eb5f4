/// Labels handed out to generated rooms by id. Rooms past the end of the
/// catalog fall back to `Room <id>`.
pub const ROOM_NAMES: [&str; 30] = [
    "Entrance Hall",
    "Storage Room",
    "Library",
    "Armory",
    "Kitchen",
    "Dungeon",
    "Guard Room",
    "Treasury",
    "Laboratory",
    "Chapel",
    "Throne Room",
    "Garden",
    "Tower",
    "Cellar",
    "Study",
    "Gallery",
    "Chamber",
    "Vault",
    "Courtyard",
    "Crypt",
    "Workshop",
    "Barracks",
    "Dining Hall",
    "Prison",
    "Observatory",
    "Archive",
    "Forge",
    "Sanctuary",
    "Quarters",
    "Hall of Mirrors",
];

pub const START_LABEL: &str = "Entrance (START)";
pub const EXIT_LABEL: &str = "Exit Door (ESCAPE)";

pub fn room_name(index: usize) -> String {
    ROOM_NAMES
        .get(index)
        .map_or_else(|| format!("Room {index}"), |name| (*name).to_owned())
}
