//! Static level description: tiles, spawn basis, entity origins and name roster.

use glam::Vec2;
use mobile_strike_core::Camera;

const CITY_TILES: [[u8; 24]; 24] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 5, 6, 5, 0, 0, 0, 0, 0, 0, 8, 8, 8, 0, 0, 2, 2, 2, 2, 0, 0, 1],
    [1, 0, 0, 5, 0, 5, 0, 0, 0, 0, 0, 0, 8, 0, 8, 0, 0, 2, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 5, 5, 5, 0, 0, 0, 0, 0, 0, 8, 8, 8, 0, 0, 2, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 2, 2, 2, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 4, 4, 0, 0, 0, 0, 0, 0, 4, 4, 4, 0, 0, 0, 0, 0, 0, 4, 4, 0, 0, 1],
    [1, 0, 4, 0, 0, 0, 0, 0, 0, 0, 4, 0, 4, 0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 4, 4, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

const CITY_HOSTILES: [(f32, f32); 8] = [
    (4.5, 2.5),
    (13.5, 3.5),
    (18.5, 3.5),
    (8.5, 9.5),
    (3.5, 14.5),
    (11.5, 15.5),
    (20.5, 15.5),
    (15.5, 10.5),
];

const CITY_MEDKITS: [(f32, f32); 5] = [
    (2.5, 2.5),
    (14.5, 1.5),
    (17.5, 5.5),
    (2.5, 15.5),
    (11.5, 17.5),
];

const ROSTER: [&str; 28] = [
    "Vex",
    "Jynx",
    "Blitz",
    "Raze",
    "Cypher",
    "Omen",
    "Breach",
    "Sova",
    "Skye",
    "Kayo",
    "Neon",
    "Fade",
    "Gekko",
    "Deadlock",
    "Iso",
    "Clove",
    "Wraith",
    "Mirage",
    "Octane",
    "Revenant",
    "Loba",
    "Rampart",
    "Fuse",
    "Valkyrie",
    "Ash",
    "Mad Maggie",
    "Catalyst",
    "Conduit",
];

/// Everything needed to populate a fresh world.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    /// Row-major tile codes.
    pub tiles: Vec<Vec<u8>>,
    /// Camera the player spawns and respawns with.
    pub spawn: Camera,
    /// Positions hostiles start at and return to after respawning.
    pub hostile_origins: Vec<Vec2>,
    /// Positions pickups start at and return to after respawning.
    pub pickup_origins: Vec<Vec2>,
    /// Display names shuffled and handed out to hostiles.
    pub roster: Vec<String>,
}

impl Layout {
    /// The seaside city: brick and concrete blocks, a park, the pier and the dunes.
    #[must_use]
    pub fn city() -> Self {
        Self {
            tiles: CITY_TILES.iter().map(|row| row.to_vec()).collect(),
            spawn: Camera::new(
                Vec2::new(10.5, 10.5),
                Vec2::new(-1.0, 0.0),
                Vec2::new(0.0, 0.66),
            ),
            hostile_origins: CITY_HOSTILES
                .iter()
                .map(|&(x, y)| Vec2::new(x, y))
                .collect(),
            pickup_origins: CITY_MEDKITS
                .iter()
                .map(|&(x, y)| Vec2::new(x, y))
                .collect(),
            roster: ROSTER.iter().map(|name| (*name).to_owned()).collect(),
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::city()
    }
}
