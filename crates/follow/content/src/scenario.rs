//! Scenario file format.
//!
//! A scenario describes the locations, where the leader and the companion
//! start, and the route the leader walks. Layout rows use `#` for walls and
//! `.` for floor; row `y` of the file is tile row `y`.

use follow_core::{LocationId, Position};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub locations: Vec<LocationLayout>,
    pub leader: Placement,
    pub follower: Placement,
    /// Display name of the companion.
    pub companion: String,
    /// Tiles the leader visits in order. A waypoint in another location is
    /// reached by stepping through a door (instant transfer).
    #[serde(default)]
    pub route: Vec<Waypoint>,
    #[serde(default = "Scenario::default_ticks")]
    pub ticks: u64,
}

impl Scenario {
    pub const DEFAULT_TICKS: u64 = 600;

    fn default_ticks() -> u64 {
        Self::DEFAULT_TICKS
    }

    pub fn location(&self, id: &LocationId) -> Option<&LocationLayout> {
        self.locations.iter().find(|layout| &layout.id == id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationLayout {
    pub id: LocationId,
    pub rows: Vec<String>,
}

impl LocationLayout {
    pub const WALL: char = '#';
    pub const FLOOR: char = '.';

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.chars().count())
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn contains(&self, tile: Position) -> bool {
        tile.x >= 0
            && tile.y >= 0
            && (tile.x as usize) < self.width()
            && (tile.y as usize) < self.height()
    }

    /// Wall tiles in row-major order.
    pub fn walls(&self) -> impl Iterator<Item = Position> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.chars()
                .enumerate()
                .filter(|(_, cell)| *cell == Self::WALL)
                .map(move |(x, _)| Position::new(x as i32, y as i32))
        })
    }

    pub fn is_floor(&self, tile: Position) -> bool {
        self.contains(tile)
            && self.rows[tile.y as usize].chars().nth(tile.x as usize) == Some(Self::FLOOR)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub location: LocationId,
    pub tile: Position,
    pub speed: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waypoint {
    pub location: LocationId,
    pub tile: Position,
}
