//! Grid coordinates and compass directions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer grid coordinate with the origin at the top-left corner
///
/// Signed so that neighbours of border cells can be represented and
/// rejected by bounds checks instead of wrapping.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl Position {
    /// Create a position
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring position one step in `direction`
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Neighbours in the order of the given direction table
    pub fn neighbors(self, directions: &[Direction]) -> impl Iterator<Item = Self> + '_ {
        directions.iter().map(move |&direction| self.step(direction))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Compass direction
///
/// Cardinals drive miner movement and connectivity; diagonals are only used
/// for 2x2 detection, VOID trimming and all-direction biome expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Up
    North,
    /// Down
    South,
    /// Right
    East,
    /// Left
    West,
    /// Up-right
    NorthEast,
    /// Down-right
    SouthEast,
    /// Up-left
    NorthWest,
    /// Down-left
    SouthWest,
}

/// Cardinal directions in evaluation order
pub const CARDINAL_DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
];

/// All eight directions in evaluation order
pub const ALL_DIRECTIONS: [Direction; 8] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
    Direction::NorthEast,
    Direction::SouthEast,
    Direction::NorthWest,
    Direction::SouthWest,
];

impl Direction {
    /// `(dx, dy)` offset with y growing downwards
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
            Self::NorthEast => (1, -1),
            Self::SouthEast => (1, 1),
            Self::NorthWest => (-1, -1),
            Self::SouthWest => (-1, 1),
        }
    }

    /// Whether this is one of the four cardinal directions
    pub const fn is_cardinal(self) -> bool {
        matches!(self, Self::North | Self::South | Self::East | Self::West)
    }
}
