//! Tile model and the row-major grid every stage reads and mutates
//!
//! A single canonical `Tile` carries the optional biome and interactable
//! fields from the start, so the same grid type flows through carving,
//! labeling and placement. Tiles are stored in an `ndarray::Array2` indexed
//! `[row, col]`, i.e. `[y, x]`.

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::position::Position;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Structural kind of a tile, decided by the carver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TileType {
    /// Solid rock
    Wall,
    /// Walkable space
    Floor,
    /// Trimmed wall outside the playable area
    Void,
}

/// Region label assigned by the biome labeler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Biome {
    /// Water
    Water,
    /// Forest
    Forest,
    /// Swamp
    Swamp,
    /// Magma
    Magma,
    /// Ice
    Ice,
    /// Desert
    Desert,
    /// Dungeon
    Dungeon,
}

impl Biome {
    /// Every biome in declaration order
    pub const ALL: [Self; 7] = [
        Self::Water,
        Self::Forest,
        Self::Swamp,
        Self::Magma,
        Self::Ice,
        Self::Desert,
        Self::Dungeon,
    ];

    /// Upper-case identifier
    pub const fn name(self) -> &'static str {
        match self {
            Self::Water => "WATER",
            Self::Forest => "FOREST",
            Self::Swamp => "SWAMP",
            Self::Magma => "MAGMA",
            Self::Ice => "ICE",
            Self::Desert => "DESERT",
            Self::Dungeon => "DUNGEON",
        }
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Biome {
    type Err = crate::io::error::GenerationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|biome| biome.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| invalid_parameter("biome", &s, &"unknown biome name"))
    }
}

/// Gameplay marker placed by the spawn point placer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Interactable {
    /// Player spawn
    Entry,
    /// Level exit
    Exit,
    /// Key pickup
    Key,
}

impl fmt::Display for Interactable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Entry => "ENTRY",
            Self::Exit => "EXIT",
            Self::Key => "KEY",
        })
    }
}

/// One grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Structural kind
    #[serde(rename = "type")]
    pub kind: TileType,
    /// Biome label, set only by the labeler
    pub biome: Option<Biome>,
    /// Interactable marker, set only by the placer
    pub interactable: Option<Interactable>,
}

impl Tile {
    /// Unlabeled tile of the given kind
    pub const fn new(kind: TileType) -> Self {
        Self {
            kind,
            biome: None,
            interactable: None,
        }
    }
}

/// Rectangular tile grid
///
/// `Clone` is the deep copy required at every stage hand-off: tiles are
/// plain values, so a cloned grid shares nothing with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    tiles: Array2<Tile>,
}

impl Grid {
    /// Create a grid with every tile set to `fill`
    pub fn new(width: usize, height: usize, fill: TileType) -> Self {
        Self {
            tiles: Array2::from_elem((height, width), Tile::new(fill)),
        }
    }

    /// Build a grid from text rows: `#` wall, `.` floor, `~` void
    ///
    /// # Errors
    ///
    /// Returns an error if the rows are empty, ragged, or contain other characters
    pub fn from_ascii(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        if height == 0 || width == 0 {
            return Err(invalid_parameter("rows", &height, &"grid must not be empty"));
        }

        let mut grid = Self::new(width, height, TileType::Wall);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(invalid_parameter(
                    "rows",
                    row,
                    &format!("row {y} does not have width {width}"),
                ));
            }
            for (x, ch) in row.chars().enumerate() {
                let kind = match ch {
                    '#' => TileType::Wall,
                    '.' => TileType::Floor,
                    '~' => TileType::Void,
                    other => {
                        return Err(invalid_parameter(
                            "rows",
                            &other,
                            &"expected one of '#', '.', '~'",
                        ));
                    }
                };
                if let Some(tile) = grid.tiles.get_mut([y, x]) {
                    tile.kind = kind;
                }
            }
        }
        Ok(grid)
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.tiles.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.tiles.nrows()
    }

    /// Total number of tiles
    pub fn area(&self) -> usize {
        self.tiles.len()
    }

    fn index(&self, pos: Position) -> Option<[usize; 2]> {
        let row = usize::try_from(pos.y).ok()?;
        let col = usize::try_from(pos.x).ok()?;
        (row < self.height() && col < self.width()).then_some([row, col])
    }

    /// Whether `pos` lies inside the grid
    pub fn contains(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    /// Whether `pos` is on the outer ring of the grid
    pub fn is_border(&self, pos: Position) -> bool {
        pos.x == 0
            || pos.y == 0
            || pos.x == self.width() as i32 - 1
            || pos.y == self.height() as i32 - 1
    }

    /// Tile at `pos`, if in bounds
    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        self.index(pos).and_then(|index| self.tiles.get(index))
    }

    /// Mutable tile at `pos`, if in bounds
    pub fn tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        self.index(pos).and_then(|index| self.tiles.get_mut(index))
    }

    /// Kind of the tile at `pos`, if in bounds
    pub fn tile_type(&self, pos: Position) -> Option<TileType> {
        self.tile(pos).map(|tile| tile.kind)
    }

    /// Whether the tile at `pos` exists and has the given kind
    pub fn is(&self, pos: Position, kind: TileType) -> bool {
        self.tile_type(pos) == Some(kind)
    }

    /// Set the kind of the tile at `pos`; returns `false` when out of bounds
    pub fn set_type(&mut self, pos: Position, kind: TileType) -> bool {
        if let Some(tile) = self.tile_mut(pos) {
            tile.kind = kind;
            true
        } else {
            false
        }
    }

    /// Count tiles of the given kind
    pub fn count(&self, kind: TileType) -> usize {
        self.tiles.iter().filter(|tile| tile.kind == kind).count()
    }

    /// Count non-VOID tiles already carrying a biome
    pub fn labeled_count(&self) -> usize {
        self.tiles
            .iter()
            .filter(|tile| tile.kind != TileType::Void && tile.biome.is_some())
            .count()
    }

    /// Tiles with their positions in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Tile)> + '_ {
        self.tiles
            .indexed_iter()
            .map(|((row, col), tile)| (Position::new(col as i32, row as i32), tile))
    }

    /// Positions of all tiles of the given kind in row-major order
    pub fn positions_of(&self, kind: TileType) -> Vec<Position> {
        self.iter()
            .filter(|(_, tile)| tile.kind == kind)
            .map(|(pos, _)| pos)
            .collect()
    }
}
