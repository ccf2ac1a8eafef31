//! Rectangular partitions mined independently by the carver

use crate::spatial::position::Position;
use serde::Serialize;
use std::fmt;

/// Axis-aligned sub-region of the grid with its own floor target
///
/// Bounds are inclusive. The miner never steps outside its section, but it
/// may break walls lying on the section boundary; only the grid border is
/// unbreakable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Column index in the section layout
    pub column: usize,
    /// Row index in the section layout
    pub row: usize,
    /// Minimum x (inclusive)
    pub min_x: i32,
    /// Maximum x (inclusive)
    pub max_x: i32,
    /// Minimum y (inclusive)
    pub min_y: i32,
    /// Maximum y (inclusive)
    pub max_y: i32,
    /// Floor tiles this section should end up with
    pub target_floor_count: usize,
}

impl Section {
    /// Number of tiles covered
    pub const fn area(&self) -> usize {
        ((self.max_x - self.min_x + 1) * (self.max_y - self.min_y + 1)) as usize
    }

    /// Whether `pos` lies within the inclusive bounds
    pub const fn contains(&self, pos: Position) -> bool {
        pos.x >= self.min_x && pos.x <= self.max_x && pos.y >= self.min_y && pos.y <= self.max_y
    }

    /// Whether `pos` lies on the edge of this section
    pub const fn is_on_boundary(&self, pos: Position) -> bool {
        self.contains(pos)
            && (pos.x == self.min_x
                || pos.x == self.max_x
                || pos.y == self.min_y
                || pos.y == self.max_y)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.column, self.row)
    }
}

/// Floor target for `tiles` cells at `target_percentage`
pub fn target_floor_count(tiles: usize, target_percentage: f64) -> usize {
    (tiles as f64 * (target_percentage / 100.0)).floor() as usize
}

/// Split a grid into `sections_x` by `sections_y` rectangles
///
/// Sections are ordered left-to-right, top-to-bottom. Remainder cells are
/// absorbed by the last column and the last row. A 1x1 layout yields a
/// single section covering the whole grid.
pub fn create_sections(
    width: usize,
    height: usize,
    sections_x: usize,
    sections_y: usize,
    target_percentage: f64,
) -> Vec<Section> {
    let sections_x = sections_x.max(1);
    let sections_y = sections_y.max(1);
    let section_width = width / sections_x;
    let section_height = height / sections_y;

    let mut sections = Vec::with_capacity(sections_x * sections_y);
    for row in 0..sections_y {
        for column in 0..sections_x {
            let min_x = column * section_width;
            let min_y = row * section_height;
            let max_x = if column == sections_x - 1 {
                width - 1
            } else {
                (column + 1) * section_width - 1
            };
            let max_y = if row == sections_y - 1 {
                height - 1
            } else {
                (row + 1) * section_height - 1
            };

            let tiles = (max_x - min_x + 1) * (max_y - min_y + 1);
            sections.push(Section {
                column,
                row,
                min_x: min_x as i32,
                max_x: max_x as i32,
                min_y: min_y as i32,
                max_y: max_y as i32,
                target_floor_count: target_floor_count(tiles, target_percentage),
            });
        }
    }
    sections
}
