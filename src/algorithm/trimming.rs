//! Conversion of walls outside the playable area into VOID

use crate::spatial::grid::{Grid, TileType};
use crate::spatial::position::{ALL_DIRECTIONS, Position};
use bitvec::prelude::*;
use std::collections::VecDeque;

/// Whether any of the eight neighbours of `pos` is FLOOR
fn touches_floor(grid: &Grid, pos: Position) -> bool {
    pos.neighbors(&ALL_DIRECTIONS)
        .any(|neighbor| grid.is(neighbor, TileType::Floor))
}

/// Flood inward from the border, turning walls that touch no floor into VOID
///
/// Seeds are every WALL on the grid border. A dequeued wall becomes VOID
/// only when none of its eight neighbours is FLOOR; its unvisited wall
/// neighbours in all eight directions are then queued. Walls touching floor
/// stay, so every floor keeps a full ring of walls.
///
/// Returns the number of tiles converted.
pub fn apply_void_to_edges(grid: &mut Grid) -> usize {
    let width = grid.width();
    let mut visited = bitvec![0; grid.area()];
    let offset = |pos: Position| pos.y as usize * width + pos.x as usize;

    let mut queue: VecDeque<Position> = grid
        .iter()
        .filter(|&(pos, tile)| tile.kind == TileType::Wall && grid.is_border(pos))
        .map(|(pos, _)| pos)
        .collect();
    for &pos in &queue {
        visited.set(offset(pos), true);
    }

    let mut converted = 0;
    while let Some(pos) = queue.pop_front() {
        if touches_floor(grid, pos) {
            continue;
        }
        grid.set_type(pos, TileType::Void);
        converted += 1;

        for neighbor in pos.neighbors(&ALL_DIRECTIONS) {
            if !grid.is(neighbor, TileType::Wall) {
                continue;
            }
            let index = offset(neighbor);
            if visited.get(index).as_deref().copied().unwrap_or(true) {
                continue;
            }
            visited.set(index, true);
            queue.push_back(neighbor);
        }
    }

    converted
}
