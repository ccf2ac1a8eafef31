//! Wall-break legality for the carving miner

use crate::algorithm::carver::MiningAction;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::grid::{Grid, TileType};
use crate::spatial::position::{Direction, Position};

/// The four 2x2 windows having the target as a corner, as
/// (cardinal, cardinal, diagonal) offsets from the target
const FLOOR_BLOCK_WINDOWS: [[Direction; 3]; 4] = [
    [Direction::North, Direction::East, Direction::NorthEast],
    [Direction::North, Direction::West, Direction::NorthWest],
    [Direction::South, Direction::East, Direction::SouthEast],
    [Direction::South, Direction::West, Direction::SouthWest],
];

/// Whether the wall at `target` may be turned into floor
///
/// Rules:
/// 1. The target is inside the grid and not on its border (section
///    boundaries do not count as borders)
/// 2. Breaking it does not complete a 2x2 block of FLOOR tiles
pub fn can_break_wall(grid: &Grid, target: Position) -> bool {
    if !grid.contains(target) || grid.is_border(target) {
        return false;
    }
    !completes_floor_block(grid, target)
}

/// Whether all three other cells of any 2x2 window around `target` are FLOOR
pub fn completes_floor_block(grid: &Grid, target: Position) -> bool {
    FLOOR_BLOCK_WINDOWS.iter().any(|window| {
        window
            .iter()
            .all(|&direction| grid.is(target.step(direction), TileType::Floor))
    })
}

/// Action the miner performs when stepping onto `target`
///
/// # Errors
///
/// Returns an error if `target` is outside the grid
pub fn determine_action(grid: &Grid, target: Position) -> Result<MiningAction> {
    match grid.tile_type(target) {
        Some(TileType::Wall) => Ok(MiningAction::Break),
        Some(_) => Ok(MiningAction::Backtrack),
        None => Err(invalid_parameter(
            "target",
            &target,
            &"miner target is outside the grid",
        )),
    }
}
