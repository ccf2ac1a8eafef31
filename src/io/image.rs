//! PNG rendering of finished maps

use crate::io::error::{GenerationError, Result, file_system};
use crate::spatial::grid::{Biome, Grid, Interactable, Tile, TileType};
use crate::spatial::position::Position;
use image::{ImageBuffer, Rgba, RgbaImage};
use std::path::Path;

const VOID_COLOR: [u8; 3] = [0x00, 0x00, 0x00];
const FLOOR_COLOR: [u8; 3] = [0xf0, 0xf0, 0xf0];
const UNLABELED_WALL_COLOR: [u8; 3] = [0x6b, 0x72, 0x80];

/// `(floor, wall)` colours of a biome
const fn biome_colors(biome: Biome) -> ([u8; 3], [u8; 3]) {
    match biome {
        Biome::Water => ([0x6b, 0xb6, 0xff], [0x1e, 0x40, 0xaf]),
        Biome::Forest => ([0x86, 0xef, 0xac], [0x16, 0x65, 0x34]),
        Biome::Swamp => ([0xc0, 0x84, 0xfc], [0x6b, 0x21, 0xa8]),
        Biome::Magma => ([0xfc, 0xa5, 0xa5], [0x99, 0x1b, 0x1b]),
        Biome::Ice => ([0xa5, 0xf3, 0xfc], [0x15, 0x5e, 0x75]),
        Biome::Desert => ([0xfd, 0xe6, 0x8a], [0x92, 0x40, 0x0e]),
        Biome::Dungeon => ([0xd1, 0xd5, 0xdb], [0x37, 0x41, 0x51]),
    }
}

const fn interactable_color(interactable: Interactable) -> [u8; 3] {
    match interactable {
        Interactable::Entry => [0x22, 0xc5, 0x5e],
        Interactable::Exit => [0xef, 0x44, 0x44],
        Interactable::Key => [0xea, 0xb3, 0x08],
    }
}

/// Base colour of a tile, ignoring any interactable
pub const fn tile_color(tile: &Tile) -> [u8; 3] {
    match (tile.kind, tile.biome) {
        (TileType::Void, _) => VOID_COLOR,
        (TileType::Floor, Some(biome)) => biome_colors(biome).0,
        (TileType::Wall, Some(biome)) => biome_colors(biome).1,
        (TileType::Floor, None) => FLOOR_COLOR,
        (TileType::Wall, None) => UNLABELED_WALL_COLOR,
    }
}

/// Render `grid` with `scale` pixels per tile
///
/// Interactables are drawn as a centered square half a tile wide.
pub fn render_grid(grid: &Grid, scale: u32) -> RgbaImage {
    let scale = scale.max(1);
    let width = grid.width() as u32 * scale;
    let height = grid.height() as u32 * scale;
    let inset = scale / 4;

    ImageBuffer::from_fn(width, height, |px, py| {
        let (x, y) = (px / scale, py / scale);
        let Some(tile) = grid.tile(Position::new(x as i32, y as i32)) else {
            return Rgba([0, 0, 0, 0]);
        };

        let (lx, ly) = (px % scale, py % scale);
        let in_marker = lx >= inset && lx < scale - inset && ly >= inset && ly < scale - inset;
        let [r, g, b] = match tile.interactable {
            Some(interactable) if in_marker => interactable_color(interactable),
            _ => tile_color(tile),
        };
        Rgba([r, g, b, 0xff])
    })
}

/// Render `grid` and save it as a PNG, creating parent directories
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(grid: &Grid, scale: u32, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| file_system(parent, "create directory", e))?;
    }

    render_grid(grid, scale)
        .save(output_path)
        .map_err(|e| GenerationError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
