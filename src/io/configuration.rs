//! Generation constraints, runtime defaults and configuration file loading

use crate::algorithm::pipeline::PipelineConfig;
use crate::io::error::{GenerationError, Result, file_system};
use std::path::Path;

// Grid constraints
/// Hard minimum grid dimension
pub const MATHEMATICAL_MIN_SIZE: usize = 7;
/// Recommended minimum grid dimension for playable maps
pub const RECOMMENDED_MIN_SIZE: usize = 50;
/// Geometric ceiling of the floor percentage under the no-2x2 rule
pub const MATHEMATICAL_MAX_PERCENT: f64 = 75.0;
/// Hard limit on the target floor percentage
pub const ALLOWED_MAX_PERCENT: f64 = 70.0;
/// Recommended maximum floor percentage
pub const RECOMMENDED_MAX_PERCENT: f64 = 50.0;

// Section constraints
/// Hard minimum section dimension
pub const MIN_SECTION_SIZE: usize = 10;
/// Recommended minimum section dimension
pub const RECOMMENDED_SECTION_SIZE: usize = 50;

/// Consecutive backtracks per grid tile after which a miner counts as stuck
pub const BACKTRACK_LIMIT_PER_TILE: usize = 50;

/// Center count per biome above which a warning is logged
pub const EXCESSIVE_CENTER_COUNT: usize = 100;

/// Number of individual violations written to the log per validation pass
pub const MAX_LOGGED_VIOLATIONS: usize = 10;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Default grid width
pub const DEFAULT_WIDTH: usize = 60;
/// Default grid height
pub const DEFAULT_HEIGHT: usize = 60;
/// Default target floor percentage
pub const DEFAULT_TARGET_PERCENTAGE: f64 = 30.0;
/// Default weight of breaking into an adjacent wall
pub const DEFAULT_BREAK_WALL_WEIGHT: u32 = 5;
/// Default weight of stepping back onto floor
pub const DEFAULT_BACKTRACK_WEIGHT: u32 = 1;
/// Default chance that a biome front claims a FLOOR tile per attempt
pub const DEFAULT_FLOOR_CONVERSION_CHANCE: f64 = 0.7;
/// Default chance that a biome front claims a WALL tile per attempt
pub const DEFAULT_WALL_CONVERSION_CHANCE: f64 = 0.5;
/// Default number of entries
pub const DEFAULT_ENTRY_COUNT: usize = 1;
/// Default number of exits
pub const DEFAULT_EXIT_COUNT: usize = 1;
/// Default number of keys
pub const DEFAULT_KEY_COUNT: usize = 1;

// Output settings
/// Pixels per tile in exported images
pub const IMAGE_TILE_SCALE: u32 = 8;
/// File stem prefix for exported maps
pub const OUTPUT_PREFIX: &str = "map_";

/// Theoretical maximum floor percentage for a grid under the no-2x2 rule
///
/// Assumes a full border ring and the densest legal interior pattern:
/// alternating fully open rows and rows open on every other column.
pub fn calculate_max_percentage(width: usize, height: usize) -> f64 {
    let inner_width = width.saturating_sub(2);
    let inner_height = height.saturating_sub(2);

    let odd_rows = inner_height.div_ceil(2);
    let even_rows = inner_height / 2;
    let odd_cols = inner_width.div_ceil(2);

    let max_floor_tiles = odd_rows * inner_width + even_rows * odd_cols;
    let total_tiles = width * height;
    if total_tiles == 0 {
        return 0.0;
    }
    max_floor_tiles as f64 / total_tiles as f64 * 100.0
}

/// Load a pipeline configuration from a JSON file
///
/// Missing fields fall back to their defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid JSON
pub fn load_pipeline_config(path: &Path) -> Result<PipelineConfig> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| file_system(path, "read configuration", e))?;
    serde_json::from_str(&contents).map_err(|e| GenerationError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}
