//! Summary statistics attached to every stage result
//!
//! All figures except the elapsed times are pure functions of the output
//! grid and trace, so they reproduce exactly for a given seed.

use crate::algorithm::cache::CacheStats;
use crate::algorithm::carver::{MiningAction, PathNode};
use crate::algorithm::connectivity::ConnectivityMap;
use crate::algorithm::labeler::{BiomeAction, BiomeDefinition, BiomePathNode};
use crate::spatial::grid::{Biome, Grid, TileType};
use crate::spatial::position::Position;
use crate::spatial::section::Section;
use serde::Serialize;
use std::time::Duration;

/// How a single section of the carve ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionOutcome {
    /// Section bounds and target
    pub section: Section,
    /// Cell the miner started on
    pub start: Position,
    /// Floor tiles carved inside this section's walk
    pub floor_count: usize,
    /// Whether the miner ran out of moves before reaching the target
    pub exhausted: bool,
}

/// Topology carver statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarveStats {
    /// Width times height
    pub total_tiles: usize,
    /// FLOOR tiles in the final grid
    pub floor_tiles: usize,
    /// WALL tiles in the final grid
    pub wall_tiles: usize,
    /// VOID tiles in the final grid
    pub void_tiles: usize,
    /// Path length
    pub total_steps: usize,
    /// Steps that broke a wall
    pub break_actions: usize,
    /// Steps onto existing floor
    pub backtrack_actions: usize,
    /// Wall-clock time of the carve loop
    pub execution_time: Duration,
    /// Mean time per path step
    pub avg_step_time: Duration,
    /// First position of the path
    pub start_position: Position,
    /// FLOOR share of the whole grid, in percent
    pub final_percentage: f64,
    /// Outcome of each section in mining order
    pub sections: Vec<SectionOutcome>,
    /// Breakability cache counters
    pub cache: CacheStats,
}

impl CarveStats {
    /// Derive statistics from a finished carve
    pub fn compute(
        grid: &Grid,
        path: &[PathNode],
        execution_time: Duration,
        start_position: Position,
        sections: Vec<SectionOutcome>,
        cache: CacheStats,
    ) -> Self {
        let total_tiles = grid.area();
        let floor_tiles = grid.count(TileType::Floor);
        let break_actions = path
            .iter()
            .filter(|node| node.action == MiningAction::Break)
            .count();

        let avg_step_time = u32::try_from(path.len())
            .ok()
            .filter(|&steps| steps > 0)
            .map_or(Duration::ZERO, |steps| execution_time / steps);

        Self {
            total_tiles,
            floor_tiles,
            wall_tiles: grid.count(TileType::Wall),
            void_tiles: grid.count(TileType::Void),
            total_steps: path.len(),
            break_actions,
            backtrack_actions: path.len() - break_actions,
            execution_time,
            avg_step_time,
            start_position,
            final_percentage: percentage(floor_tiles, total_tiles),
            sections,
            cache,
        }
    }
}

/// Share of non-VOID tiles held by one biome
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BiomeCoverage {
    /// Biome
    pub biome: Biome,
    /// Tiles labeled with it
    pub tiles: usize,
    /// Percentage of non-VOID tiles
    pub percentage: f64,
}

/// Biome labeler statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiomeStats {
    /// Coverage per configured biome, in definition order
    pub coverage: Vec<BiomeCoverage>,
    /// Centers seeded across all biomes
    pub total_centers: usize,
    /// Non-VOID tiles carrying a biome
    pub tiles_with_biome: usize,
    /// Non-VOID tiles left unlabeled
    pub tiles_without_biome: usize,
    /// CONVERT plus SKIP entries in the trace
    pub conversion_attempts: usize,
    /// CONVERT entries in the trace
    pub successful_conversions: usize,
    /// SKIP entries in the trace
    pub skipped_tiles: usize,
    /// Number of expansion cycles run
    pub total_cycles: usize,
    /// Wall-clock time of the labeling run
    pub execution_time: Duration,
}

impl BiomeStats {
    /// Derive statistics from a finished labeling run
    pub fn compute(
        grid: &Grid,
        definitions: &[BiomeDefinition],
        path: &[BiomePathNode],
        total_cycles: usize,
        total_centers: usize,
        execution_time: Duration,
    ) -> Self {
        let mut tiles_with_biome = 0;
        let mut tiles_without_biome = 0;
        let mut counts = vec![0_usize; definitions.len()];

        for (_, tile) in grid.iter().filter(|(_, tile)| tile.kind != TileType::Void) {
            match tile.biome {
                Some(biome) => {
                    tiles_with_biome += 1;
                    let slot = definitions
                        .iter()
                        .position(|definition| definition.biome == biome)
                        .and_then(|index| counts.get_mut(index));
                    if let Some(count) = slot {
                        *count += 1;
                    }
                }
                None => tiles_without_biome += 1,
            }
        }

        let non_void = tiles_with_biome + tiles_without_biome;
        let coverage = definitions
            .iter()
            .zip(counts)
            .map(|(definition, tiles)| BiomeCoverage {
                biome: definition.biome,
                tiles,
                percentage: percentage(tiles, non_void),
            })
            .collect();

        let successful_conversions = path
            .iter()
            .filter(|node| node.action == BiomeAction::Convert)
            .count();

        Self {
            coverage,
            total_centers,
            tiles_with_biome,
            tiles_without_biome,
            conversion_attempts: path.len(),
            successful_conversions,
            skipped_tiles: path.len() - successful_conversions,
            total_cycles,
            execution_time,
        }
    }

    /// Coverage entry for `biome`, if it was configured
    pub fn coverage_of(&self, biome: Biome) -> Option<&BiomeCoverage> {
        self.coverage.iter().find(|entry| entry.biome == biome)
    }
}

/// Spawn point placer statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpawnStats {
    /// Entries placed
    pub total_entries: usize,
    /// Exits placed
    pub total_exits: usize,
    /// Keys placed
    pub total_keys: usize,
    /// FLOOR tiles with one floor neighbour
    pub c1_tiles: usize,
    /// FLOOR tiles with two floor neighbours
    pub c2_tiles: usize,
    /// FLOOR tiles with three floor neighbours
    pub c3_tiles: usize,
    /// FLOOR tiles with four floor neighbours
    pub c4_tiles: usize,
    /// Exits placed on dead ends
    pub exits_on_c1: usize,
    /// Exits placed on corridor fallback tiles
    pub exits_on_c2: usize,
    /// Entries placed on hubs
    pub entries_on_c4: usize,
    /// Entries placed on junction fallback tiles
    pub entries_on_c3: usize,
    /// Keys drawn from junctions
    pub keys_on_c3: usize,
    /// Keys drawn from corridors
    pub keys_on_c2: usize,
    /// Wall-clock time of the placement run
    pub execution_time: Duration,
}

impl SpawnStats {
    /// Record the size of every connectivity tier
    pub fn with_connectivity(connectivity: &ConnectivityMap) -> Self {
        Self {
            c1_tiles: connectivity.get(1).len(),
            c2_tiles: connectivity.get(2).len(),
            c3_tiles: connectivity.get(3).len(),
            c4_tiles: connectivity.get(4).len(),
            ..Self::default()
        }
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
