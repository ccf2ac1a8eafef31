//! Carver, labeler and placer chained with a deep copy at each hand-off

use crate::algorithm::carver::{CarveResult, CarverConfig, carve};
use crate::algorithm::labeler::{BiomeConfig, BiomeResult, label_biomes};
use crate::algorithm::placement::{SpawnConfig, SpawnResult, place_spawn_points};
use crate::io::error::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Configuration of all three stages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Topology carver parameters
    pub carver: CarverConfig,
    /// Biome labeler parameters
    pub biomes: BiomeConfig,
    /// Spawn point placer parameters
    pub spawns: SpawnConfig,
}

impl PipelineConfig {
    /// Same configuration with every stage seeded from `seed`
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.carver.seed = seed;
        self.biomes.seed = seed;
        self.spawns.seed = seed;
        self
    }
}

/// Every stage result of one pipeline run
///
/// Each stage owns its own grid, so earlier results stay untouched by
/// later stages.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Topology carver result
    pub carve: CarveResult,
    /// Biome labeler result
    pub biomes: BiomeResult,
    /// Spawn point placer result
    pub spawns: SpawnResult,
}

/// Run carver, labeler and placer in sequence
///
/// # Errors
///
/// Returns the first stage error encountered
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineOutput> {
    let carve = carve(&config.carver)?;
    let biomes = label_biomes(carve.grid.clone(), &config.biomes)?;
    let spawns = place_spawn_points(biomes.grid.clone(), &config.spawns)?;

    info!(
        seed = config.carver.seed,
        floor_tiles = carve.stats.floor_tiles,
        cycles = biomes.stats.total_cycles,
        keys = spawns.keys.len(),
        "Pipeline complete"
    );

    Ok(PipelineOutput {
        carve,
        biomes,
        spawns,
    })
}
