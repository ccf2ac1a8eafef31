//! Seed-reproducible dungeon map generation
//!
//! A map is built by three stages that each take ownership of a grid:
//! the topology carver mines FLOOR out of solid WALL, the biome labeler
//! spreads biome regions from random centers, and the spawn point placer
//! puts entries, exits and keys on tiles ranked by connectivity. Identical
//! configuration and seed reproduce identical grids, traces and statistics.

#![forbid(unsafe_code)]

/// Generation stages and their supporting rules
pub mod algorithm;
/// Statistics and post-validation of stage outputs
pub mod analysis;
/// Errors, configuration, logging and file export
pub mod io;
/// Deterministic random number generation
pub mod math;
/// Positions, grids and sections
pub mod spatial;

pub use algorithm::pipeline::{PipelineConfig, PipelineOutput, run_pipeline};
pub use io::error::{GenerationError, Result};
