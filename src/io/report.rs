//! JSON summary of one generated map

use crate::algorithm::labeler::BiomeCenter;
use crate::algorithm::pipeline::{PipelineConfig, PipelineOutput};
use crate::analysis::statistics::{BiomeStats, CarveStats, SpawnStats};
use crate::io::error::{GenerationError, Result, file_system};
use crate::spatial::position::Position;
use serde::Serialize;
use std::path::Path;

/// Serializable view over a pipeline run
#[derive(Debug, Serialize)]
pub struct MapReport<'a> {
    /// Configuration the map was generated from
    pub config: &'a PipelineConfig,
    /// Carver statistics
    pub carve: &'a CarveStats,
    /// Labeler statistics
    pub biomes: &'a BiomeStats,
    /// Biome centers in seeding order
    pub centers: &'a [BiomeCenter],
    /// Placer statistics
    pub spawns: &'a SpawnStats,
    /// Entry positions
    pub entries: &'a [Position],
    /// Exit positions
    pub exits: &'a [Position],
    /// Key positions
    pub keys: &'a [Position],
    /// Violation messages of every stage, prefixed with the stage name
    pub violations: Vec<String>,
}

impl<'a> MapReport<'a> {
    /// Build a report over `output`
    pub fn new(config: &'a PipelineConfig, output: &'a PipelineOutput) -> Self {
        let violations = [
            ("topology", &output.carve.validation),
            ("biomes", &output.biomes.validation),
            ("placement", &output.spawns.validation),
        ]
        .into_iter()
        .flat_map(|(stage, report)| {
            report
                .violations
                .iter()
                .map(move |violation| format!("{stage}: {violation}"))
        })
        .collect();

        Self {
            config,
            carve: &output.carve.stats,
            biomes: &output.biomes.stats,
            centers: &output.biomes.centers,
            spawns: &output.spawns.stats,
            entries: &output.spawns.entries,
            exits: &output.spawns.exits,
            keys: &output.spawns.keys,
            violations,
        }
    }

    /// Pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(&self, path: &Path) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| GenerationError::ReportExport {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Write the report to `path`, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the file cannot be written
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = self.to_json(path)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| file_system(parent, "create directory", e))?;
        }
        std::fs::write(path, json).map_err(|e| file_system(path, "write report", e))
    }
}
