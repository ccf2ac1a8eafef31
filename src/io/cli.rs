//! Command-line interface for batch map generation over a seed range

use crate::algorithm::labeler::{BiomeDefinition, ExpansionMode};
use crate::algorithm::pipeline::{PipelineConfig, PipelineOutput, run_pipeline};
use crate::io::configuration::{
    DEFAULT_SEED, IMAGE_TILE_SCALE, OUTPUT_PREFIX, load_pipeline_config,
};
use crate::io::error::{ErrorKind, Result, file_system};
use crate::io::image::export_grid_as_png;
use crate::io::progress::ProgressManager;
use crate::io::report::MapReport;
use crate::spatial::grid::Biome;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info};

/// Neighbourhood choice on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExpansionArg {
    /// Four cardinal neighbours
    Cardinal,
    /// All eight neighbours
    All,
}

impl From<ExpansionArg> for ExpansionMode {
    fn from(arg: ExpansionArg) -> Self {
        match arg {
            ExpansionArg::Cardinal => Self::Cardinal,
            ExpansionArg::All => Self::All,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "castlegen")]
#[command(
    author,
    version,
    about = "Generate seed-reproducible dungeon maps: carve, label biomes, place spawns"
)]
/// Command-line arguments for the map generator
// Output toggles are independent user choices
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// JSON pipeline configuration; flags below override its values
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// First seed of the batch
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of consecutive seeds to generate
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: u64,

    /// Grid width
    #[arg(short = 'W', long)]
    pub width: Option<usize>,

    /// Grid height
    #[arg(short = 'H', long)]
    pub height: Option<usize>,

    /// Target floor percentage per section
    #[arg(short = 'p', long)]
    pub percentage: Option<f64>,

    /// Section columns
    #[arg(long)]
    pub sections_x: Option<usize>,

    /// Section rows
    #[arg(long)]
    pub sections_y: Option<usize>,

    /// Keep the outer walls instead of trimming them to VOID
    #[arg(long)]
    pub no_void: bool,

    /// Biome definition as NAME or NAME:CENTERS; repeat for several biomes
    #[arg(
        short,
        long = "biome",
        value_name = "NAME[:CENTERS]",
        value_parser = parse_biome_definition
    )]
    pub biomes: Vec<BiomeDefinition>,

    /// Biome expansion neighbourhood
    #[arg(long, value_enum)]
    pub expansion: Option<ExpansionArg>,

    /// Number of entries
    #[arg(long)]
    pub entries: Option<usize>,

    /// Number of exits
    #[arg(long)]
    pub exits: Option<usize>,

    /// Number of keys
    #[arg(long)]
    pub keys: Option<usize>,

    /// Directory receiving exported files
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,

    /// Export a PNG per map
    #[arg(long)]
    pub png: bool,

    /// Export a JSON statistics report per map
    #[arg(long)]
    pub report: bool,

    /// Suppress the progress bar and informational logs
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet && self.count > 1
    }

    /// Pipeline configuration from the optional file plus flag overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => load_pipeline_config(path)?,
            None => PipelineConfig::default(),
        };

        let carver = &mut config.carver;
        if let Some(width) = self.width {
            carver.width = width;
        }
        if let Some(height) = self.height {
            carver.height = height;
        }
        if let Some(percentage) = self.percentage {
            carver.target_percentage = percentage;
        }
        if let Some(sections_x) = self.sections_x {
            carver.sections_x = sections_x;
        }
        if let Some(sections_y) = self.sections_y {
            carver.sections_y = sections_y;
        }
        if self.no_void {
            carver.apply_void = false;
        }

        if !self.biomes.is_empty() {
            config.biomes.biomes.clone_from(&self.biomes);
        }
        if let Some(expansion) = self.expansion {
            config.biomes.expansion_mode = expansion.into();
        }

        let spawns = &mut config.spawns;
        if let Some(entries) = self.entries {
            spawns.entry_count = entries;
        }
        if let Some(exits) = self.exits {
            spawns.exit_count = exits;
        }
        if let Some(keys) = self.keys {
            spawns.key_count = keys;
        }

        Ok(config)
    }
}

/// Parse `NAME` or `NAME:CENTERS` into a biome definition
///
/// # Errors
///
/// Returns a message if the name is unknown or the count is not a number
pub fn parse_biome_definition(value: &str) -> std::result::Result<BiomeDefinition, String> {
    let (name, count) = match value.split_once(':') {
        Some((name, count)) => (name, count.trim()),
        None => (value, "1"),
    };
    let biome = name.parse::<Biome>().map_err(|e| format!("{e}"))?;
    let center_count = count
        .parse::<usize>()
        .map_err(|e| format!("invalid center count '{count}': {e}"))?;
    Ok(BiomeDefinition::new(biome, center_count))
}

/// Totals of a finished batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Maps generated without error
    pub generated: usize,
    /// Maps whose generation failed
    pub failed: usize,
    /// Maps whose output failed at least one validation pass
    pub invalid: usize,
}

/// Generates one map per seed and exports the requested files
pub struct BatchRunner {
    cli: Cli,
    config: PipelineConfig,
    progress_manager: Option<ProgressManager>,
}

impl BatchRunner {
    /// Resolve the configuration for a batch
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed
    pub fn new(cli: Cli) -> Result<Self> {
        let config = cli.pipeline_config()?;
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);
        Ok(Self {
            cli,
            config,
            progress_manager,
        })
    }

    /// Resolved pipeline configuration
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every seed of the batch
    ///
    /// Generation errors are logged and counted so the rest of the batch
    /// still runs; a single-map batch returns its error instead.
    ///
    /// # Errors
    ///
    /// Returns an error if an export fails, or if a single-map batch fails
    pub fn run(&mut self) -> Result<BatchSummary> {
        let started = Instant::now();
        let mut summary = BatchSummary::default();

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(self.cli.count as usize);
        }

        for seed in self.cli.seed..self.cli.seed.saturating_add(self.cli.count) {
            if let Some(ref pm) = self.progress_manager {
                pm.start_map(seed);
            }

            let config = self.config.clone().with_seed(seed);
            let outcome = run_pipeline(&config);
            if let Some(ref mut pm) = self.progress_manager {
                pm.complete_map(outcome.is_ok());
            }

            match outcome {
                Ok(output) => {
                    summary.generated += 1;
                    if !Self::is_valid(&output) {
                        summary.invalid += 1;
                    }
                    self.export(seed, &config, &output)?;
                }
                Err(e) if self.cli.count > 1 && e.kind() != ErrorKind::Io => {
                    error!(seed, kind = ?e.kind(), "{e}");
                    summary.failed += 1;
                }
                Err(e) => return Err(e),
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }
        info!(
            generated = summary.generated,
            failed = summary.failed,
            invalid = summary.invalid,
            elapsed = ?started.elapsed(),
            "Batch complete"
        );
        Ok(summary)
    }

    fn is_valid(output: &PipelineOutput) -> bool {
        output.carve.validation.is_valid()
            && output.biomes.validation.is_valid()
            && output.spawns.validation.is_valid()
    }

    fn export(&self, seed: u64, config: &PipelineConfig, output: &PipelineOutput) -> Result<()> {
        if !self.cli.png && !self.cli.report {
            return Ok(());
        }
        std::fs::create_dir_all(&self.cli.output)
            .map_err(|e| file_system(&self.cli.output, "create directory", e))?;

        if self.cli.png {
            let path = Self::output_path(&self.cli.output, seed, "png");
            export_grid_as_png(&output.spawns.grid, IMAGE_TILE_SCALE, &path)?;
            info!(path = %path.display(), "Exported map image");
        }
        if self.cli.report {
            let path = Self::output_path(&self.cli.output, seed, "json");
            MapReport::new(config, output).write(&path)?;
            info!(path = %path.display(), "Exported map report");
        }
        Ok(())
    }

    /// Output file for `seed` with the given extension
    pub fn output_path(directory: &Path, seed: u64, extension: &str) -> PathBuf {
        directory.join(format!("{OUTPUT_PREFIX}{seed}.{extension}"))
    }
}
