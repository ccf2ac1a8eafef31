//! Biome labeler: probabilistic multi-front wavefront expansion
//!
//! Every biome center seeds its own front. Fronts advance in synchronized
//! cycles, each draining its current queue in definition order; a tile that
//! loses its conversion roll is retried on the next cycle, and a tile that
//! wins is labeled and pushes all its neighbours forward. Earlier fronts win
//! contested tiles within a cycle.

use crate::analysis::statistics::BiomeStats;
use crate::analysis::validation::{ValidationReport, validate_biomes};
use crate::io::configuration::{
    DEFAULT_FLOOR_CONVERSION_CHANCE, DEFAULT_SEED, DEFAULT_WALL_CONVERSION_CHANCE,
    EXCESSIVE_CENTER_COUNT,
};
use crate::io::error::{GenerationError, Result, invalid_parameter};
use crate::math::random::SeededRandom;
use crate::spatial::grid::{Biome, Grid, TileType};
use crate::spatial::position::{ALL_DIRECTIONS, CARDINAL_DIRECTIONS, Direction, Position};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Number of centers to seed for one biome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiomeDefinition {
    /// Biome label
    pub biome: Biome,
    /// Centers to seed
    pub center_count: usize,
}

impl BiomeDefinition {
    /// Create a definition
    pub const fn new(biome: Biome, center_count: usize) -> Self {
        Self {
            biome,
            center_count,
        }
    }
}

/// Neighbourhood a converted tile pushes forward
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpansionMode {
    /// Four cardinal neighbours
    #[default]
    Cardinal,
    /// All eight neighbours
    All,
}

impl ExpansionMode {
    /// Direction table in enqueue order
    pub const fn directions(self) -> &'static [Direction] {
        match self {
            Self::Cardinal => &CARDINAL_DIRECTIONS,
            Self::All => &ALL_DIRECTIONS,
        }
    }
}

/// Labeler parameters
///
/// A conversion chance of exactly zero is accepted but never converges for
/// that tile kind; callers must keep both chances above zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeConfig {
    /// Biomes to seed, in priority order
    pub biomes: Vec<BiomeDefinition>,
    /// Chance a front claims a FLOOR tile per attempt
    pub floor_conversion_chance: f64,
    /// Chance a front claims a WALL tile per attempt
    pub wall_conversion_chance: f64,
    /// Neighbourhood used for expansion
    pub expansion_mode: ExpansionMode,
    /// RNG seed
    pub seed: u64,
}

impl Default for BiomeConfig {
    fn default() -> Self {
        Self {
            biomes: Biome::ALL
                .into_iter()
                .map(|biome| BiomeDefinition::new(biome, 1))
                .collect(),
            floor_conversion_chance: DEFAULT_FLOOR_CONVERSION_CHANCE,
            wall_conversion_chance: DEFAULT_WALL_CONVERSION_CHANCE,
            expansion_mode: ExpansionMode::default(),
            seed: DEFAULT_SEED,
        }
    }
}

impl BiomeConfig {
    /// Total centers across all definitions
    pub fn total_centers(&self) -> usize {
        self.biomes
            .iter()
            .map(|definition| definition.center_count)
            .sum()
    }

    /// Check the configuration against the grid about to be labeled
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No biome is defined, or a biome is defined twice
    /// - A conversion chance lies outside `[0, 1]`
    /// - A biome asks for zero centers
    /// - The grid already carries biome labels
    pub fn validate(&self, grid: &Grid) -> Result<()> {
        if self.biomes.is_empty() {
            return Err(invalid_parameter(
                "biomes",
                &0,
                &"at least one biome must be specified",
            ));
        }

        let mut seen = HashSet::new();
        for definition in &self.biomes {
            if !seen.insert(definition.biome) {
                return Err(invalid_parameter(
                    "biomes",
                    &definition.biome,
                    &"duplicate biome type; each biome may appear only once",
                ));
            }
        }

        for (parameter, chance) in [
            ("floor_conversion_chance", self.floor_conversion_chance),
            ("wall_conversion_chance", self.wall_conversion_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(invalid_parameter(
                    parameter,
                    &chance,
                    &"must be between 0 and 1",
                ));
            }
        }

        for definition in &self.biomes {
            if definition.center_count < 1 {
                return Err(invalid_parameter(
                    "center_count",
                    &definition.center_count,
                    &format!("biome {} must have at least 1 center", definition.biome),
                ));
            }
            if definition.center_count > EXCESSIVE_CENTER_COUNT {
                warn!(
                    biome = %definition.biome,
                    centers = definition.center_count,
                    "Biome center count may be excessive"
                );
            }
        }

        let labeled = grid.labeled_count();
        if labeled > 0 {
            return Err(invalid_parameter(
                "grid",
                &labeled,
                &"grid already has biome labels; supply an unlabeled copy",
            ));
        }

        info!(
            centers = self.total_centers(),
            biomes = self.biomes.len(),
            "Biome labeling configured"
        );
        Ok(())
    }
}

/// Outcome of one conversion attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BiomeAction {
    /// The tile took the front's biome
    Convert,
    /// The roll failed; the tile is retried next cycle
    Skip,
}

/// One conversion attempt in the labeling trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BiomePathNode {
    /// Tile attempted
    pub position: Position,
    /// Biome of the attempting front
    pub biome: Biome,
    /// Outcome
    pub action: BiomeAction,
    /// Cycle number, starting at 1
    pub cycle: usize,
    /// Global attempt number, starting at 0
    pub step: usize,
    /// Time since labeling started
    pub elapsed: Duration,
}

/// A biome center chosen during seeding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BiomeCenter {
    /// Biome seeded
    pub biome: Biome,
    /// Center tile
    pub position: Position,
}

/// Output of a labeling run
#[derive(Debug, Clone)]
pub struct BiomeResult {
    /// Labeled grid
    pub grid: Grid,
    /// Ordered attempt trace
    pub path: Vec<BiomePathNode>,
    /// Coverage and attempt statistics
    pub stats: BiomeStats,
    /// Centers in seeding order
    pub centers: Vec<BiomeCenter>,
    /// Post-validation of full coverage
    pub validation: ValidationReport,
}

/// Insertion-ordered set of positions awaiting the next cycle
#[derive(Debug, Clone, Default)]
struct FrontierSet {
    order: Vec<Position>,
    members: HashSet<Position>,
}

impl FrontierSet {
    fn insert(&mut self, pos: Position) {
        if self.members.insert(pos) {
            self.order.push(pos);
        }
    }

    fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn drain(&mut self) -> VecDeque<Position> {
        self.members.clear();
        std::mem::take(&mut self.order).into()
    }
}

/// Expansion state of a single center
#[derive(Debug, Clone)]
struct Front {
    biome: Biome,
    current: VecDeque<Position>,
    next: FrontierSet,
}

impl Front {
    fn new(center: BiomeCenter) -> Self {
        Self {
            biome: center.biome,
            current: VecDeque::from([center.position]),
            next: FrontierSet::default(),
        }
    }

    fn has_work(&self) -> bool {
        !self.current.is_empty() || !self.next.is_empty()
    }
}

/// Label a grid, seeding the RNG from `config.seed`
///
/// # Errors
///
/// Returns an error if the configuration is invalid for this grid, or if the
/// grid has fewer FLOOR tiles than requested centers
pub fn label_biomes(grid: Grid, config: &BiomeConfig) -> Result<BiomeResult> {
    let mut rng = SeededRandom::new(config.seed);
    label_biomes_with_rng(grid, config, &mut rng)
}

/// Label a grid drawing from a caller-owned RNG
///
/// # Errors
///
/// Returns an error if the configuration is invalid for this grid, or if the
/// grid has fewer FLOOR tiles than requested centers
pub fn label_biomes_with_rng(
    mut grid: Grid,
    config: &BiomeConfig,
    rng: &mut SeededRandom,
) -> Result<BiomeResult> {
    config.validate(&grid)?;

    let needed = config.total_centers();
    let found = grid.count(TileType::Floor);
    if found < needed {
        return Err(GenerationError::InsufficientFloorTiles { needed, found });
    }

    let started = Instant::now();
    let centers = choose_centers(&grid, &config.biomes, rng);
    let mut fronts: Vec<Front> = centers.iter().copied().map(Front::new).collect();
    let directions = config.expansion_mode.directions();

    let mut path = Vec::new();
    let mut cycle = 0;
    while fronts.iter().any(Front::has_work) {
        cycle += 1;
        for front in &mut fronts {
            while let Some(position) = front.current.pop_front() {
                let Some(tile) = grid.tile_mut(position) else {
                    continue;
                };
                if tile.kind == TileType::Void || tile.biome.is_some() {
                    continue;
                }

                let chance = if tile.kind == TileType::Floor {
                    config.floor_conversion_chance
                } else {
                    config.wall_conversion_chance
                };

                let action = if rng.next() < chance {
                    tile.biome = Some(front.biome);
                    for neighbor in position.neighbors(directions) {
                        front.next.insert(neighbor);
                    }
                    BiomeAction::Convert
                } else {
                    front.next.insert(position);
                    BiomeAction::Skip
                };

                path.push(BiomePathNode {
                    position,
                    biome: front.biome,
                    action,
                    cycle,
                    step: path.len(),
                    elapsed: started.elapsed(),
                });
            }
            front.current = front.next.drain();
        }
    }

    let elapsed = started.elapsed();
    info!(cycles = cycle, attempts = path.len(), "Biome labeling complete");

    let validation = validate_biomes(&grid);
    let stats = BiomeStats::compute(&grid, &config.biomes, &path, cycle, needed, elapsed);

    Ok(BiomeResult {
        grid,
        path,
        stats,
        centers,
        validation,
    })
}

/// Draw distinct FLOOR centers for every definition in order
///
/// Each definition shuffles the FLOOR tiles not yet taken, in row-major
/// order, and claims the first `center_count`. The caller has already
/// checked that enough FLOOR tiles exist.
fn choose_centers(
    grid: &Grid,
    definitions: &[BiomeDefinition],
    rng: &mut SeededRandom,
) -> Vec<BiomeCenter> {
    let mut used = HashSet::new();
    let mut centers = Vec::new();

    for definition in definitions {
        let mut candidates: Vec<Position> = grid
            .positions_of(TileType::Floor)
            .into_iter()
            .filter(|pos| !used.contains(pos))
            .collect();
        rng.shuffle(&mut candidates);

        for position in candidates.into_iter().take(definition.center_count) {
            used.insert(position);
            centers.push(BiomeCenter {
                biome: definition.biome,
                position,
            });
        }
        debug!(biome = %definition.biome, centers = definition.center_count, "Seeded biome centers");
    }

    centers
}
