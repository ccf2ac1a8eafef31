//! Topology carver: constrained random-walk mining of a WALL grid
//!
//! Each section gets one miner that starts on a random interior cell and
//! walks the four cardinal directions. Adjacent breakable walls and adjacent
//! floors both become weighted move candidates; the walk stops once the
//! section's floor target is met or no candidate remains.

use crate::algorithm::cache::BreakabilityCache;
use crate::algorithm::rules::{can_break_wall, determine_action};
use crate::algorithm::trimming::apply_void_to_edges;
use crate::analysis::statistics::{CarveStats, SectionOutcome};
use crate::analysis::validation::{ValidationReport, validate_topology};
use crate::io::configuration::{
    ALLOWED_MAX_PERCENT, BACKTRACK_LIMIT_PER_TILE, DEFAULT_BACKTRACK_WEIGHT,
    DEFAULT_BREAK_WALL_WEIGHT, DEFAULT_HEIGHT, DEFAULT_SEED, DEFAULT_TARGET_PERCENTAGE,
    DEFAULT_WIDTH, MATHEMATICAL_MIN_SIZE, MIN_SECTION_SIZE, RECOMMENDED_MAX_PERCENT,
    RECOMMENDED_MIN_SIZE, RECOMMENDED_SECTION_SIZE,
};
use crate::io::error::{GenerationError, Result, invalid_parameter};
use crate::math::random::SeededRandom;
use crate::spatial::grid::{Grid, TileType};
use crate::spatial::position::{CARDINAL_DIRECTIONS, Direction, Position};
use crate::spatial::section::{Section, create_sections};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// What the miner did on a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MiningAction {
    /// Converted a WALL into FLOOR
    Break,
    /// Moved onto existing FLOOR
    Backtrack,
}

/// One step of the miner's trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathNode {
    /// Cell the miner stands on after the step
    pub position: Position,
    /// Action taken
    pub action: MiningAction,
    /// Index of the section being mined
    pub section: usize,
    /// Time since carving started
    pub elapsed: Duration,
}

/// Carver parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarverConfig {
    /// Grid width
    pub width: usize,
    /// Grid height
    pub height: usize,
    /// Floor share to carve per section, in percent
    pub target_percentage: f64,
    /// Weight of each breakable adjacent wall
    pub break_wall_weight: u32,
    /// Weight of each adjacent floor
    pub backtrack_weight: u32,
    /// Number of section columns
    pub sections_x: usize,
    /// Number of section rows
    pub sections_y: usize,
    /// Whether to trim outer walls into VOID afterwards
    pub apply_void: bool,
    /// RNG seed
    pub seed: u64,
    /// Fixed start cell, honoured only with a single section
    pub starting_pos: Option<Position>,
}

impl Default for CarverConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            target_percentage: DEFAULT_TARGET_PERCENTAGE,
            break_wall_weight: DEFAULT_BREAK_WALL_WEIGHT,
            backtrack_weight: DEFAULT_BACKTRACK_WEIGHT,
            sections_x: 1,
            sections_y: 1,
            apply_void: true,
            seed: DEFAULT_SEED,
            starting_pos: None,
        }
    }
}

impl CarverConfig {
    /// Whether more than one section is configured
    pub const fn is_sectioned(&self) -> bool {
        self.sections_x > 1 || self.sections_y > 1
    }

    /// Check hard constraints and log soft ones
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either dimension is below the mathematical minimum
    /// - The target percentage is outside `(0, 100]` or above the allowed maximum
    /// - A move weight is zero
    /// - Section counts are zero, exceed the grid, or yield undersized sections
    /// - The starting position is out of bounds or on the border
    pub fn validate(&self) -> Result<()> {
        if self.width < MATHEMATICAL_MIN_SIZE || self.height < MATHEMATICAL_MIN_SIZE {
            return Err(invalid_parameter(
                "width/height",
                &format!("{}x{}", self.width, self.height),
                &format!(
                    "grid size must be at least {MATHEMATICAL_MIN_SIZE}x{MATHEMATICAL_MIN_SIZE}"
                ),
            ));
        }
        if self.width < RECOMMENDED_MIN_SIZE || self.height < RECOMMENDED_MIN_SIZE {
            warn!(
                width = self.width,
                height = self.height,
                "Grid size is below recommended minimum of {RECOMMENDED_MIN_SIZE}x{RECOMMENDED_MIN_SIZE}"
            );
        }

        if !(self.target_percentage > 0.0 && self.target_percentage <= 100.0) {
            return Err(invalid_parameter(
                "target_percentage",
                &self.target_percentage,
                &"must be between 0 (exclusive) and 100",
            ));
        }
        if self.target_percentage > ALLOWED_MAX_PERCENT {
            return Err(invalid_parameter(
                "target_percentage",
                &self.target_percentage,
                &format!("exceeds allowed maximum of {ALLOWED_MAX_PERCENT}%"),
            ));
        }
        if self.target_percentage > RECOMMENDED_MAX_PERCENT {
            warn!(
                target_percentage = self.target_percentage,
                "Target percentage exceeds recommended maximum of {RECOMMENDED_MAX_PERCENT}%"
            );
        }

        if self.break_wall_weight == 0 {
            return Err(invalid_parameter(
                "break_wall_weight",
                &self.break_wall_weight,
                &"must be greater than 0",
            ));
        }
        if self.backtrack_weight == 0 {
            return Err(invalid_parameter(
                "backtrack_weight",
                &self.backtrack_weight,
                &"must be greater than 0",
            ));
        }

        self.validate_sections()?;
        self.validate_starting_pos()
    }

    fn validate_sections(&self) -> Result<()> {
        let layout = format!("{}x{}", self.sections_x, self.sections_y);
        if self.sections_x < 1 || self.sections_y < 1 {
            return Err(invalid_parameter(
                "sections",
                &layout,
                &"section counts must be at least 1",
            ));
        }
        if self.sections_x > self.width || self.sections_y > self.height {
            return Err(invalid_parameter(
                "sections",
                &layout,
                &format!(
                    "cannot have more sections than grid dimensions {}x{}",
                    self.width, self.height
                ),
            ));
        }

        let section_width = self.width / self.sections_x;
        let section_height = self.height / self.sections_y;
        let min_section_size = section_width.min(section_height);
        if min_section_size < MIN_SECTION_SIZE {
            return Err(invalid_parameter(
                "sections",
                &layout,
                &format!(
                    "section size {section_width}x{section_height} is below the minimum \
                     {MIN_SECTION_SIZE}x{MIN_SECTION_SIZE}; reduce section count or increase grid size"
                ),
            ));
        }
        if min_section_size < RECOMMENDED_SECTION_SIZE {
            warn!(
                section_width,
                section_height,
                "Section size is below recommended {RECOMMENDED_SECTION_SIZE}x{RECOMMENDED_SECTION_SIZE}"
            );
        }
        Ok(())
    }

    fn validate_starting_pos(&self) -> Result<()> {
        let Some(start) = self.starting_pos else {
            return Ok(());
        };

        let (width, height) = (self.width as i32, self.height as i32);
        if start.x < 0 || start.y < 0 || start.x >= width || start.y >= height {
            return Err(invalid_parameter(
                "starting_pos",
                &start,
                &format!("out of bounds for grid size {width}x{height}"),
            ));
        }
        if start.x == 0 || start.y == 0 || start.x == width - 1 || start.y == height - 1 {
            return Err(invalid_parameter(
                "starting_pos",
                &start,
                &"cannot be on the grid border",
            ));
        }
        if self.is_sectioned() {
            warn!(
                %start,
                "Starting position is ignored when using multiple sections"
            );
        }
        Ok(())
    }
}

/// Output of a carve run
#[derive(Debug, Clone)]
pub struct CarveResult {
    /// Carved grid
    pub grid: Grid,
    /// Ordered miner trace across all sections
    pub path: Vec<PathNode>,
    /// Composition, action and timing statistics
    pub stats: CarveStats,
    /// Post-validation of the topology invariants
    pub validation: ValidationReport,
}

/// Weighted move candidates from one miner position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveCandidates {
    /// `(direction, weight)` pairs in evaluation order
    pub entries: Vec<(Direction, u32)>,
    /// Sum of all weights, wide enough for four maximal `u32` weights
    pub total: u64,
}

impl MoveCandidates {
    fn push(&mut self, direction: Direction, weight: u32) {
        self.entries.push((direction, weight));
        self.total += u64::from(weight);
    }

    /// Whether no move is possible
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Draw one direction with probability proportional to its weight
    ///
    /// Equivalent to a uniform pick over a list holding each direction
    /// `weight` times, and consumes exactly one draw when non-empty.
    pub fn pick(&self, rng: &mut SeededRandom) -> Option<Direction> {
        if self.is_empty() {
            return None;
        }
        let mut index = rng.next_index(self.total as usize) as u64;
        for &(direction, weight) in &self.entries {
            let weight = u64::from(weight);
            if index < weight {
                return Some(direction);
            }
            index -= weight;
        }
        None
    }
}

/// Legality of breaking from `miner` into `target`, consulting the cache first
pub fn can_break_wall_cached(
    grid: &Grid,
    miner: Position,
    target: Position,
    cache: &mut BreakabilityCache,
) -> bool {
    if !grid.contains(target) {
        return false;
    }
    cache.check_or_compute(miner, target, || can_break_wall(grid, target))
}

/// Collect weighted move candidates for a miner confined to `section`
pub fn weighted_moves(
    grid: &Grid,
    miner: Position,
    config: &CarverConfig,
    cache: &mut BreakabilityCache,
    section: &Section,
) -> MoveCandidates {
    let mut candidates = MoveCandidates::default();

    for direction in CARDINAL_DIRECTIONS {
        let target = miner.step(direction);
        if !section.contains(target) {
            continue;
        }
        match grid.tile_type(target) {
            Some(TileType::Wall) => {
                if can_break_wall_cached(grid, miner, target, cache) {
                    candidates.push(direction, config.break_wall_weight);
                }
            }
            Some(TileType::Floor) => candidates.push(direction, config.backtrack_weight),
            Some(TileType::Void) | None => {}
        }
    }

    candidates
}

/// Refresh the cache around a freshly carved floor cell
///
/// Adjacent walls that cannot be broken are flagged; if none of them can,
/// the new floor itself is flagged as exhausted.
pub fn update_cache_after_break(grid: &Grid, new_floor: Position, cache: &mut BreakabilityCache) {
    let mut blocks_all_adjacent = true;

    for neighbor in new_floor.neighbors(&CARDINAL_DIRECTIONS) {
        if grid.is(neighbor, TileType::Wall) {
            if can_break_wall(grid, neighbor) {
                blocks_all_adjacent = false;
            } else {
                cache.mark_unbreakable(neighbor);
            }
        }
    }

    if blocks_all_adjacent {
        cache.mark_exhausted(new_floor);
    }
}

/// Carve a new grid, seeding the RNG from `config.seed`
///
/// # Errors
///
/// Returns an error if the configuration is invalid, or if single-section
/// carving runs out of moves before reaching its target
pub fn carve(config: &CarverConfig) -> Result<CarveResult> {
    let mut rng = SeededRandom::new(config.seed);
    carve_with_rng(config, &mut rng)
}

/// Carve a new grid drawing from a caller-owned RNG
///
/// # Errors
///
/// Returns an error if the configuration is invalid, or if single-section
/// carving runs out of moves before reaching its target
pub fn carve_with_rng(config: &CarverConfig, rng: &mut SeededRandom) -> Result<CarveResult> {
    config.validate()?;

    let sections = create_sections(
        config.width,
        config.height,
        config.sections_x,
        config.sections_y,
        config.target_percentage,
    );
    let fixed_start = if config.is_sectioned() {
        None
    } else {
        config.starting_pos
    };

    let mut miner = Miner::new(config);
    let mut outcomes = Vec::with_capacity(sections.len());
    for (index, section) in sections.into_iter().enumerate() {
        let outcome = miner.carve_section(rng, index, section, fixed_start)?;
        outcomes.push(outcome);
    }
    let elapsed = miner.started.elapsed();

    let Miner {
        mut grid,
        cache,
        path,
        ..
    } = miner;

    let floor_total: usize = outcomes.iter().map(|outcome| outcome.floor_count).sum();
    info!(floor_total, steps = path.len(), "Carving complete");

    if config.apply_void {
        let voided = apply_void_to_edges(&mut grid);
        debug!(voided, "Trimmed unreachable walls to VOID");
    }

    let start_position = path.first().map_or_else(Position::default, |node| node.position);
    let stats = CarveStats::compute(&grid, &path, elapsed, start_position, outcomes, cache.stats);
    let validation = validate_topology(&grid);

    Ok(CarveResult {
        grid,
        path,
        stats,
        validation,
    })
}

/// Mutable state of one carve run
struct Miner<'c> {
    config: &'c CarverConfig,
    grid: Grid,
    cache: BreakabilityCache,
    path: Vec<PathNode>,
    started: Instant,
}

impl<'c> Miner<'c> {
    fn new(config: &'c CarverConfig) -> Self {
        Self {
            config,
            grid: Grid::new(config.width, config.height, TileType::Wall),
            cache: BreakabilityCache::new(config.width, config.height),
            path: Vec::new(),
            started: Instant::now(),
        }
    }

    fn record(&mut self, position: Position, action: MiningAction, section: usize) {
        self.path.push(PathNode {
            position,
            action,
            section,
            elapsed: self.started.elapsed(),
        });
    }

    fn break_wall(&mut self, position: Position) {
        self.grid.set_type(position, TileType::Floor);
        update_cache_after_break(&self.grid, position, &mut self.cache);
    }

    // Redraws until the cell is off the grid border; sections are at least
    // MIN_SECTION_SIZE wide so an interior cell always exists.
    fn random_start(&self, rng: &mut SeededRandom, section: &Section) -> Position {
        loop {
            let x = rng.next_int(i64::from(section.min_x), i64::from(section.max_x) + 1) as i32;
            let y = rng.next_int(i64::from(section.min_y), i64::from(section.max_y) + 1) as i32;
            let candidate = Position::new(x, y);
            if !self.grid.is_border(candidate) {
                return candidate;
            }
        }
    }

    fn carve_section(
        &mut self,
        rng: &mut SeededRandom,
        index: usize,
        section: Section,
        fixed_start: Option<Position>,
    ) -> Result<SectionOutcome> {
        let start = match fixed_start {
            Some(start) => start,
            None => self.random_start(rng, &section),
        };

        let mut floor_count = 0;
        if self.grid.is(start, TileType::Wall) {
            self.break_wall(start);
            floor_count += 1;
        }
        self.record(start, MiningAction::Break, index);

        let mut position = start;
        let mut exhausted = false;
        let stall_limit = self.grid.area().saturating_mul(BACKTRACK_LIMIT_PER_TILE);
        let mut stalled = 0;
        while floor_count < section.target_floor_count {
            let candidates =
                weighted_moves(&self.grid, position, self.config, &mut self.cache, &section);

            // Only backtracks remain once no reachable wall is breakable
            let next = if stalled < stall_limit {
                candidates.pick(rng)
            } else {
                None
            };
            let Some(direction) = next else {
                if !self.config.is_sectioned() {
                    return Err(GenerationError::NoValidMoves {
                        position,
                        floor_count,
                        target: section.target_floor_count,
                    });
                }
                warn!(
                    section = %section,
                    %position,
                    floor_count,
                    target = section.target_floor_count,
                    "No valid moves; moving to next section"
                );
                exhausted = true;
                break;
            };

            let target = position.step(direction);
            let action = determine_action(&self.grid, target)?;
            if action == MiningAction::Break {
                self.break_wall(target);
                floor_count += 1;
                stalled = 0;
            } else {
                stalled += 1;
            }
            position = target;
            self.record(position, action, index);
        }

        info!(
            section = %section,
            floor_count,
            target = section.target_floor_count,
            "Section complete"
        );

        Ok(SectionOutcome {
            section,
            start,
            floor_count,
            exhausted,
        })
    }
}
