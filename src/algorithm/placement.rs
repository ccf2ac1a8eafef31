//! Spawn point placer: tiered selection of entries, exits and keys
//!
//! Exits go to dead ends, entries to open hubs and keys to the junction and
//! corridor tiles left over. Each category shuffles its own candidate tiers
//! before consuming them, in the fixed order exits, entries, keys.

use crate::algorithm::connectivity::ConnectivityMap;
use crate::analysis::statistics::SpawnStats;
use crate::analysis::validation::{ValidationReport, validate_placement};
use crate::io::configuration::{
    DEFAULT_ENTRY_COUNT, DEFAULT_EXIT_COUNT, DEFAULT_KEY_COUNT, DEFAULT_SEED,
};
use crate::io::error::{GenerationError, Result, invalid_parameter};
use crate::math::random::SeededRandom;
use crate::spatial::grid::{Grid, Interactable};
use crate::spatial::position::Position;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;
use tracing::{info, warn};

/// Placer parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Entries to place
    pub entry_count: usize,
    /// Exits to place
    pub exit_count: usize,
    /// Keys to place
    pub key_count: usize,
    /// RNG seed
    pub seed: u64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            entry_count: DEFAULT_ENTRY_COUNT,
            exit_count: DEFAULT_EXIT_COUNT,
            key_count: DEFAULT_KEY_COUNT,
            seed: DEFAULT_SEED,
        }
    }
}

impl SpawnConfig {
    /// Check counts and log how well the connectivity tiers can serve them
    ///
    /// Tier shortfalls are warnings, never errors, even when no tier can
    /// serve a count at all. Exits and entries degrade to fewer placements
    /// and keys fail during placement itself.
    ///
    /// # Errors
    ///
    /// Returns an error if any count is zero
    pub fn validate(&self, connectivity: &ConnectivityMap) -> Result<()> {
        for (parameter, count) in [
            ("entry_count", self.entry_count),
            ("exit_count", self.exit_count),
            ("key_count", self.key_count),
        ] {
            if count < 1 {
                return Err(invalid_parameter(parameter, &count, &"must be at least 1"));
            }
        }

        let [c1, c2, c3, c4] = [1, 2, 3, 4].map(|degree| connectivity.get(degree).len());
        info!(c1, c2, c3, c4, "Connectivity analysis");

        if c1 + c2 < self.exit_count {
            warn!(
                needed = self.exit_count,
                available = c1 + c2,
                "Not enough isolated tiles (C1+C2) for exits"
            );
        }
        if c4 + c3 < self.entry_count {
            warn!(
                needed = self.entry_count,
                available = c4 + c3,
                "Not enough connected tiles (C4+C3) for entries"
            );
        }
        if c3 + c2 < self.key_count {
            warn!(
                needed = self.key_count,
                available = c3 + c2,
                "Not enough tiles (C3+C2) for keys"
            );
        }
        if self.key_count < self.exit_count {
            warn!(
                keys = self.key_count,
                exits = self.exit_count,
                "Fewer keys than exits; some exits cannot be unlocked"
            );
        }
        Ok(())
    }
}

/// Output of a placement run
#[derive(Debug, Clone)]
pub struct SpawnResult {
    /// Grid with interactables set
    pub grid: Grid,
    /// Entry positions in placement order
    pub entries: Vec<Position>,
    /// Exit positions in placement order
    pub exits: Vec<Position>,
    /// Key positions in placement order
    pub keys: Vec<Position>,
    /// Tier usage statistics
    pub stats: SpawnStats,
    /// Post-validation of the placed markers
    pub validation: ValidationReport,
}

/// Place spawn points, seeding the RNG from `config.seed`
///
/// # Errors
///
/// Returns an error if a count is zero or not every key could be placed
pub fn place_spawn_points(grid: Grid, config: &SpawnConfig) -> Result<SpawnResult> {
    let mut rng = SeededRandom::new(config.seed);
    place_spawn_points_with_rng(grid, config, &mut rng)
}

/// Place spawn points drawing from a caller-owned RNG
///
/// # Errors
///
/// Returns an error if a count is zero or not every key could be placed
pub fn place_spawn_points_with_rng(
    grid: Grid,
    config: &SpawnConfig,
    rng: &mut SeededRandom,
) -> Result<SpawnResult> {
    let started = Instant::now();
    let connectivity = ConnectivityMap::analyze(&grid);
    config.validate(&connectivity)?;

    let mut placer = Placer {
        grid,
        used: HashSet::new(),
    };
    let mut stats = SpawnStats::with_connectivity(&connectivity);

    let mut c1 = connectivity.get(1).to_vec();
    let mut c2 = connectivity.get(2).to_vec();
    rng.shuffle(&mut c1);
    rng.shuffle(&mut c2);

    let mut exits = Vec::with_capacity(config.exit_count);
    stats.exits_on_c1 = placer.fill(&c1, Interactable::Exit, config.exit_count, &mut exits);
    if exits.len() < config.exit_count {
        warn!(
            c1_used = stats.exits_on_c1,
            "Not enough C1 tiles; using C2 tiles for remaining exits"
        );
        stats.exits_on_c2 = placer.fill(&c2, Interactable::Exit, config.exit_count, &mut exits);
    }
    if exits.len() < config.exit_count {
        warn!(
            placed = exits.len(),
            requested = config.exit_count,
            "Placed fewer exits than requested"
        );
    }

    let mut c4 = connectivity.get(4).to_vec();
    let mut c3 = connectivity.get(3).to_vec();
    rng.shuffle(&mut c4);
    rng.shuffle(&mut c3);

    let mut entries = Vec::with_capacity(config.entry_count);
    stats.entries_on_c4 = placer.fill(&c4, Interactable::Entry, config.entry_count, &mut entries);
    if entries.len() < config.entry_count {
        warn!(
            c4_used = stats.entries_on_c4,
            "Not enough C4 tiles; using C3 tiles for remaining entries"
        );
        stats.entries_on_c3 =
            placer.fill(&c3, Interactable::Entry, config.entry_count, &mut entries);
    }
    if entries.len() < config.entry_count {
        warn!(
            placed = entries.len(),
            requested = config.entry_count,
            "Placed fewer entries than requested"
        );
    }

    let mut key_pool: Vec<Position> = c3
        .iter()
        .chain(&c2)
        .copied()
        .filter(|pos| !placer.used.contains(pos))
        .collect();
    rng.shuffle(&mut key_pool);

    let mut keys = Vec::with_capacity(config.key_count);
    placer.fill(&key_pool, Interactable::Key, config.key_count, &mut keys);
    if keys.len() < config.key_count {
        return Err(GenerationError::InsufficientKeyTiles {
            placed: keys.len(),
            requested: config.key_count,
        });
    }
    stats.keys_on_c3 = keys
        .iter()
        .filter(|&&pos| connectivity.contains(3, pos))
        .count();
    stats.keys_on_c2 = keys.len() - stats.keys_on_c3;

    let Placer { grid, .. } = placer;
    let validation = validate_placement(&grid, &entries, &exits, &keys);

    stats.total_entries = entries.len();
    stats.total_exits = exits.len();
    stats.total_keys = keys.len();
    stats.execution_time = started.elapsed();
    info!(
        entries = entries.len(),
        exits = exits.len(),
        keys = keys.len(),
        "Spawn point placement complete"
    );

    Ok(SpawnResult {
        grid,
        entries,
        exits,
        keys,
        stats,
        validation,
    })
}

/// Grid plus the set of positions already claimed
struct Placer {
    grid: Grid,
    used: HashSet<Position>,
}

impl Placer {
    /// Mark candidates in order until `placed` reaches `target`
    ///
    /// Skips positions already claimed or already carrying a marker.
    /// Returns how many markers this call added.
    fn fill(
        &mut self,
        candidates: &[Position],
        interactable: Interactable,
        target: usize,
        placed: &mut Vec<Position>,
    ) -> usize {
        let before = placed.len();
        for &position in candidates {
            if placed.len() >= target {
                break;
            }
            if self.used.contains(&position) {
                continue;
            }
            let Some(tile) = self.grid.tile_mut(position) else {
                continue;
            };
            if tile.interactable.is_some() {
                continue;
            }
            tile.interactable = Some(interactable);
            self.used.insert(position);
            placed.push(position);
        }
        placed.len() - before
    }
}
