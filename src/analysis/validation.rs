//! Post-generation invariant checks
//!
//! Every stage re-scans its output and attaches a [`ValidationReport`] to its
//! result. Violations are logged and returned, never raised as errors.

use crate::io::configuration::MAX_LOGGED_VIOLATIONS;
use crate::spatial::grid::{Grid, Interactable, TileType};
use crate::spatial::position::Position;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info, warn};

/// A broken output invariant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// Four FLOOR tiles form a 2x2 block
    #[error(
        "2x2 floor pattern found at position {top_left}. \
         Pattern: {top_left}, ({}, {}), ({}, {}), ({}, {})",
        top_left.x + 1, top_left.y, top_left.x, top_left.y + 1, top_left.x + 1, top_left.y + 1
    )]
    FloorBlock {
        /// Top-left cell of the block
        top_left: Position,
    },

    /// A FLOOR tile lies on the grid border
    #[error("Border tile at {position} is FLOOR (should be WALL or VOID)")]
    BorderFloor {
        /// Offending cell
        position: Position,
    },

    /// A non-VOID tile carries no biome
    #[error("Tile at {position} [{kind:?}] has no biome")]
    UnlabeledTile {
        /// Offending cell
        position: Position,
        /// Its structural kind
        kind: TileType,
    },

    /// Markers on the grid disagree with the returned position list
    #[error("Expected {expected} {interactable} markers, found {found} on the grid")]
    CountMismatch {
        /// Marker category
        interactable: Interactable,
        /// Length of the returned list
        expected: usize,
        /// Markers of that category on the grid
        found: usize,
    },

    /// The same position appears in more than one returned list
    #[error("Position {position} is used by more than one interactable")]
    SharedPosition {
        /// Offending cell
        position: Position,
    },
}

/// Outcome of one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Every violation found, in scan order
    pub violations: Vec<InvariantViolation>,
}

impl ValidationReport {
    /// Whether no violation was found
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of violations
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Whether the report holds no violation
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Log the outcome under `stage`, listing only the first few violations
    pub fn log(&self, stage: &str) {
        if self.is_valid() {
            debug!(stage, "Validation passed");
            return;
        }
        warn!(stage, violations = self.len(), "Validation failed");
        for violation in self.violations.iter().take(MAX_LOGGED_VIOLATIONS) {
            warn!(stage, "{violation}");
        }
        if self.len() > MAX_LOGGED_VIOLATIONS {
            warn!(
                stage,
                "... and {} more violations",
                self.len() - MAX_LOGGED_VIOLATIONS
            );
        }
    }
}

/// Check that no 2x2 FLOOR block exists and no FLOOR lies on the border
pub fn validate_topology(grid: &Grid) -> ValidationReport {
    let mut violations = Vec::new();

    for (position, tile) in grid.iter() {
        if tile.kind != TileType::Floor {
            continue;
        }
        let block = [
            Position::new(position.x + 1, position.y),
            Position::new(position.x, position.y + 1),
            Position::new(position.x + 1, position.y + 1),
        ];
        if block.iter().all(|&cell| grid.is(cell, TileType::Floor)) {
            violations.push(InvariantViolation::FloorBlock { top_left: position });
        }
    }

    for (position, tile) in grid.iter() {
        if tile.kind == TileType::Floor && grid.is_border(position) {
            violations.push(InvariantViolation::BorderFloor { position });
        }
    }

    let report = ValidationReport { violations };
    report.log("topology");
    report
}

/// Check that every non-VOID tile carries a biome
pub fn validate_biomes(grid: &Grid) -> ValidationReport {
    let violations: Vec<_> = grid
        .iter()
        .filter(|(_, tile)| tile.kind != TileType::Void && tile.biome.is_none())
        .map(|(position, tile)| InvariantViolation::UnlabeledTile {
            position,
            kind: tile.kind,
        })
        .collect();

    info!(unassigned = violations.len(), "Biome validation complete");
    let report = ValidationReport { violations };
    report.log("biomes");
    report
}

/// Check that grid markers match the returned lists and never share a cell
pub fn validate_placement(
    grid: &Grid,
    entries: &[Position],
    exits: &[Position],
    keys: &[Position],
) -> ValidationReport {
    let mut violations = Vec::new();

    for (interactable, list) in [
        (Interactable::Entry, entries),
        (Interactable::Exit, exits),
        (Interactable::Key, keys),
    ] {
        let found = grid
            .iter()
            .filter(|(_, tile)| tile.interactable == Some(interactable))
            .count();
        if found != list.len() {
            violations.push(InvariantViolation::CountMismatch {
                interactable,
                expected: list.len(),
                found,
            });
        }
    }

    let mut seen = HashSet::new();
    for &position in entries.iter().chain(exits).chain(keys) {
        if !seen.insert(position) {
            violations.push(InvariantViolation::SharedPosition { position });
        }
    }

    let report = ValidationReport { violations };
    report.log("placement");
    report
}
